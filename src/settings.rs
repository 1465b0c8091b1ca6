//! Application settings
//!
//! Every field has a default so partial documents deserialize cleanly.

use serde::{Deserialize, Serialize};

/// How two names are compared when checking for duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Names are stored as typed and compared exactly
    CaseSensitive,
    /// Names are stored uppercased and compared ignoring case
    CaseInsensitive,
}

impl NamePolicy {
    /// Form of the name that gets stored
    pub fn canonicalize(&self, name: &str) -> String {
        let name = name.trim();
        match self {
            NamePolicy::CaseSensitive => name.to_string(),
            NamePolicy::CaseInsensitive => name.to_uppercase(),
        }
    }

    pub fn same_name(&self, a: &str, b: &str) -> bool {
        self.canonicalize(a) == self.canonicalize(b)
    }

    /// Substring match used by list searches
    pub fn matches(&self, name: &str, query: &str) -> bool {
        self.canonicalize(name).contains(&self.canonicalize(query))
    }
}

/// Settings for the kennel composition root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatilhaSettings {
    /// Price pre-filled when scheduling a new session
    #[serde(default = "default_price_per_dog")]
    pub default_price_per_dog: u32,
    /// Identity rule for dog names
    #[serde(default = "default_dog_names")]
    pub dog_names: NamePolicy,
    /// Identity rule for walker names
    #[serde(default = "default_walker_names")]
    pub walker_names: NamePolicy,
    /// Symbol prefixed to amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for MatilhaSettings {
    fn default() -> Self {
        Self {
            default_price_per_dog: default_price_per_dog(),
            dog_names: default_dog_names(),
            walker_names: default_walker_names(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_price_per_dog() -> u32 {
    40
}

fn default_dog_names() -> NamePolicy {
    NamePolicy::CaseInsensitive
}

fn default_walker_names() -> NamePolicy {
    NamePolicy::CaseSensitive
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}
