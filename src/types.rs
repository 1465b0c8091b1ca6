//! Core types and data structures for matilha scheduling

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a walk session, shown in the session title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// Regular Saturday walk
    Saturday,
    /// Regular Sunday walk
    Sunday,
    /// Any other day, or an explicit override
    Holiday,
}

impl SessionKind {
    /// Label used in session titles
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Saturday => "Sábado",
            SessionKind::Sunday => "Domingo",
            SessionKind::Holiday => "Feriado",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Avatar reference, decided once when the walker is created or edited
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Avatar {
    /// Image picked from the device or hosted somewhere
    Remote(String),
    /// Asset shipped with the application
    Bundled(String),
    /// No picture, render the initial instead
    #[default]
    None,
}

impl Avatar {
    /// Build an avatar from an optional picked image uri
    pub fn from_uri(uri: Option<String>) -> Self {
        match uri {
            Some(uri) if !uri.trim().is_empty() => Avatar::Remote(uri),
            _ => Avatar::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Avatar::None)
    }
}

/// Payment state of a dog within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    /// The only transition: flip to the other state
    pub fn toggled(self) -> Self {
        match self {
            PaymentStatus::Unpaid => PaymentStatus::Paid,
            PaymentStatus::Paid => PaymentStatus::Unpaid,
        }
    }
}

/// Dog registered in the kennel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    /// Unique identifier for the dog
    pub id: String,
    /// Canonicalized name used for matching
    pub name: String,
    /// Owner or guardian
    pub tutor: Option<String>,
    /// Pick-up address
    pub address: Option<String>,
}

impl Dog {
    /// Create a new dog
    pub fn new(id: String, name: String, tutor: Option<String>, address: Option<String>) -> Self {
        Self {
            id,
            name,
            tutor,
            address,
        }
    }
}

/// Walker ("passeador") registered in the kennel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walker {
    /// Unique identifier for the walker
    pub id: String,
    /// Display name
    pub name: String,
    /// Phone in the `(xx) xxxxx-xxxx` mask
    pub phone: Option<String>,
    /// Profile picture
    #[serde(default)]
    pub avatar: Avatar,
}

impl Walker {
    /// Create a new walker
    pub fn new(id: String, name: String, phone: Option<String>, avatar: Avatar) -> Self {
        Self {
            id,
            name,
            phone,
            avatar,
        }
    }

    /// First letter of the name, shown when there is no avatar
    pub fn initial(&self) -> Option<char> {
        self.name.trim().chars().next().map(|c| {
            c.to_uppercase().next().unwrap_or(c)
        })
    }
}

/// Walker entry copied into a session roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Avatar,
}

impl From<&Walker> for WalkerRef {
    fn from(walker: &Walker) -> Self {
        Self {
            id: walker.id.clone(),
            name: walker.name.clone(),
            avatar: walker.avatar.clone(),
        }
    }
}

/// Dog entry copied into a session roster, with its payment flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRef {
    pub id: String,
    pub name: String,
    pub paid: bool,
}

impl DogRef {
    /// Snapshot a registered dog into a roster, initially unpaid
    pub fn unpaid(dog: &Dog) -> Self {
        Self {
            id: dog.id.clone(),
            name: dog.name.clone(),
            paid: false,
        }
    }

    pub fn status(&self) -> PaymentStatus {
        if self.paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    }

    /// Flip the payment flag and return the new status
    pub fn toggle_payment(&mut self) -> PaymentStatus {
        let next = self.status().toggled();
        self.paid = next == PaymentStatus::Paid;
        next
    }
}

/// A scheduled group walk ("matilha")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSession {
    /// Unique identifier for the session
    pub id: String,
    /// Calendar date as `DD/MM/YYYY`
    pub date: String,
    /// Saturday, Sunday or Holiday
    pub kind: SessionKind,
    /// Price charged per dog, in whole currency units
    pub price_per_dog: u32,
    /// Walkers leading the session, no duplicate ids
    pub walkers: Vec<WalkerRef>,
    /// Dogs in the session, no duplicate ids
    pub dogs: Vec<DogRef>,
    /// Free-text note
    pub comment: Option<String>,
}

impl WalkSession {
    /// Create a session with an empty roster
    pub fn new(
        id: String,
        date: String,
        kind: SessionKind,
        price_per_dog: u32,
        comment: Option<String>,
    ) -> Self {
        Self {
            id,
            date,
            kind,
            price_per_dog,
            walkers: Vec::new(),
            dogs: Vec::new(),
            comment,
        }
    }

    /// Title shown on the session card, e.g. `MATILHA SÁBADO – 10/01/2026`
    pub fn title(&self) -> String {
        format!(
            "MATILHA {} – {}",
            self.kind.label().to_uppercase(),
            self.date
        )
    }

    pub fn has_walker(&self, walker_id: &str) -> bool {
        self.walkers.iter().any(|w| w.id == walker_id)
    }

    pub fn has_dog(&self, dog_id: &str) -> bool {
        self.dogs.iter().any(|d| d.id == dog_id)
    }

    /// Add a walker snapshot, rejecting duplicate ids
    pub fn add_walker(&mut self, walker: WalkerRef) -> MatilhaResult<()> {
        if self.has_walker(&walker.id) {
            return Err(ValidationError::DuplicateRosterEntry(walker.id).into());
        }
        self.walkers.push(walker);
        Ok(())
    }

    /// Add a dog snapshot, rejecting duplicate ids
    pub fn add_dog(&mut self, dog: DogRef) -> MatilhaResult<()> {
        if self.has_dog(&dog.id) {
            return Err(ValidationError::DuplicateRosterEntry(dog.id).into());
        }
        self.dogs.push(dog);
        Ok(())
    }

    /// Remove a walker from the roster
    pub fn remove_walker(&mut self, walker_id: &str) -> MatilhaResult<WalkerRef> {
        let index = self
            .walkers
            .iter()
            .position(|w| w.id == walker_id)
            .ok_or_else(|| MatilhaError::RosterEntryNotFound(walker_id.to_string()))?;
        Ok(self.walkers.remove(index))
    }

    /// Remove a dog from the roster
    pub fn remove_dog(&mut self, dog_id: &str) -> MatilhaResult<DogRef> {
        let index = self
            .dogs
            .iter()
            .position(|d| d.id == dog_id)
            .ok_or_else(|| MatilhaError::RosterEntryNotFound(dog_id.to_string()))?;
        Ok(self.dogs.remove(index))
    }

    /// Toggle the payment flag of one dog in the roster
    pub fn toggle_payment(&mut self, dog_id: &str) -> MatilhaResult<PaymentStatus> {
        self.dogs
            .iter_mut()
            .find(|d| d.id == dog_id)
            .map(DogRef::toggle_payment)
            .ok_or_else(|| MatilhaError::RosterEntryNotFound(dog_id.to_string()))
    }

    /// Dogs still waiting for payment, in roster order
    pub fn pending_dogs(&self) -> impl Iterator<Item = &DogRef> {
        self.dogs.iter().filter(|d| !d.paid)
    }

    /// Dogs already paid, in roster order
    pub fn paid_dogs(&self) -> impl Iterator<Item = &DogRef> {
        self.dogs.iter().filter(|d| d.paid)
    }
}

/// Field-level validation failures. Always recoverable by editing the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Date is required")]
    EmptyDate,
    #[error("Invalid date '{0}', use the DD/MM/YYYY format")]
    InvalidDate(String),
    #[error("Date '{0}' is in the past")]
    PastDate(String),
    #[error("A session is already scheduled for {0}")]
    DuplicateDate(String),
    #[error("Price '{0}' must be a whole number greater than zero")]
    InvalidPrice(String),
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name '{0}' is already registered")]
    DuplicateName(String),
    #[error("'{0}' is already in this session")]
    DuplicateRosterEntry(String),
    #[error("Invalid session: {0}")]
    InvalidSession(String),
}

/// Errors that can occur in the matilha system
#[derive(Debug, thiserror::Error)]
pub enum MatilhaError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Dog not found: {0}")]
    DogNotFound(String),
    #[error("Walker not found: {0}")]
    WalkerNotFound(String),
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Not in this session: {0}")]
    RosterEntryNotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for matilha operations
pub type MatilhaResult<T> = Result<T, MatilhaError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WalkSession {
        WalkSession::new(
            "s1".to_string(),
            "10/01/2026".to_string(),
            SessionKind::Saturday,
            40,
            None,
        )
    }

    #[test]
    fn test_title() {
        assert_eq!(session().title(), "MATILHA SÁBADO – 10/01/2026");
    }

    #[test]
    fn test_payment_toggle_is_reversible() {
        let dog = Dog::new("3".to_string(), "THOR".to_string(), None, None);
        let mut entry = DogRef::unpaid(&dog);
        assert_eq!(entry.status(), PaymentStatus::Unpaid);
        assert_eq!(entry.toggle_payment(), PaymentStatus::Paid);
        assert!(entry.paid);
        assert_eq!(entry.toggle_payment(), PaymentStatus::Unpaid);
        assert!(!entry.paid);
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let mut s = session();
        let dog = Dog::new("3".to_string(), "THOR".to_string(), None, None);
        s.add_dog(DogRef::unpaid(&dog)).unwrap();
        let err = s.add_dog(DogRef::unpaid(&dog)).unwrap_err();
        assert!(matches!(
            err,
            MatilhaError::Validation(ValidationError::DuplicateRosterEntry(ref id)) if id == "3"
        ));

        let walker = Walker::new("p1".to_string(), "Ana".to_string(), None, Avatar::None);
        s.add_walker(WalkerRef::from(&walker)).unwrap();
        assert!(s.add_walker(WalkerRef::from(&walker)).is_err());
        assert_eq!(s.walkers.len(), 1);
    }

    #[test]
    fn test_toggle_unknown_dog() {
        let mut s = session();
        assert!(matches!(
            s.toggle_payment("nope"),
            Err(MatilhaError::RosterEntryNotFound(_))
        ));
    }

    #[test]
    fn test_remove_from_roster() {
        let mut s = session();
        let dog = Dog::new("4".to_string(), "MAX".to_string(), None, None);
        s.add_dog(DogRef::unpaid(&dog)).unwrap();
        let removed = s.remove_dog("4").unwrap();
        assert_eq!(removed.name, "MAX");
        assert!(s.dogs.is_empty());
        assert!(s.remove_walker("p1").is_err());
    }

    #[test]
    fn test_walker_initial() {
        let walker = Walker::new("p3".to_string(), "  bruno".to_string(), None, Avatar::None);
        assert_eq!(walker.initial(), Some('B'));
        let blank = Walker::new("p4".to_string(), " ".to_string(), None, Avatar::None);
        assert_eq!(blank.initial(), None);
    }

    #[test]
    fn test_avatar_from_uri() {
        assert_eq!(
            Avatar::from_uri(Some("file:///a.png".to_string())),
            Avatar::Remote("file:///a.png".to_string())
        );
        assert!(Avatar::from_uri(Some("  ".to_string())).is_none());
        assert!(Avatar::from_uri(None).is_none());
    }
}
