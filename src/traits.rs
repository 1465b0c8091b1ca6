//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::calendar::parse_date;
use crate::types::*;

/// Storage abstraction for the kennel registries
///
/// The scheduling core works against any backend implementing these methods.
/// Lists are returned in insertion order.
#[async_trait]
pub trait MatilhaStorage: Send + Sync {
    /// Save a new dog
    async fn save_dog(&mut self, dog: &Dog) -> MatilhaResult<()>;

    /// Get a dog by ID
    async fn get_dog(&self, dog_id: &str) -> MatilhaResult<Option<Dog>>;

    /// List all dogs
    async fn list_dogs(&self) -> MatilhaResult<Vec<Dog>>;

    /// Replace an existing dog
    async fn update_dog(&mut self, dog: &Dog) -> MatilhaResult<()>;

    /// Save a new walker
    async fn save_walker(&mut self, walker: &Walker) -> MatilhaResult<()>;

    /// Get a walker by ID
    async fn get_walker(&self, walker_id: &str) -> MatilhaResult<Option<Walker>>;

    /// List all walkers
    async fn list_walkers(&self) -> MatilhaResult<Vec<Walker>>;

    /// Replace an existing walker
    async fn update_walker(&mut self, walker: &Walker) -> MatilhaResult<()>;

    /// Remove a walker from the registry
    async fn delete_walker(&mut self, walker_id: &str) -> MatilhaResult<()>;

    /// Save a new session
    async fn save_session(&mut self, session: &WalkSession) -> MatilhaResult<()>;

    /// Get a session by ID
    async fn get_session(&self, session_id: &str) -> MatilhaResult<Option<WalkSession>>;

    /// List all sessions
    async fn list_sessions(&self) -> MatilhaResult<Vec<WalkSession>>;

    /// Replace an existing session
    async fn update_session(&mut self, session: &WalkSession) -> MatilhaResult<()>;

    /// Remove a session
    async fn delete_session(&mut self, session_id: &str) -> MatilhaResult<()>;
}

/// Trait for implementing custom session validation rules
pub trait SessionValidator: Send + Sync {
    /// Validate a session before it is saved
    fn validate_session(&self, session: &WalkSession) -> MatilhaResult<()>;
}

/// Default validator enforcing the structural session invariants
pub struct DefaultSessionValidator;

impl SessionValidator for DefaultSessionValidator {
    fn validate_session(&self, session: &WalkSession) -> MatilhaResult<()> {
        if session.id.trim().is_empty() {
            return Err(ValidationError::InvalidSession("session ID cannot be empty".to_string()).into());
        }

        if parse_date(&session.date).is_none() {
            return Err(ValidationError::InvalidDate(session.date.clone()).into());
        }

        if session.price_per_dog == 0 {
            return Err(ValidationError::InvalidPrice(session.price_per_dog.to_string()).into());
        }

        let mut walker_ids = std::collections::HashSet::new();
        for walker in &session.walkers {
            if !walker_ids.insert(walker.id.as_str()) {
                return Err(ValidationError::DuplicateRosterEntry(walker.id.clone()).into());
            }
        }

        let mut dog_ids = std::collections::HashSet::new();
        for dog in &session.dogs {
            if !dog_ids.insert(dog.id.as_str()) {
                return Err(ValidationError::DuplicateRosterEntry(dog.id.clone()).into());
            }
        }

        Ok(())
    }
}
