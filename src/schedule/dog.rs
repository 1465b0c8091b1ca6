//! Dog registry management

use crate::settings::NamePolicy;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{normalize_optional, validate_name, validate_unique_name};

/// Dog manager for the kennel registry. Dogs are never removed.
pub struct DogManager<S: MatilhaStorage> {
    pub(crate) storage: S,
    policy: NamePolicy,
}

impl<S: MatilhaStorage> DogManager<S> {
    /// Create a new dog manager
    pub fn new(storage: S, policy: NamePolicy) -> Self {
        Self { storage, policy }
    }

    /// Register a new dog. The name is stored canonicalized.
    pub async fn create_dog(
        &mut self,
        name: &str,
        tutor: Option<&str>,
        address: Option<&str>,
    ) -> MatilhaResult<Dog> {
        let name = validate_name(name)?;
        let existing = self.storage.list_dogs().await?;
        validate_unique_name(
            self.policy,
            name,
            existing.iter().map(|d| (d.id.as_str(), d.name.as_str())),
            None,
        )?;

        let dog = Dog::new(
            uuid::Uuid::new_v4().to_string(),
            self.policy.canonicalize(name),
            normalize_optional(tutor),
            normalize_optional(address),
        );
        self.storage.save_dog(&dog).await?;
        tracing::debug!(dog_id = %dog.id, name = %dog.name, "dog registered");

        Ok(dog)
    }

    /// Update contact details. The name stays locked after creation.
    pub async fn update_dog(
        &mut self,
        dog_id: &str,
        tutor: Option<&str>,
        address: Option<&str>,
    ) -> MatilhaResult<Dog> {
        let mut dog = self.get_dog_required(dog_id).await?;
        dog.tutor = normalize_optional(tutor);
        dog.address = normalize_optional(address);

        self.storage.update_dog(&dog).await?;
        tracing::debug!(dog_id = %dog.id, "dog updated");

        Ok(dog)
    }

    /// Get a dog by ID
    pub async fn get_dog(&self, dog_id: &str) -> MatilhaResult<Option<Dog>> {
        self.storage.get_dog(dog_id).await
    }

    /// Get a dog by ID, returning an error if not found
    pub async fn get_dog_required(&self, dog_id: &str) -> MatilhaResult<Dog> {
        self.storage
            .get_dog(dog_id)
            .await?
            .ok_or_else(|| MatilhaError::DogNotFound(dog_id.to_string()))
    }

    /// List all dogs
    pub async fn list_dogs(&self) -> MatilhaResult<Vec<Dog>> {
        self.storage.list_dogs().await
    }

    /// Dogs whose name contains the query. A blank query lists everything.
    pub async fn search_dogs(&self, query: &str) -> MatilhaResult<Vec<Dog>> {
        let dogs = self.storage.list_dogs().await?;
        if query.trim().is_empty() {
            return Ok(dogs);
        }
        Ok(dogs
            .into_iter()
            .filter(|d| self.policy.matches(&d.name, query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    fn manager() -> DogManager<MemoryStorage> {
        DogManager::new(MemoryStorage::seeded(), NamePolicy::CaseInsensitive)
    }

    #[tokio::test]
    async fn test_create_canonicalizes_name() {
        let mut dogs = manager();
        let dog = dogs
            .create_dog("  cacau ", Some(" Lucas "), Some(""))
            .await
            .unwrap();

        assert_eq!(dog.name, "CACAU");
        assert_eq!(dog.tutor.as_deref(), Some("Lucas"));
        assert_eq!(dog.address, None);
        assert_eq!(dogs.list_dogs().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_duplicate_and_empty_names() {
        let mut dogs = manager();

        let err = dogs.create_dog("Luna", None, None).await.unwrap_err();
        assert!(matches!(
            err,
            MatilhaError::Validation(ValidationError::DuplicateName(ref n)) if n == "LUNA"
        ));

        let err = dogs.create_dog("   ", None, None).await.unwrap_err();
        assert!(matches!(err, MatilhaError::Validation(ValidationError::EmptyName)));
    }

    #[tokio::test]
    async fn test_update_keeps_name() {
        let mut dogs = manager();
        let dog = dogs
            .update_dog("3", Some("Paulo"), Some("Rua A"))
            .await
            .unwrap();

        assert_eq!(dog.name, "THOR");
        assert_eq!(dog.tutor.as_deref(), Some("Paulo"));
        assert!(matches!(
            dogs.update_dog("missing", None, None).await,
            Err(MatilhaError::DogNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search() {
        let dogs = manager();
        let found: Vec<String> = dogs
            .search_dogs("n")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(found, vec!["LUNA", "NINA"]);
        assert!(dogs.search_dogs("zzz").await.unwrap().is_empty());
        assert_eq!(dogs.search_dogs(" ").await.unwrap().len(), 5);
    }
}
