//! Walker registry management

use crate::settings::NamePolicy;
use crate::traits::*;
use crate::types::*;
use crate::utils::mask::mask_phone;
use crate::utils::validation::{normalize_optional, validate_name, validate_unique_name};

/// Changes applied when editing a walker
#[derive(Debug, Clone, Default)]
pub struct WalkerUpdate {
    pub name: String,
    pub phone: Option<String>,
    /// `None` keeps the current avatar
    pub avatar: Option<Avatar>,
}

/// Walker manager for the kennel registry
pub struct WalkerManager<S: MatilhaStorage> {
    pub(crate) storage: S,
    policy: NamePolicy,
}

impl<S: MatilhaStorage> WalkerManager<S> {
    /// Create a new walker manager
    pub fn new(storage: S, policy: NamePolicy) -> Self {
        Self { storage, policy }
    }

    async fn check_name(&self, name: &str, editing_id: Option<&str>) -> MatilhaResult<()> {
        let existing = self.storage.list_walkers().await?;
        validate_unique_name(
            self.policy,
            name,
            existing.iter().map(|w| (w.id.as_str(), w.name.as_str())),
            editing_id,
        )?;
        Ok(())
    }

    /// Register a new walker
    pub async fn create_walker(
        &mut self,
        name: &str,
        phone: Option<&str>,
        avatar: Avatar,
    ) -> MatilhaResult<Walker> {
        let name = validate_name(name)?;
        self.check_name(name, None).await?;

        let walker = Walker::new(
            uuid::Uuid::new_v4().to_string(),
            self.policy.canonicalize(name),
            normalize_phone(phone),
            avatar,
        );
        self.storage.save_walker(&walker).await?;
        tracing::debug!(walker_id = %walker.id, name = %walker.name, "walker registered");

        Ok(walker)
    }

    /// Edit an existing walker
    pub async fn update_walker(&mut self, walker_id: &str, update: WalkerUpdate) -> MatilhaResult<Walker> {
        let mut walker = self.get_walker_required(walker_id).await?;
        let name = validate_name(&update.name)?;
        self.check_name(name, Some(walker_id)).await?;

        walker.name = self.policy.canonicalize(name);
        walker.phone = normalize_phone(update.phone.as_deref());
        if let Some(avatar) = update.avatar {
            walker.avatar = avatar;
        }

        self.storage.update_walker(&walker).await?;
        tracing::debug!(walker_id = %walker.id, "walker updated");

        Ok(walker)
    }

    /// Remove a walker from the registry. Session rosters keep their copy.
    pub async fn remove_walker(&mut self, walker_id: &str) -> MatilhaResult<Walker> {
        let walker = self.get_walker_required(walker_id).await?;
        self.storage.delete_walker(walker_id).await?;
        tracing::debug!(walker_id = %walker.id, "walker removed");
        Ok(walker)
    }

    /// Get a walker by ID
    pub async fn get_walker(&self, walker_id: &str) -> MatilhaResult<Option<Walker>> {
        self.storage.get_walker(walker_id).await
    }

    /// Get a walker by ID, returning an error if not found
    pub async fn get_walker_required(&self, walker_id: &str) -> MatilhaResult<Walker> {
        self.storage
            .get_walker(walker_id)
            .await?
            .ok_or_else(|| MatilhaError::WalkerNotFound(walker_id.to_string()))
    }

    /// List all walkers
    pub async fn list_walkers(&self) -> MatilhaResult<Vec<Walker>> {
        self.storage.list_walkers().await
    }

    /// Walkers whose name contains the query, ignoring case
    pub async fn search_walkers(&self, query: &str) -> MatilhaResult<Vec<Walker>> {
        let walkers = self.storage.list_walkers().await?;
        if query.trim().is_empty() {
            return Ok(walkers);
        }
        Ok(walkers
            .into_iter()
            .filter(|w| NamePolicy::CaseInsensitive.matches(&w.name, query))
            .collect())
    }
}

fn normalize_phone(phone: Option<&str>) -> Option<String> {
    normalize_optional(phone)
        .map(|p| mask_phone(&p))
        .filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    fn manager() -> WalkerManager<MemoryStorage> {
        WalkerManager::new(MemoryStorage::seeded(), NamePolicy::CaseSensitive)
    }

    #[tokio::test]
    async fn test_create_masks_phone() {
        let mut walkers = manager();
        let walker = walkers
            .create_walker(" Carla ", Some("21912345678"), Avatar::None)
            .await
            .unwrap();

        assert_eq!(walker.name, "Carla");
        assert_eq!(walker.phone.as_deref(), Some("(21) 91234-5678"));

        let silent = walkers.create_walker("Duda", Some("  "), Avatar::None).await.unwrap();
        assert_eq!(silent.phone, None);
    }

    #[tokio::test]
    async fn test_case_sensitive_uniqueness() {
        let mut walkers = manager();
        assert!(walkers.create_walker("Ana", None, Avatar::None).await.is_err());
        assert!(walkers.create_walker("ana", None, Avatar::None).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_keeps_avatar_when_none_picked() {
        let mut walkers = manager();
        let updated = walkers
            .update_walker(
                "p1",
                WalkerUpdate {
                    name: "Ana".to_string(),
                    phone: None,
                    avatar: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.avatar, Avatar::Bundled("avatars/ana.png".to_string()));
        assert_eq!(updated.phone, None);

        let updated = walkers
            .update_walker(
                "p1",
                WalkerUpdate {
                    name: "Ana Paula".to_string(),
                    phone: Some("(21) 90000-0000".to_string()),
                    avatar: Some(Avatar::Remote("file:///ana.jpg".to_string())),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana Paula");
        assert_eq!(updated.avatar, Avatar::Remote("file:///ana.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_rename_to_taken_name_fails() {
        let mut walkers = manager();
        let err = walkers
            .update_walker(
                "p2",
                WalkerUpdate {
                    name: "Ana".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MatilhaError::Validation(ValidationError::DuplicateName(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_and_search() {
        let mut walkers = manager();
        assert_eq!(walkers.search_walkers("BRU").await.unwrap().len(), 1);

        let removed = walkers.remove_walker("p2").await.unwrap();
        assert_eq!(removed.name, "Bruno");
        assert!(walkers.search_walkers("bru").await.unwrap().is_empty());
        assert!(matches!(
            walkers.remove_walker("p2").await,
            Err(MatilhaError::WalkerNotFound(_))
        ));
    }
}
