//! Walk session scheduling, roster and payment management

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::format_date;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{normalize_optional, validate_price, validate_session_date};

/// Raw form input for scheduling or editing a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    /// Date as typed, `DD/MM/YYYY`
    pub date: String,
    pub kind: SessionKind,
    /// Price per dog as typed
    pub price: String,
    pub comment: Option<String>,
}

impl SessionDraft {
    /// Empty form with a pre-filled price
    pub fn new(default_price: u32) -> Self {
        Self {
            date: String::new(),
            kind: SessionKind::Saturday,
            price: default_price.to_string(),
            comment: None,
        }
    }

    /// Form pre-filled from an existing session
    pub fn from_session(session: &WalkSession) -> Self {
        Self {
            date: session.date.clone(),
            kind: session.kind,
            price: session.price_per_dog.to_string(),
            comment: session.comment.clone(),
        }
    }

    /// Set the typed date, pre-selecting the kind for weekend dates
    pub fn set_date(&mut self, input: &str) {
        self.date = crate::utils::mask::mask_date_input(input);
        self.kind = crate::calendar::suggest_kind(&self.date, self.kind);
    }
}

/// Session manager for scheduling and roster operations
pub struct SessionManager<S: MatilhaStorage> {
    pub(crate) storage: S,
    validator: Box<dyn SessionValidator>,
}

impl<S: MatilhaStorage> SessionManager<S> {
    /// Create a new session manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultSessionValidator),
        }
    }

    /// Create a new session manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn SessionValidator>) -> Self {
        Self { storage, validator }
    }

    async fn validate_draft(
        &self,
        draft: &SessionDraft,
        today: NaiveDate,
        editing_id: Option<&str>,
    ) -> MatilhaResult<(NaiveDate, u32)> {
        let existing = self.storage.list_sessions().await?;
        let date = validate_session_date(&draft.date, today, &existing, editing_id)?;
        Ok((date, validate_price(&draft.price)?))
    }

    /// Schedule a new session from form input. The roster starts empty.
    pub async fn schedule_session(
        &mut self,
        draft: &SessionDraft,
        today: NaiveDate,
    ) -> MatilhaResult<WalkSession> {
        let (date, price) = self.validate_draft(draft, today, None).await?;

        let mut builder = SessionBuilder::new(
            uuid::Uuid::new_v4().to_string(),
            format_date(date),
            draft.kind,
            price,
        );
        if let Some(comment) = normalize_optional(draft.comment.as_deref()) {
            builder = builder.comment(comment);
        }
        let session = builder.build()?;
        self.validator.validate_session(&session)?;

        self.storage.save_session(&session).await?;
        tracing::info!(session_id = %session.id, date = %session.date, "session scheduled");

        Ok(session)
    }

    /// Edit date, kind, price and comment. The roster is kept.
    pub async fn edit_session(
        &mut self,
        session_id: &str,
        draft: &SessionDraft,
        today: NaiveDate,
    ) -> MatilhaResult<WalkSession> {
        let mut session = self.get_session_required(session_id).await?;
        let (date, price) = self.validate_draft(draft, today, Some(session_id)).await?;

        session.date = format_date(date);
        session.kind = draft.kind;
        session.price_per_dog = price;
        session.comment = normalize_optional(draft.comment.as_deref());

        self.save(&session).await?;
        tracing::info!(session_id = %session.id, date = %session.date, "session edited");

        Ok(session)
    }

    /// Remove a session
    pub async fn remove_session(&mut self, session_id: &str) -> MatilhaResult<()> {
        self.storage.delete_session(session_id).await?;
        tracing::info!(session_id, "session removed");
        Ok(())
    }

    /// Get a session by ID
    pub async fn get_session(&self, session_id: &str) -> MatilhaResult<Option<WalkSession>> {
        self.storage.get_session(session_id).await
    }

    /// Get a session by ID, returning an error if not found
    pub async fn get_session_required(&self, session_id: &str) -> MatilhaResult<WalkSession> {
        self.storage
            .get_session(session_id)
            .await?
            .ok_or_else(|| MatilhaError::SessionNotFound(session_id.to_string()))
    }

    /// List all sessions in insertion order
    pub async fn list_sessions(&self) -> MatilhaResult<Vec<WalkSession>> {
        self.storage.list_sessions().await
    }

    async fn save(&mut self, session: &WalkSession) -> MatilhaResult<()> {
        self.validator.validate_session(session)?;
        self.storage.update_session(session).await
    }

    /// Load a session, apply `f` and store the result
    async fn modify<R, F>(&mut self, session_id: &str, f: F) -> MatilhaResult<(WalkSession, R)>
    where
        F: FnOnce(&mut WalkSession) -> MatilhaResult<R>,
    {
        let mut session = self.get_session_required(session_id).await?;
        let result = f(&mut session)?;
        self.save(&session).await?;
        Ok((session, result))
    }

    /// Copy a walker into the session roster
    pub async fn add_walker(&mut self, session_id: &str, walker: &Walker) -> MatilhaResult<WalkSession> {
        let entry = WalkerRef::from(walker);
        let (session, ()) = self.modify(session_id, |s| s.add_walker(entry)).await?;
        tracing::info!(session_id, walker_id = %walker.id, "walker joined session");
        Ok(session)
    }

    /// Copy a dog into the session roster, unpaid
    pub async fn add_dog(&mut self, session_id: &str, dog: &Dog) -> MatilhaResult<WalkSession> {
        let entry = DogRef::unpaid(dog);
        let (session, ()) = self.modify(session_id, |s| s.add_dog(entry)).await?;
        tracing::info!(session_id, dog_id = %dog.id, "dog joined session");
        Ok(session)
    }

    /// Take a walker out of the session roster
    pub async fn remove_walker(&mut self, session_id: &str, walker_id: &str) -> MatilhaResult<WalkSession> {
        let (session, _) = self
            .modify(session_id, |s| s.remove_walker(walker_id))
            .await?;
        tracing::info!(session_id, walker_id, "walker left session");
        Ok(session)
    }

    /// Take a dog out of the session roster
    pub async fn remove_dog(&mut self, session_id: &str, dog_id: &str) -> MatilhaResult<WalkSession> {
        let (session, _) = self.modify(session_id, |s| s.remove_dog(dog_id)).await?;
        tracing::info!(session_id, dog_id, "dog left session");
        Ok(session)
    }

    /// Flip a dog's payment flag and return its new status
    pub async fn toggle_payment(&mut self, session_id: &str, dog_id: &str) -> MatilhaResult<PaymentStatus> {
        let (_, status) = self
            .modify(session_id, |s| s.toggle_payment(dog_id))
            .await?;
        tracing::info!(session_id, dog_id, ?status, "payment toggled");
        Ok(status)
    }

    /// Refresh roster snapshots from the registries.
    ///
    /// Names and avatars are copied again for entries whose source still
    /// exists. Payment flags and entries without a source are left alone.
    pub async fn resync_session(
        &mut self,
        session_id: &str,
        dogs: &[Dog],
        walkers: &[Walker],
    ) -> MatilhaResult<WalkSession> {
        let (session, changed) = self
            .modify(session_id, |s| {
                let mut changed = 0usize;
                for entry in s.dogs.iter_mut() {
                    if let Some(dog) = dogs.iter().find(|d| d.id == entry.id) {
                        if entry.name != dog.name {
                            entry.name = dog.name.clone();
                            changed += 1;
                        }
                    }
                }
                for entry in s.walkers.iter_mut() {
                    if let Some(walker) = walkers.iter().find(|w| w.id == entry.id) {
                        let fresh = WalkerRef::from(walker);
                        if *entry != fresh {
                            *entry = fresh;
                            changed += 1;
                        }
                    }
                }
                Ok(changed)
            })
            .await?;
        tracing::debug!(session_id, changed, "roster resynced");
        Ok(session)
    }
}

/// Session builder for assembling sessions with a roster
#[derive(Debug)]
pub struct SessionBuilder {
    session: WalkSession,
}

impl SessionBuilder {
    /// Create a new session builder
    pub fn new(id: String, date: String, kind: SessionKind, price_per_dog: u32) -> Self {
        Self {
            session: WalkSession::new(id, date, kind, price_per_dog, None),
        }
    }

    /// Set the comment
    pub fn comment(mut self, comment: String) -> Self {
        self.session.comment = Some(comment);
        self
    }

    /// Add a walker to the roster
    pub fn walker(mut self, walker: WalkerRef) -> Self {
        self.session.walkers.push(walker);
        self
    }

    /// Add a dog to the roster
    pub fn dog(mut self, dog: DogRef) -> Self {
        self.session.dogs.push(dog);
        self
    }

    /// Build the session
    pub fn build(self) -> MatilhaResult<WalkSession> {
        DefaultSessionValidator.validate_session(&self.session)?;
        Ok(self.session)
    }
}
