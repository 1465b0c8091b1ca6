//! Kennel: composition root owning the dog, walker and session registries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::order_sessions;
use crate::reconciliation::{format_split, format_total, Reconciliation, Settlement};
use crate::schedule::{DogManager, SessionDraft, SessionManager, WalkerManager, WalkerUpdate};
use crate::settings::MatilhaSettings;
use crate::traits::*;
use crate::types::*;

/// Main entry point that coordinates registries and sessions
pub struct Kennel<S: MatilhaStorage> {
    dog_manager: DogManager<S>,
    walker_manager: WalkerManager<S>,
    session_manager: SessionManager<S>,
    settings: MatilhaSettings,
}

impl<S: MatilhaStorage + Clone> Kennel<S> {
    /// Create a kennel with default settings
    pub fn new(storage: S) -> Self {
        Self::with_settings(storage, MatilhaSettings::default())
    }

    /// Create a kennel with explicit settings
    pub fn with_settings(storage: S, settings: MatilhaSettings) -> Self {
        Self {
            dog_manager: DogManager::new(storage.clone(), settings.dog_names),
            walker_manager: WalkerManager::new(storage.clone(), settings.walker_names),
            session_manager: SessionManager::new(storage),
            settings,
        }
    }

    /// Create a kennel with a custom session validator
    pub fn with_validator(
        storage: S,
        settings: MatilhaSettings,
        session_validator: Box<dyn SessionValidator>,
    ) -> Self {
        Self {
            dog_manager: DogManager::new(storage.clone(), settings.dog_names),
            walker_manager: WalkerManager::new(storage.clone(), settings.walker_names),
            session_manager: SessionManager::with_validator(storage, session_validator),
            settings,
        }
    }

    pub fn settings(&self) -> &MatilhaSettings {
        &self.settings
    }

    // Dog operations
    /// Register a dog
    pub async fn create_dog(
        &mut self,
        name: &str,
        tutor: Option<&str>,
        address: Option<&str>,
    ) -> MatilhaResult<Dog> {
        self.dog_manager.create_dog(name, tutor, address).await
    }

    /// Update a dog's tutor and address
    pub async fn update_dog(
        &mut self,
        dog_id: &str,
        tutor: Option<&str>,
        address: Option<&str>,
    ) -> MatilhaResult<Dog> {
        self.dog_manager.update_dog(dog_id, tutor, address).await
    }

    pub async fn get_dog(&self, dog_id: &str) -> MatilhaResult<Option<Dog>> {
        self.dog_manager.get_dog(dog_id).await
    }

    pub async fn list_dogs(&self) -> MatilhaResult<Vec<Dog>> {
        self.dog_manager.list_dogs().await
    }

    pub async fn search_dogs(&self, query: &str) -> MatilhaResult<Vec<Dog>> {
        self.dog_manager.search_dogs(query).await
    }

    // Walker operations
    /// Register a walker
    pub async fn create_walker(
        &mut self,
        name: &str,
        phone: Option<&str>,
        avatar: Avatar,
    ) -> MatilhaResult<Walker> {
        self.walker_manager.create_walker(name, phone, avatar).await
    }

    /// Edit a walker
    pub async fn update_walker(&mut self, walker_id: &str, update: WalkerUpdate) -> MatilhaResult<Walker> {
        self.walker_manager.update_walker(walker_id, update).await
    }

    /// Remove a walker from the registry
    pub async fn remove_walker(&mut self, walker_id: &str) -> MatilhaResult<Walker> {
        self.walker_manager.remove_walker(walker_id).await
    }

    pub async fn get_walker(&self, walker_id: &str) -> MatilhaResult<Option<Walker>> {
        self.walker_manager.get_walker(walker_id).await
    }

    pub async fn list_walkers(&self) -> MatilhaResult<Vec<Walker>> {
        self.walker_manager.list_walkers().await
    }

    pub async fn search_walkers(&self, query: &str) -> MatilhaResult<Vec<Walker>> {
        self.walker_manager.search_walkers(query).await
    }

    // Session operations
    /// Blank session form using the configured default price
    pub fn new_session_draft(&self) -> SessionDraft {
        SessionDraft::new(self.settings.default_price_per_dog)
    }

    /// Schedule a session from form input
    pub async fn schedule_session(
        &mut self,
        draft: &SessionDraft,
        today: NaiveDate,
    ) -> MatilhaResult<WalkSession> {
        self.session_manager.schedule_session(draft, today).await
    }

    /// Edit a session's date, kind, price and comment
    pub async fn edit_session(
        &mut self,
        session_id: &str,
        draft: &SessionDraft,
        today: NaiveDate,
    ) -> MatilhaResult<WalkSession> {
        self.session_manager
            .edit_session(session_id, draft, today)
            .await
    }

    /// Remove a session
    pub async fn remove_session(&mut self, session_id: &str) -> MatilhaResult<()> {
        self.session_manager.remove_session(session_id).await
    }

    pub async fn get_session(&self, session_id: &str) -> MatilhaResult<Option<WalkSession>> {
        self.session_manager.get_session(session_id).await
    }

    pub async fn list_sessions(&self) -> MatilhaResult<Vec<WalkSession>> {
        self.session_manager.list_sessions().await
    }

    // Roster operations
    /// Add a registered walker to a session
    pub async fn add_walker_to_session(
        &mut self,
        session_id: &str,
        walker_id: &str,
    ) -> MatilhaResult<WalkSession> {
        let walker = self.walker_manager.get_walker_required(walker_id).await?;
        self.session_manager.add_walker(session_id, &walker).await
    }

    /// Add a registered dog to a session
    pub async fn add_dog_to_session(
        &mut self,
        session_id: &str,
        dog_id: &str,
    ) -> MatilhaResult<WalkSession> {
        let dog = self.dog_manager.get_dog_required(dog_id).await?;
        self.session_manager.add_dog(session_id, &dog).await
    }

    pub async fn remove_walker_from_session(
        &mut self,
        session_id: &str,
        walker_id: &str,
    ) -> MatilhaResult<WalkSession> {
        self.session_manager
            .remove_walker(session_id, walker_id)
            .await
    }

    pub async fn remove_dog_from_session(
        &mut self,
        session_id: &str,
        dog_id: &str,
    ) -> MatilhaResult<WalkSession> {
        self.session_manager.remove_dog(session_id, dog_id).await
    }

    /// Flip a dog's payment flag within a session
    pub async fn toggle_payment(
        &mut self,
        session_id: &str,
        dog_id: &str,
    ) -> MatilhaResult<PaymentStatus> {
        self.session_manager.toggle_payment(session_id, dog_id).await
    }

    /// Refresh a session's roster snapshots from the current registries
    pub async fn resync_session(&mut self, session_id: &str) -> MatilhaResult<WalkSession> {
        let dogs = self.dog_manager.list_dogs().await?;
        let walkers = self.walker_manager.list_walkers().await?;
        self.session_manager
            .resync_session(session_id, &dogs, &walkers)
            .await
    }

    // Reporting
    /// Reconcile a single session
    pub async fn reconcile(&self, session_id: &str) -> MatilhaResult<Reconciliation> {
        let session = self.session_manager.get_session_required(session_id).await?;
        Ok(Reconciliation::for_session(&session))
    }

    /// Ordered sessions with their reconciliation, as shown on the home screen
    pub async fn overview(&self, today: NaiveDate) -> MatilhaResult<KennelOverview> {
        let sessions = self.session_manager.list_sessions().await?;
        let ordering = order_sessions(&sessions, today);

        let upcoming = ordering.upcoming.len();
        let entries = ordering
            .ordered()
            .into_iter()
            .map(|session| SessionOverview {
                reconciliation: Reconciliation::for_session(session),
                session: session.clone(),
            })
            .collect();
        let rejected: Vec<WalkSession> = ordering.rejected.into_iter().cloned().collect();

        if !rejected.is_empty() {
            tracing::warn!(count = rejected.len(), "sessions with invalid dates left out of overview");
        }

        Ok(KennelOverview {
            today,
            upcoming,
            sessions: entries,
            rejected,
        })
    }

    /// Text lines summarizing a session's money, using the configured currency
    pub fn payment_summary(&self, reconciliation: &Reconciliation) -> PaymentSummary {
        let symbol = &self.settings.currency_symbol;
        PaymentSummary {
            expected: format_total(symbol, reconciliation.expected_total),
            expected_per_walker: reconciliation
                .expected_per_walker
                .as_ref()
                .map(|a| format_split(symbol, a)),
            received: format_total(symbol, reconciliation.received_total),
            received_per_walker: reconciliation
                .received_per_walker
                .as_ref()
                .map(|a| format_split(symbol, a)),
            status: match reconciliation.settlement() {
                Settlement::Settled => "TUDO CERTO".to_string(),
                Settlement::Outstanding(amount) => {
                    format!("FALTAM {}", format_total(symbol, amount))
                }
            },
        }
    }
}

/// One session and its financial summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOverview {
    pub session: WalkSession,
    pub reconciliation: Reconciliation,
}

/// Home screen data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KennelOverview {
    pub today: NaiveDate,
    /// How many leading entries of `sessions` are upcoming
    pub upcoming: usize,
    /// Upcoming sessions soonest first, then past sessions most recent first
    pub sessions: Vec<SessionOverview>,
    /// Sessions whose stored date does not parse
    pub rejected: Vec<WalkSession>,
}

impl KennelOverview {
    pub fn upcoming_sessions(&self) -> &[SessionOverview] {
        &self.sessions[..self.split_point()]
    }

    pub fn past_sessions(&self) -> &[SessionOverview] {
        &self.sessions[self.split_point()..]
    }

    // `upcoming` is public and may come from a deserialized overview
    fn split_point(&self) -> usize {
        self.upcoming.min(self.sessions.len())
    }
}

/// Display strings for a session's money
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub expected: String,
    pub expected_per_walker: Option<String>,
    pub received: String,
    pub received_per_walker: Option<String>,
    pub status: String,
}
