//! Login gate in front of the studio.
//!
//! While locked no studio exists. A successful login loads the user's
//! snapshot into a fresh [`Workbench`] and builds every use case on top of
//! it; logout drops them again.

use std::sync::Arc;

use genr_core::error::{GenrError, Result};
use genr_core::gateway::GenerationGateway;
use genr_core::notification::Notice;
use genr_core::state::{ApplicationState, CardSummary, StateRepository};
use genr_core::storage::KeyValueStore;
use genr_core::user::{AuthError, CredentialStore, registration_message, validate_registration};
use genr_core::workflow::StepKind;
use genr_infrastructure::{KvCredentialStore, KvStateRepository};
use tracing::{info, warn};

use crate::assembler::PromptAssembler;
use crate::chat::ChatAssistant;
use crate::collection::CollectionManager;
use crate::notifications::NotificationCenter;
use crate::preferences::Preferences;
use crate::prompts::ASSISTANT_WELCOME;
use crate::steps::StepController;
use crate::workbench::Workbench;

/// Everything a logged-in user works with, sharing one workbench.
pub struct Studio {
    workbench: Arc<Workbench>,
    pub steps: StepController,
    pub assembler: PromptAssembler,
    pub collection: CollectionManager,
    pub notifications: NotificationCenter,
    pub chat: ChatAssistant,
    pub preferences: Preferences,
}

impl Studio {
    pub fn new(workbench: Arc<Workbench>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            steps: StepController::new(workbench.clone(), gateway.clone()),
            assembler: PromptAssembler::new(workbench.clone(), gateway.clone()),
            collection: CollectionManager::new(workbench.clone(), gateway.clone()),
            notifications: NotificationCenter::new(workbench.clone()),
            chat: ChatAssistant::new(workbench.clone(), gateway),
            preferences: Preferences::new(workbench.clone()),
            workbench,
        }
    }

    pub fn username(&self) -> &str {
        self.workbench.username()
    }

    pub fn workbench(&self) -> &Arc<Workbench> {
        &self.workbench
    }

    pub async fn snapshot(&self) -> ApplicationState {
        self.workbench.snapshot().await
    }

    pub async fn card(&self, kind: StepKind) -> CardSummary {
        self.workbench.read(|state| state.card(kind)).await
    }
}

pub enum SessionState {
    Locked,
    Unlocked(Box<Studio>),
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub username: String,
    /// Welcome text, only when the user has no chat history yet.
    pub greeting: Option<&'static str>,
}

pub struct SessionGate {
    credentials: Arc<dyn CredentialStore>,
    repository: Arc<dyn StateRepository>,
    gateway: Arc<dyn GenerationGateway>,
    state: SessionState,
}

impl SessionGate {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        repository: Arc<dyn StateRepository>,
        gateway: Arc<dyn GenerationGateway>,
    ) -> Self {
        Self {
            credentials,
            repository,
            gateway,
            state: SessionState::Locked,
        }
    }

    /// Gate whose accounts and snapshots both live in `store`.
    pub fn with_store(store: Arc<dyn KeyValueStore>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self::new(
            Arc::new(KvCredentialStore::new(store.clone())),
            Arc::new(KvStateRepository::new(store)),
            gateway,
        )
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, SessionState::Locked)
    }

    pub fn current_user(&self) -> Option<&str> {
        match &self.state {
            SessionState::Unlocked(studio) => Some(studio.username()),
            SessionState::Locked => None,
        }
    }

    /// The studio of the logged-in user.
    pub fn studio(&self) -> Result<&Studio> {
        match &self.state {
            SessionState::Unlocked(studio) => Ok(studio.as_ref()),
            SessionState::Locked => Err(GenrError::Locked),
        }
    }

    /// Seeds the default account if needed and restores the remembered user.
    /// Returns the restored username.
    pub async fn boot(&mut self) -> Result<Option<String>> {
        if self.credentials.ensure_seeded().await? {
            info!("Credential registry initialized");
        }
        let Some(username) = self.credentials.remembered_user().await? else {
            return Ok(None);
        };
        let workbench = self.open_workbench(&username).await?;
        self.state = SessionState::Unlocked(Box::new(Studio::new(workbench, self.gateway.clone())));
        info!(%username, "Restored session");
        Ok(Some(username))
    }

    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> std::result::Result<LoginOutcome, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyFields);
        }
        if !self.credentials.verify(username, password).await? {
            warn!(%username, "Rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        self.credentials.remember_user(username).await?;
        let workbench = self.open_workbench(username).await?;
        let greeting = workbench
            .read(|state| state.chat_history.is_empty())
            .await
            .then_some(ASSISTANT_WELCOME);
        workbench.notify(Notice::logged_in(username)).await?;

        self.state = SessionState::Unlocked(Box::new(Studio::new(workbench, self.gateway.clone())));
        info!(%username, "Logged in");
        Ok(LoginOutcome {
            username: username.to_string(),
            greeting,
        })
    }

    /// Locks the studio. The user's snapshot stays in the store.
    /// Returns who was logged out.
    pub async fn logout(&mut self) -> Result<Option<String>> {
        let previous = std::mem::replace(&mut self.state, SessionState::Locked);
        let SessionState::Unlocked(studio) = previous else {
            self.credentials.forget_user().await?;
            return Ok(None);
        };
        let username = studio.username().to_string();
        studio.workbench().notify(Notice::logged_out(&username)).await?;
        self.credentials.forget_user().await?;
        info!(%username, "Logged out");
        Ok(Some(username))
    }

    /// Creates an account without logging in. Returns the confirmation
    /// message.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<String, AuthError> {
        let username = validate_registration(username, password)?;
        self.credentials.register(username, password).await?;
        Ok(registration_message(username))
    }

    /// Loads the snapshot of `username`, starting from defaults when there
    /// is none or it cannot be read.
    async fn open_workbench(&self, username: &str) -> Result<Arc<Workbench>> {
        let state = match self.repository.load(username).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!(%username, "No stored state, starting from defaults");
                self.fresh_state(username).await?
            }
            Err(e) if e.is_serialization() => {
                warn!(%username, error = %e, "Discarding unreadable state snapshot");
                self.repository.discard(username).await?;
                self.fresh_state(username).await?
            }
            Err(e) => return Err(e),
        };
        Ok(Arc::new(Workbench::new(
            username,
            state,
            self.repository.clone(),
        )))
    }

    async fn fresh_state(&self, username: &str) -> Result<ApplicationState> {
        let state = ApplicationState::default();
        self.repository.save(username, &state).await?;
        Ok(state)
    }
}
