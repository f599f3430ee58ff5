//! The single owner of a user's [`ApplicationState`].
//!
//! Every mutation goes through [`Workbench::update`], which applies it under
//! the state lock and writes the full snapshot before returning. Gateway calls
//! happen outside the lock; [`Workbench::begin`] makes sure only one call per
//! activity is outstanding.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use genr_core::error::{GenrError, Result};
use genr_core::notification::Notice;
use genr_core::state::{ApplicationState, StateRepository};
use genr_core::workflow::StepKind;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Work that waits on the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Step(StepKind),
    Assembly,
    InstrumentTitle,
    Chat,
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Step(kind) => write!(f, "step '{kind}'"),
            Activity::Assembly => f.write_str("final prompt assembly"),
            Activity::InstrumentTitle => f.write_str("instrument title"),
            Activity::Chat => f.write_str("chat"),
        }
    }
}

pub struct Workbench {
    username: String,
    state: Mutex<ApplicationState>,
    repository: Arc<dyn StateRepository>,
    in_flight: StdMutex<HashSet<Activity>>,
    panel_open: AtomicBool,
}

impl Workbench {
    pub fn new(
        username: impl Into<String>,
        state: ApplicationState,
        repository: Arc<dyn StateRepository>,
    ) -> Self {
        Self {
            username: username.into(),
            state: Mutex::new(state),
            repository,
            in_flight: StdMutex::new(HashSet::new()),
            panel_open: AtomicBool::new(false),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> ApplicationState {
        self.state.lock().await.clone()
    }

    /// Reads from the state without persisting anything.
    pub async fn read<R>(&self, f: impl FnOnce(&ApplicationState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Applies `f` and writes the resulting snapshot.
    ///
    /// The lock is held until the write finishes, so snapshots reach the
    /// repository in mutation order.
    pub async fn update<R>(&self, f: impl FnOnce(&mut ApplicationState) -> R) -> Result<R> {
        let mut state = self.state.lock().await;
        let result = f(&mut state);
        self.repository.save(&self.username, &state).await?;
        debug!(username = %self.username, "State persisted");
        Ok(result)
    }

    /// Writes the current state without changing it.
    pub async fn persist(&self) -> Result<()> {
        self.update(|_| ()).await
    }

    /// Prepends a notification, persists, and returns whether the bell should
    /// pulse.
    pub async fn notify(&self, notice: Notice) -> Result<bool> {
        self.update(|state| state.push_notification(notice, Utc::now()))
            .await?;
        Ok(self.should_pulse())
    }

    /// The bell pulses for new notifications while the panel is closed.
    pub fn should_pulse(&self) -> bool {
        !self.panel_open.load(Ordering::SeqCst)
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open.load(Ordering::SeqCst)
    }

    /// Flips the notification panel and returns whether it is now open.
    pub fn toggle_panel(&self) -> bool {
        !self.panel_open.fetch_xor(true, Ordering::SeqCst)
    }

    /// Claims `activity` until the returned guard is dropped.
    ///
    /// Fails with [`GenrError::Busy`] while another claim on the same
    /// activity is alive.
    pub fn begin(&self, activity: Activity) -> Result<InFlight<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| GenrError::internal("in-flight registry poisoned"))?;
        if !in_flight.insert(activity) {
            warn!(%activity, "Rejected concurrent request");
            return Err(GenrError::busy(activity.to_string()));
        }
        Ok(InFlight {
            registry: &self.in_flight,
            activity,
        })
    }

    pub fn is_busy(&self, activity: Activity) -> bool {
        self.in_flight
            .lock()
            .map(|in_flight| in_flight.contains(&activity))
            .unwrap_or(false)
    }
}

/// Releases an [`Activity`] claim on drop.
#[derive(Debug)]
pub struct InFlight<'a> {
    registry: &'a StdMutex<HashSet<Activity>>,
    activity: Activity,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.registry.lock() {
            in_flight.remove(&self.activity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genr_infrastructure::{KvStateRepository, MemoryStore};

    fn workbench() -> (Arc<KvStateRepository>, Workbench) {
        let repository = Arc::new(KvStateRepository::new(Arc::new(MemoryStore::new())));
        let workbench = Workbench::new("budi", ApplicationState::default(), repository.clone());
        (repository, workbench)
    }

    #[tokio::test]
    async fn test_update_writes_through() {
        let (repository, workbench) = workbench();
        let collapsed = workbench
            .update(|state| state.toggle_sidebar())
            .await
            .unwrap();
        assert!(collapsed);

        let stored = repository.load("budi").await.unwrap().unwrap();
        assert!(stored.sidebar_collapsed);
        assert_eq!(stored, workbench.snapshot().await);
    }

    #[tokio::test]
    async fn test_begin_rejects_same_activity() {
        let (_, workbench) = workbench();
        let lyrics = Activity::Step(StepKind::Lyrics);

        let guard = workbench.begin(lyrics).unwrap();
        assert!(workbench.begin(lyrics).unwrap_err().is_busy());
        let other = workbench.begin(Activity::Step(StepKind::Vocalist));
        assert!(other.is_ok());
        assert!(workbench.is_busy(lyrics));

        drop(guard);
        assert!(!workbench.is_busy(lyrics));
        assert!(workbench.begin(lyrics).is_ok());
    }

    #[tokio::test]
    async fn test_notify_pulses_only_when_panel_closed() {
        let (_, workbench) = workbench();
        assert!(workbench.notify(Notice::new("A", "a")).await.unwrap());

        assert!(workbench.toggle_panel());
        assert!(!workbench.notify(Notice::new("B", "b")).await.unwrap());
        assert!(!workbench.toggle_panel());

        let state = workbench.snapshot().await;
        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.notifications[0].title, "B");
    }
}
