//! Saving, deleting and downloading items of the two saved lists.

use std::sync::Arc;

use chrono::{Local, Utc};
use genr_core::collection::{CollectionKind, Download, SavedItem};
use genr_core::error::{GenrError, Result};
use genr_core::gateway::GenerationGateway;
use genr_core::notification::Notice;
use genr_core::prompt::extract_song_title;
use genr_core::workflow::StepRecord;
use tracing::{info, warn};

use crate::prompts;
use crate::steps::ask;
use crate::workbench::{Activity, Workbench};

fn clock_suffix() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

pub struct CollectionManager {
    workbench: Arc<Workbench>,
    gateway: Arc<dyn GenerationGateway>,
}

impl CollectionManager {
    pub fn new(workbench: Arc<Workbench>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { workbench, gateway }
    }

    pub async fn list(&self, kind: CollectionKind) -> Vec<SavedItem> {
        self.workbench
            .read(|state| state.saved_items(kind).to_vec())
            .await
    }

    /// Saves the current final prompt to the music list.
    ///
    /// Returns `None` (and tells the user) when there is no prompt to save.
    pub async fn save_music_prompt(&self) -> Result<Option<SavedItem>> {
        self.workbench
            .update(|state| {
                let now = Utc::now();
                let Some(text) = state
                    .final_music_prompt
                    .as_ref()
                    .map(|prompt| prompt.text.clone())
                    .filter(|text| !text.trim().is_empty())
                else {
                    state.push_notification(Notice::nothing_to_save(), now);
                    return None;
                };

                let title = extract_song_title(&text)
                    .unwrap_or_else(|| format!("Prompt Musik {}", clock_suffix()));
                let item = state.add_saved_item(CollectionKind::Music, title, text, now);
                state.push_notification(Notice::music_saved(&item.title), now);
                info!(id = %item.id, title = %item.title, "Music prompt saved");
                Some(item)
            })
            .await
    }

    /// Saves the instrument-specific output under a generated title.
    ///
    /// A failed title request falls back to a timestamped title; the save
    /// itself still succeeds.
    pub async fn save_instrument_description(&self) -> Result<Option<SavedItem>> {
        let description = self
            .workbench
            .read(|state| {
                state
                    .instrument_specific
                    .output()
                    .and_then(|outcome| outcome.sendable_text())
                    .map(str::to_string)
            })
            .await;
        let Some(description) = description else {
            self.workbench.notify(Notice::no_instrument_to_save()).await?;
            return Ok(None);
        };

        let _guard = self.workbench.begin(Activity::InstrumentTitle)?;
        let instruction = prompts::instrument_title_instruction(&description)?;
        let title = match ask(self.gateway.as_ref(), &instruction).await {
            Ok(title) => Ok(title),
            Err(e) => {
                warn!(error = %e, "Instrument title generation failed, using default title");
                Err(format!("Instrumen Kustom {}", clock_suffix()))
            }
        };

        self.workbench
            .update(|state| {
                let now = Utc::now();
                let title = title.unwrap_or_else(|fallback| {
                    state.push_notification(Notice::title_fallback(), now);
                    fallback
                });
                let item =
                    state.add_saved_item(CollectionKind::Instrument, title, description, now);
                state.push_notification(Notice::instrument_saved(&item.title), now);
                info!(id = %item.id, title = %item.title, "Instrument description saved");
                Some(item)
            })
            .await
    }

    /// Removes an item the user already confirmed deleting.
    ///
    /// Unknown ids change nothing, but the state is written either way.
    pub async fn delete_item(&self, kind: CollectionKind, id: &str) -> Result<Option<SavedItem>> {
        self.workbench
            .update(|state| {
                let removed = state.remove_saved_item(kind, id);
                if let Some(item) = &removed {
                    state.push_notification(
                        Notice::item_deleted(kind.label(), &item.title),
                        Utc::now(),
                    );
                    info!(%kind, id, "Saved item deleted");
                }
                removed
            })
            .await
    }

    /// Renders a saved item as a text file.
    pub async fn download(&self, kind: CollectionKind, id: &str) -> Result<Download> {
        self.workbench
            .update(|state| {
                let download = state
                    .saved_item(kind, id)
                    .map(Download::of)
                    .ok_or_else(|| GenrError::not_found("saved item", id))?;
                state.push_notification(Notice::downloaded(&download.file_name), Utc::now());
                Ok(download)
            })
            .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGateway, workbench, workbench_with_store};
    use genr_core::components::{FinalMusicPrompt, PromptOrigin};
    use genr_core::gateway::GatewayError;
    use genr_core::state::ApplicationState;
    use genr_core::storage::KeyValueStore;
    use genr_core::workflow::StepOutcome;
    use genr_infrastructure::state_repository::state_key;

    fn manager(
        workbench: &Arc<Workbench>,
        answers: Vec<std::result::Result<String, GatewayError>>,
    ) -> CollectionManager {
        CollectionManager::new(workbench.clone(), Arc::new(ScriptedGateway::new(answers)))
    }

    async fn set_final_prompt(workbench: &Workbench, text: &str) {
        workbench
            .update(|state| {
                state.final_music_prompt = Some(FinalMusicPrompt {
                    text: text.to_string(),
                    origin: PromptOrigin::Fallback,
                });
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_music_prompt_requires_prompt() {
        let workbench = workbench();
        let saved = manager(&workbench, vec![]).save_music_prompt().await.unwrap();
        assert!(saved.is_none());
        let state = workbench.snapshot().await;
        assert_eq!(state.saved_music_items.len(), 2);
        assert_eq!(state.notifications[0].title, "Gagal Menyimpan");
    }

    #[tokio::test]
    async fn test_save_music_prompt_uses_song_title() {
        let workbench = workbench();
        set_final_prompt(&workbench, "Genre: Pop\nJudul Lagu : Pagi Ceria\nVokalis: Pria,").await;

        let item = manager(&workbench, vec![])
            .save_music_prompt()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.title, "Pagi Ceria");
        assert!(item.id.starts_with("music_"));

        let state = workbench.snapshot().await;
        assert_eq!(state.saved_music_items[0], item);
        assert_eq!(
            state.notifications[0].message,
            "Prompt musik \"Pagi Ceria\" berhasil disimpan ke Musik Kamu."
        );
    }

    #[tokio::test]
    async fn test_save_music_prompt_without_title_line() {
        let workbench = workbench();
        set_final_prompt(&workbench, "Ambient drones, 60 BPM").await;
        let item = manager(&workbench, vec![])
            .save_music_prompt()
            .await
            .unwrap()
            .unwrap();
        let suffix = item.title.strip_prefix("Prompt Musik ").unwrap();
        assert_eq!(suffix.len(), 8);
        assert_eq!(suffix.matches(':').count(), 2);
    }

    #[tokio::test]
    async fn test_save_instrument_with_generated_title() {
        let workbench = workbench();
        workbench
            .update(|state| {
                state
                    .instrument_specific
                    .record(StepOutcome::Success("Warm legato cello".into()));
            })
            .await
            .unwrap();

        let item = manager(&workbench, vec![Ok("Cello Hangat Legato\n".into())])
            .save_instrument_description()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.title, "Cello Hangat Legato");
        assert_eq!(item.content, "Warm legato cello");
        assert!(item.id.starts_with("instr_"));
        let state = workbench.snapshot().await;
        assert_eq!(state.notifications[0].title, "Instrumen Disimpan");
        assert_eq!(state.notifications.len(), 1);
    }

    #[tokio::test]
    async fn test_save_instrument_title_fallback() {
        let workbench = workbench();
        workbench
            .update(|state| {
                state
                    .instrument_specific
                    .record(StepOutcome::Success("Glassy synth pad".into()));
            })
            .await
            .unwrap();

        let item = manager(&workbench, vec![Err(GatewayError::NotConfigured)])
            .save_instrument_description()
            .await
            .unwrap()
            .unwrap();
        assert!(item.title.starts_with("Instrumen Kustom "));

        let state = workbench.snapshot().await;
        let titles: Vec<_> = state.notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Instrumen Disimpan", "Info Judul"]);
        assert_eq!(state.saved_instrument_items.len(), 3);
    }

    #[tokio::test]
    async fn test_save_instrument_requires_success() {
        let workbench = workbench();
        workbench
            .update(|state| {
                state
                    .instrument_specific
                    .record(StepOutcome::ServiceError("Oops!".into()));
            })
            .await
            .unwrap();
        let saved = manager(&workbench, vec![])
            .save_instrument_description()
            .await
            .unwrap();
        assert!(saved.is_none());
        let state = workbench.snapshot().await;
        assert_eq!(
            state.notifications[0].message,
            "Tidak ada deskripsi instrumen valid untuk disimpan."
        );
    }

    #[tokio::test]
    async fn test_delete_item() {
        let workbench = workbench();
        let manager = manager(&workbench, vec![]);

        assert!(
            manager
                .delete_item(CollectionKind::Music, "nope")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(manager.list(CollectionKind::Music).await.len(), 2);
        assert!(workbench.snapshot().await.notifications.is_empty());

        let removed = manager
            .delete_item(CollectionKind::Instrument, "instr_default_1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(removed.title, "Suara Hujan Akustik (Contoh)");
        let state = workbench.snapshot().await;
        assert_eq!(state.saved_instrument_items.len(), 1);
        assert_eq!(
            state.notifications[0].message,
            "Instrumen \"Suara Hujan Akustik (Contoh)\" telah berhasil dihapus."
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_id_still_persists() {
        let (store, workbench) = workbench_with_store();
        let manager = manager(&workbench, vec![]);
        let key = state_key("budi");
        store.set(&key, "stale").unwrap();

        manager
            .delete_item(CollectionKind::Music, "nope")
            .await
            .unwrap();

        let raw = store.get(&key).unwrap().unwrap();
        let stored: ApplicationState = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, workbench.snapshot().await);
        assert_eq!(stored.saved_music_items.len(), 2);
    }

    #[tokio::test]
    async fn test_download() {
        let workbench = workbench();
        let manager = manager(&workbench, vec![]);
        let download = manager
            .download(CollectionKind::Music, "music_default_2")
            .await
            .unwrap();
        assert_eq!(download.file_name, "pagi_ceria__contoh_.txt");
        assert!(!download.content.is_empty());

        let err = manager
            .download(CollectionKind::Instrument, "music_default_2")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
