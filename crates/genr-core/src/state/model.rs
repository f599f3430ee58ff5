//! The per-user application state aggregate.
//!
//! Everything the studio renders is derived from [`ApplicationState`]. Each
//! mutation here is pure; persisting the result is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::{CollectionKind, SavedItem};
use crate::components::{CollectedComponents, FinalMusicPrompt, PromptComponent};
use crate::error::{GenrError, Result};
use crate::gateway::ChatTurn;
use crate::notification::{Notice, Notification};
use crate::preferences::{
    DEFAULT_PROFILE_PIC_URL, INVALID_IMAGE_URL_MESSAGE, ProfilePictureChange, is_valid_image_url,
};
use crate::state::defaults::{example_instrument_items, example_music_items};
use crate::workflow::steps::StepRecord;
use crate::workflow::{
    ComponentKind, GenreMoodStep, InstrumentSpecificStep, InstrumentsStep, LyricsStep, StepKind,
    VocalistStep,
};

/// Card progress of a primary step once its output was sent.
pub const SENT_CARD_PERCENT: u32 = 25;

fn default_next_notification_id() -> u64 {
    1
}

fn default_profile_pic_url() -> String {
    DEFAULT_PROFILE_PIC_URL.to_string()
}

/// Complete state of one user's studio.
///
/// Missing fields in a stored snapshot fall back to empty values, so older
/// snapshots keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,

    #[serde(default)]
    pub lyrics: LyricsStep,
    #[serde(default)]
    pub genre_mood: GenreMoodStep,
    #[serde(default)]
    pub instruments: InstrumentsStep,
    #[serde(default)]
    pub vocalist: VocalistStep,
    #[serde(default)]
    pub instrument_specific: InstrumentSpecificStep,

    #[serde(default)]
    pub collected: CollectedComponents,
    #[serde(default)]
    pub final_music_prompt: Option<FinalMusicPrompt>,

    #[serde(default)]
    pub saved_music_items: Vec<SavedItem>,
    #[serde(default)]
    pub saved_instrument_items: Vec<SavedItem>,

    /// Newest first.
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default = "default_next_notification_id")]
    pub next_notification_id: u64,

    #[serde(default = "default_profile_pic_url")]
    pub profile_pic_url: String,
    #[serde(default)]
    pub sidebar_collapsed: bool,
    /// Step the UI should focus next.
    #[serde(default)]
    pub active_step: Option<ComponentKind>,
}

/// Result of sending a step output to the final prompt collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Stored; `next` is the step that receives focus.
    Sent { next: Option<ComponentKind> },
    /// The step was already sent. Nothing changed.
    AlreadySent,
    /// The step has no successful output.
    NothingToSend,
}

/// What a dashboard card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub count: u32,
    pub progress_percent: u32,
    pub sent: bool,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::with_defaults(Utc::now())
    }
}

impl ApplicationState {
    /// Fresh state with the example saved items dated relative to `now`.
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            chat_history: Vec::new(),
            lyrics: LyricsStep::default(),
            genre_mood: GenreMoodStep::default(),
            instruments: InstrumentsStep::default(),
            vocalist: VocalistStep::default(),
            instrument_specific: InstrumentSpecificStep::default(),
            collected: CollectedComponents::new(),
            final_music_prompt: None,
            saved_music_items: example_music_items(now),
            saved_instrument_items: example_instrument_items(now),
            notifications: Vec::new(),
            next_notification_id: default_next_notification_id(),
            profile_pic_url: default_profile_pic_url(),
            sidebar_collapsed: false,
            active_step: None,
        }
    }

    // ============================================================================
    // Steps
    // ============================================================================

    pub fn step(&self, kind: StepKind) -> &dyn StepRecord {
        match kind {
            StepKind::Lyrics => &self.lyrics,
            StepKind::GenreMood => &self.genre_mood,
            StepKind::Instruments => &self.instruments,
            StepKind::Vocalist => &self.vocalist,
            StepKind::InstrumentSpecific => &self.instrument_specific,
        }
    }

    pub fn is_sent(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Lyrics => self.lyrics.prompt_sent,
            ComponentKind::GenreMood => self.genre_mood.prompt_sent,
            ComponentKind::Instruments => self.instruments.prompt_sent,
            ComponentKind::Vocals => self.vocalist.prompt_sent,
        }
    }

    fn mark_sent(&mut self, kind: ComponentKind) {
        match kind {
            ComponentKind::Lyrics => self.lyrics.prompt_sent = true,
            ComponentKind::GenreMood => self.genre_mood.prompt_sent = true,
            ComponentKind::Instruments => self.instruments.prompt_sent = true,
            ComponentKind::Vocals => self.vocalist.prompt_sent = true,
        }
    }

    /// Moves the successful output of `kind` into the collection.
    ///
    /// Notifications are left to the caller so it can tell the user why a
    /// send was refused.
    pub fn send_component(&mut self, kind: ComponentKind) -> SendOutcome {
        if self.is_sent(kind) {
            return SendOutcome::AlreadySent;
        }
        let Some(text) = self
            .step(kind.step())
            .output()
            .and_then(|o| o.sendable_text())
            .map(str::to_string)
        else {
            return SendOutcome::NothingToSend;
        };

        let component = match kind {
            ComponentKind::Lyrics => PromptComponent::Lyrics {
                text,
                language: self.lyrics.language.clone(),
            },
            ComponentKind::GenreMood => PromptComponent::GenreMood { text },
            ComponentKind::Instruments => PromptComponent::Instruments { text },
            ComponentKind::Vocals => PromptComponent::Vocals { text },
        };
        self.collected.insert(component);
        self.mark_sent(kind);

        let next = kind.next();
        self.active_step = next;
        SendOutcome::Sent { next }
    }

    pub fn card(&self, kind: StepKind) -> CardSummary {
        let count = self.step(kind).count();
        match kind.component() {
            Some(component) => {
                let sent = self.is_sent(component);
                CardSummary {
                    count,
                    progress_percent: if sent { SENT_CARD_PERCENT } else { 0 },
                    sent,
                }
            }
            None => CardSummary {
                count,
                progress_percent: self.instrument_specific.progress,
                sent: false,
            },
        }
    }

    // ============================================================================
    // Notifications
    // ============================================================================

    /// Prepends an unread notification and returns its id.
    pub fn push_notification(&mut self, notice: Notice, now: DateTime<Utc>) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.insert(
            0,
            Notification {
                id,
                title: notice.title,
                message: notice.message,
                read: false,
                timestamp: now,
            },
        );
        id
    }

    /// Returns whether the notification changed from unread to read.
    pub fn mark_notification_read(&mut self, id: u64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.read => {
                notification.read = true;
                true
            }
            _ => false,
        }
    }

    /// Marks every notification read and returns how many changed.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    // ============================================================================
    // Saved items
    // ============================================================================

    pub fn saved_items(&self, kind: CollectionKind) -> &[SavedItem] {
        match kind {
            CollectionKind::Music => &self.saved_music_items,
            CollectionKind::Instrument => &self.saved_instrument_items,
        }
    }

    fn saved_items_mut(&mut self, kind: CollectionKind) -> &mut Vec<SavedItem> {
        match kind {
            CollectionKind::Music => &mut self.saved_music_items,
            CollectionKind::Instrument => &mut self.saved_instrument_items,
        }
    }

    pub fn saved_item(&self, kind: CollectionKind, id: &str) -> Option<&SavedItem> {
        self.saved_items(kind).iter().find(|item| item.id == id)
    }

    /// Inserts a new item at the front of its list.
    pub fn add_saved_item(
        &mut self,
        kind: CollectionKind,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> SavedItem {
        let item = SavedItem {
            id: kind.new_item_id(),
            title: title.into(),
            content: content.into(),
            timestamp: now,
        };
        self.saved_items_mut(kind).insert(0, item.clone());
        item
    }

    /// Removes the item with `id`, returning it when it existed.
    pub fn remove_saved_item(&mut self, kind: CollectionKind, id: &str) -> Option<SavedItem> {
        let items = self.saved_items_mut(kind);
        let index = items.iter().position(|item| item.id == id)?;
        Some(items.remove(index))
    }

    // ============================================================================
    // Preferences
    // ============================================================================

    /// Sets the profile picture. A blank URL restores the default.
    pub fn set_profile_picture(&mut self, url: &str) -> Result<ProfilePictureChange> {
        let url = url.trim();
        if url.is_empty() {
            self.profile_pic_url = default_profile_pic_url();
            return Ok(ProfilePictureChange::Reset);
        }
        if !is_valid_image_url(url) {
            return Err(GenrError::validation(INVALID_IMAGE_URL_MESSAGE));
        }
        self.profile_pic_url = url.to_string();
        Ok(ProfilePictureChange::Updated)
    }

    /// Flips the sidebar and returns the new collapsed flag.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }
}
