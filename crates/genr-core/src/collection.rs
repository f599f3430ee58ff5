//! Saved music prompts and instrument descriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which of the two saved lists an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollectionKind {
    Music,
    Instrument,
}

impl CollectionKind {
    /// Prefix of generated item ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Instrument => "instr",
        }
    }

    /// Noun used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Music => "Musik",
            Self::Instrument => "Instrumen",
        }
    }

    pub fn new_item_id(&self) -> String {
        format!("{}_{}", self.id_prefix(), uuid::Uuid::new_v4().simple())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: String,
    pub title: String,
    /// Prompt text for music items, description for instruments.
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A saved item rendered as a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content: String,
}

impl Download {
    pub fn of(item: &SavedItem) -> Self {
        Self {
            file_name: file_name_for(&item.title),
            content: item.content.clone(),
        }
    }
}

/// `<title>.txt` with every character outside `[A-Za-z0-9]` replaced by `_`,
/// lower-cased.
pub fn file_name_for(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.txt")
}
