//! Workflow step identifiers and step results.

pub mod steps;
pub mod vocal;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use steps::{
    GenreMoodStep, InstrumentSpecificStep, InstrumentsStep, LyricsStep, StepRecord, VocalistStep,
};
pub use vocal::{VocalGender, VocalistRequest, answer_matches_artist};

/// Every generator the studio offers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum StepKind {
    Lyrics,
    GenreMood,
    Instruments,
    Vocalist,
    InstrumentSpecific,
}

impl StepKind {
    /// The collection slot this step feeds, if any.
    pub fn component(&self) -> Option<ComponentKind> {
        match self {
            Self::Lyrics => Some(ComponentKind::Lyrics),
            Self::GenreMood => Some(ComponentKind::GenreMood),
            Self::Instruments => Some(ComponentKind::Instruments),
            Self::Vocalist => Some(ComponentKind::Vocals),
            Self::InstrumentSpecific => None,
        }
    }
}

/// The four steps whose output can be sent to the final prompt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum ComponentKind {
    Lyrics,
    GenreMood,
    Instruments,
    Vocals,
}

impl ComponentKind {
    /// Send order. Focus moves along this sequence after each send.
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Lyrics,
        ComponentKind::GenreMood,
        ComponentKind::Instruments,
        ComponentKind::Vocals,
    ];

    pub fn next(&self) -> Option<ComponentKind> {
        match self {
            Self::Lyrics => Some(Self::GenreMood),
            Self::GenreMood => Some(Self::Instruments),
            Self::Instruments => Some(Self::Vocals),
            Self::Vocals => None,
        }
    }

    pub fn step(&self) -> StepKind {
        match self {
            Self::Lyrics => StepKind::Lyrics,
            Self::GenreMood => StepKind::GenreMood,
            Self::Instruments => StepKind::Instruments,
            Self::Vocals => StepKind::Vocalist,
        }
    }

    /// Card name shown in send notifications.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Lyrics => "Lirik",
            Self::GenreMood => "Genre & Mood",
            Self::Instruments => "Instrumen",
            Self::Vocals => "Vokalis",
        }
    }
}

/// Result of the last generation attempt of a step.
///
/// Only `Success` carries sendable text. Validation and service failures keep
/// the message the user should see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "camelCase")]
pub enum StepOutcome {
    Success(String),
    ValidationError(String),
    ServiceError(String),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The text that may be sent or saved: a non-blank success.
    pub fn sendable_text(&self) -> Option<&str> {
        match self {
            Self::Success(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }

    /// Text to render regardless of the outcome kind.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Success(text) | Self::ValidationError(text) | Self::ServiceError(text) => text,
        }
    }
}
