//! Components collected for the final music prompt.

use serde::{Deserialize, Serialize};

use crate::workflow::ComponentKind;

/// Language of generated lyrics.
///
/// Known codes get dedicated instructions and labels; anything else is kept
/// verbatim so older snapshots never fail to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LyricLanguage {
    #[default]
    Indonesia,
    English,
    JapaneseRomaji,
    Other(String),
}

impl LyricLanguage {
    pub fn code(&self) -> &str {
        match self {
            Self::Indonesia => "indonesia",
            Self::English => "english",
            Self::JapaneseRomaji => "japanese_romaji",
            Self::Other(code) => code,
        }
    }

    /// Human label used in prompts and notifications.
    pub fn label(&self) -> String {
        match self {
            Self::Indonesia => "Indonesia".to_string(),
            Self::English => "Inggris".to_string(),
            Self::JapaneseRomaji => "Jepang (Romaji)".to_string(),
            Self::Other(code) => capitalize(code),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<String> for LyricLanguage {
    fn from(code: String) -> Self {
        match code.as_str() {
            "indonesia" => Self::Indonesia,
            "english" => Self::English,
            "japanese_romaji" => Self::JapaneseRomaji,
            _ => Self::Other(code),
        }
    }
}

impl From<&str> for LyricLanguage {
    fn from(code: &str) -> Self {
        Self::from(code.to_string())
    }
}

impl From<LyricLanguage> for String {
    fn from(language: LyricLanguage) -> Self {
        language.code().to_string()
    }
}

impl std::fmt::Display for LyricLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Label for the language line of the final prompt. Absent lyrics mean an
/// instrumental track.
pub fn language_label(language: Option<&LyricLanguage>) -> String {
    match language {
        Some(language) => language.label(),
        None => "Instrumental (tidak ada lirik)".to_string(),
    }
}

/// One sent step output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PromptComponent {
    Lyrics {
        text: String,
        language: LyricLanguage,
    },
    GenreMood {
        text: String,
    },
    Instruments {
        text: String,
    },
    Vocals {
        text: String,
    },
}

impl PromptComponent {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Lyrics { .. } => ComponentKind::Lyrics,
            Self::GenreMood { .. } => ComponentKind::GenreMood,
            Self::Instruments { .. } => ComponentKind::Instruments,
            Self::Vocals { .. } => ComponentKind::Vocals,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Lyrics { text, .. }
            | Self::GenreMood { text }
            | Self::Instruments { text }
            | Self::Vocals { text } => text,
        }
    }

    /// Label used when listing collected components.
    pub fn label(&self) -> String {
        match self {
            Self::Lyrics { language, .. } => format!("Lirik ({})", language.label()),
            Self::GenreMood { .. } => "Kombinasi Genre & Mood".to_string(),
            Self::Instruments { .. } => "Daftar Instrumen (Umum)".to_string(),
            Self::Vocals { .. } => "Vokalis".to_string(),
        }
    }
}

/// At most one component per kind, kept in send order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedComponents(Vec<PromptComponent>);

impl CollectedComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `component`, replacing any earlier one of the same kind.
    pub fn insert(&mut self, component: PromptComponent) {
        let kind = component.kind();
        match self.0.iter_mut().find(|c| c.kind() == kind) {
            Some(slot) => *slot = component,
            None => self.0.push(component),
        }
    }

    pub fn get(&self, kind: ComponentKind) -> Option<&PromptComponent> {
        self.0.iter().find(|c| c.kind() == kind)
    }

    pub fn text(&self, kind: ComponentKind) -> Option<&str> {
        self.get(kind).map(PromptComponent::text)
    }

    /// Lyric text and language, if lyrics were sent.
    pub fn lyrics(&self) -> Option<(&str, &LyricLanguage)> {
        self.0.iter().find_map(|c| match c {
            PromptComponent::Lyrics { text, language } => Some((text.as_str(), language)),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptComponent> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How the final prompt was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptOrigin {
    AiEnriched,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalMusicPrompt {
    pub text: String,
    pub origin: PromptOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip_through_string() {
        assert_eq!(LyricLanguage::from("english"), LyricLanguage::English);
        assert_eq!(
            LyricLanguage::from("sundanese"),
            LyricLanguage::Other("sundanese".into())
        );
        let json = serde_json::to_string(&LyricLanguage::JapaneseRomaji).unwrap();
        assert_eq!(json, "\"japanese_romaji\"");
    }

    #[test]
    fn test_language_labels() {
        assert_eq!(language_label(Some(&LyricLanguage::Indonesia)), "Indonesia");
        assert_eq!(language_label(Some(&LyricLanguage::English)), "Inggris");
        assert_eq!(
            language_label(Some(&LyricLanguage::JapaneseRomaji)),
            "Jepang (Romaji)"
        );
        assert_eq!(language_label(Some(&"korean".into())), "Korean");
        assert_eq!(language_label(None), "Instrumental (tidak ada lirik)");
    }

    #[test]
    fn test_insert_replaces_same_kind() {
        let mut collected = CollectedComponents::new();
        collected.insert(PromptComponent::GenreMood { text: "Pop.".into() });
        collected.insert(PromptComponent::Vocals { text: "Pria, Tenor (suara tinggi).".into() });
        collected.insert(PromptComponent::GenreMood { text: "Jazz.".into() });

        assert_eq!(collected.len(), 2);
        assert_eq!(collected.text(ComponentKind::GenreMood), Some("Jazz."));
        assert!(collected.text(ComponentKind::Lyrics).is_none());
    }

    #[test]
    fn test_lyrics_component_keeps_language() {
        let mut collected = CollectedComponents::new();
        collected.insert(PromptComponent::Lyrics {
            text: "Hujan\n\n[Verse 1]".into(),
            language: LyricLanguage::Indonesia,
        });

        let json = serde_json::to_value(&collected).unwrap();
        assert_eq!(json[0]["kind"], "lyrics");
        assert_eq!(json[0]["language"], "indonesia");
        assert_eq!(
            collected.lyrics(),
            Some(("Hujan\n\n[Verse 1]", &LyricLanguage::Indonesia))
        );
        assert_eq!(collected.get(ComponentKind::Lyrics).unwrap().label(), "Lirik (Indonesia)");
    }
}
