//! Final music prompt data and the deterministic fallback template.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::components::{CollectedComponents, language_label};
use crate::workflow::ComponentKind;

pub const UNSPECIFIED: &str = "Tidak ditentukan";
pub const NO_VOCALIST: &str = "Instrumental (tidak ada vokalis)";
pub const UNTITLED: &str = "Belum Ada Judul";
pub const INSTRUMENTAL_MARKER: &str = "Music Type: Instrumental (Tidak ada lirik)";

/// Moods recognized when splitting a genre/mood line without the AI.
pub const KNOWN_MOODS: [&str; 7] = [
    "Triumphant",
    "Misterius",
    "Tenang (Calm)",
    "Sedih (Melancholic)",
    "Bahagia (Uplifting)",
    "Nostalgia",
    "Eksperimental",
];

static SONG_TITLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)Judul Lagu[ \t]*:[ \t]*(.*?)[ \t]*$").expect("invalid regex pattern")
});

/// Everything the final prompt is built from, derived from the collected
/// components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptData {
    /// Raw genre/mood line as sent, if any.
    pub genre_mood: Option<String>,
    pub language: String,
    pub vocals: String,
    pub title: String,
    /// Lyrics without the title line and the blank line after it.
    pub lyrics_body: String,
    pub instruments: String,
}

impl PromptData {
    pub fn from_components(collected: &CollectedComponents) -> Self {
        let lyrics = collected.lyrics();
        let (title, lyrics_body) = lyrics
            .map(|(text, _)| split_lyrics(text))
            .unwrap_or_else(|| (UNTITLED.to_string(), String::new()));

        Self {
            genre_mood: collected.text(ComponentKind::GenreMood).map(String::from),
            language: language_label(lyrics.map(|(_, language)| language)),
            vocals: collected
                .text(ComponentKind::Vocals)
                .unwrap_or(NO_VOCALIST)
                .to_string(),
            title,
            lyrics_body,
            instruments: collected
                .text(ComponentKind::Instruments)
                .unwrap_or(UNSPECIFIED)
                .to_string(),
        }
    }

    pub fn has_lyrics(&self) -> bool {
        !self.lyrics_body.is_empty()
    }
}

/// Splits generated lyrics into the title (first line) and the body (third
/// line onwards).
fn split_lyrics(text: &str) -> (String, String) {
    let lines: Vec<&str> = text.split('\n').collect();
    let title = lines
        .first()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();
    let body = if lines.len() > 2 {
        lines[2..].join("\n").trim().to_string()
    } else {
        String::new()
    };
    (title, body)
}

/// Splits a genre/mood line into `(genres, mood)`.
///
/// The first part naming a known mood is the mood; every other part is a
/// genre. Missing halves become "Tidak ditentukan".
pub fn split_genre_mood(genre_mood: Option<&str>) -> (String, String) {
    let Some(text) = genre_mood else {
        return (UNSPECIFIED.to_string(), UNSPECIFIED.to_string());
    };
    let text = text.strip_suffix('.').unwrap_or(text);

    let mut mood: Option<&str> = None;
    let mut genres = Vec::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if mood.is_none() && KNOWN_MOODS.contains(&part) {
            mood = Some(part);
        } else {
            genres.push(part);
        }
    }

    let genres = if genres.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        genres.join(", ")
    };
    (genres, mood.unwrap_or(UNSPECIFIED).to_string())
}

/// Assembles the final prompt without the AI.
pub fn fallback_prompt(data: &PromptData) -> String {
    let (genres, mood) = split_genre_mood(data.genre_mood.as_deref());
    let mut prompt = format!(
        "Genre: {genres}, Mood: {mood}, Instruments: {}\nBahasa: {},\nJudul Lagu : {}\nVokalis: {},\n",
        data.instruments, data.language, data.title, data.vocals
    );
    if data.has_lyrics() {
        prompt.push_str("Include these lyrics:\n\n");
        prompt.push_str(&data.lyrics_body);
    } else {
        prompt.push_str(INSTRUMENTAL_MARKER);
    }
    prompt.trim().to_string()
}

/// Song title from the first `Judul Lagu : X` line of a final prompt.
///
/// Only the first such line counts; an empty title there yields `None`.
pub fn extract_song_title(prompt: &str) -> Option<String> {
    SONG_TITLE_LINE
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}
