//! Per-step state records.

use serde::{Deserialize, Serialize};

use super::StepOutcome;
use super::vocal::VocalistRequest;
use crate::components::LyricLanguage;

/// Progress added to the instrument-specific card per success.
pub const PROGRESS_INCREMENT: u32 = 5;
/// Progress value at which the card starts over.
pub const PROGRESS_FULL: u32 = 100;

pub const EMPTY_TITLE_MESSAGE: &str = "Judul lagu tidak boleh kosong.";
pub const LYRICS_FAILED_MESSAGE: &str = "Oops! Gagal membuat lirik. Coba lagi nanti.";
pub const EMPTY_GENRE_MOOD_MESSAGE: &str = "Pilih minimal satu genre atau satu mood.";
pub const EMPTY_INSTRUMENTS_MESSAGE: &str = "Pilih minimal satu instrumen utama atau tambahan.";
pub const VOCALIST_FAILED_MESSAGE: &str =
    "Oops! Gagal mendesain vokalis dengan referensi artis. Coba lagi nanti.";
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Deskripsi instrumen tidak boleh kosong.";
pub const INSTRUMENT_FAILED_MESSAGE: &str =
    "Oops! Gagal menghasilkan prompt instrumen. Coba lagi nanti.";

/// Common bookkeeping of every step.
pub trait StepRecord {
    fn count(&self) -> u32;

    fn output(&self) -> Option<&StepOutcome>;

    fn count_mut(&mut self) -> &mut u32;

    fn output_mut(&mut self) -> &mut Option<StepOutcome>;

    /// Stores the outcome of a generation. Only successes are counted.
    fn record(&mut self, outcome: StepOutcome) {
        if outcome.is_success() {
            *self.count_mut() += 1;
        }
        *self.output_mut() = Some(outcome);
    }
}

macro_rules! step_record {
    ($($step:ty),+) => {
        $(
            impl StepRecord for $step {
                fn count(&self) -> u32 {
                    self.count
                }

                fn output(&self) -> Option<&StepOutcome> {
                    self.output.as_ref()
                }

                fn count_mut(&mut self) -> &mut u32 {
                    &mut self.count
                }

                fn output_mut(&mut self) -> &mut Option<StepOutcome> {
                    &mut self.output
                }
            }
        )+
    };
}

step_record!(LyricsStep, GenreMoodStep, InstrumentsStep, VocalistStep);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LyricsStep {
    pub count: u32,
    pub song_title: String,
    pub language: LyricLanguage,
    pub output: Option<StepOutcome>,
    pub prompt_sent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenreMoodStep {
    pub count: u32,
    pub selected_genres: Vec<String>,
    pub selected_mood: Option<String>,
    pub output: Option<StepOutcome>,
    pub prompt_sent: bool,
}

impl GenreMoodStep {
    /// Genres followed by the mood, comma separated, ending with a period.
    pub fn combine(genres: &[String], mood: Option<&str>) -> StepOutcome {
        let parts: Vec<&str> = genres
            .iter()
            .map(String::as_str)
            .chain(mood)
            .filter(|p| !p.trim().is_empty())
            .collect();
        join_selection(&parts, EMPTY_GENRE_MOOD_MESSAGE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentsStep {
    pub count: u32,
    pub selected_main: Vec<String>,
    pub selected_additional: Vec<String>,
    pub output: Option<StepOutcome>,
    pub prompt_sent: bool,
}

impl InstrumentsStep {
    /// Main instruments followed by additional ones.
    pub fn combine(main: &[String], additional: &[String]) -> StepOutcome {
        let parts: Vec<&str> = main
            .iter()
            .chain(additional)
            .map(String::as_str)
            .filter(|p| !p.trim().is_empty())
            .collect();
        join_selection(&parts, EMPTY_INSTRUMENTS_MESSAGE)
    }
}

fn join_selection(parts: &[&str], empty_message: &str) -> StepOutcome {
    if parts.is_empty() {
        StepOutcome::ValidationError(empty_message.to_string())
    } else {
        StepOutcome::Success(format!("{}.", parts.join(", ")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VocalistStep {
    pub count: u32,
    #[serde(flatten)]
    pub request: VocalistRequest,
    pub output: Option<StepOutcome>,
    pub prompt_sent: bool,
}

/// The free-form instrument designer. It is never sent to the final prompt;
/// its output is saved to the instrument collection instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentSpecificStep {
    pub count: u32,
    pub input: String,
    pub output: Option<StepOutcome>,
    pub progress: u32,
}

impl StepRecord for InstrumentSpecificStep {
    fn count(&self) -> u32 {
        self.count
    }

    fn output(&self) -> Option<&StepOutcome> {
        self.output.as_ref()
    }

    fn count_mut(&mut self) -> &mut u32 {
        &mut self.count
    }

    fn output_mut(&mut self) -> &mut Option<StepOutcome> {
        &mut self.output
    }

    fn record(&mut self, outcome: StepOutcome) {
        if outcome.is_success() {
            self.count += 1;
            self.progress = if self.progress >= PROGRESS_FULL {
                PROGRESS_INCREMENT
            } else {
                self.progress + PROGRESS_INCREMENT
            };
        }
        self.output = Some(outcome);
    }
}
