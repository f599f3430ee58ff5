//! Vocalist selection rules.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum VocalGender {
    Pria,
    Wanita,
}

/// Full label for a vocal range. Unknown ranges pass through unchanged.
pub fn range_label(range: &str, gender: VocalGender) -> String {
    let label = match (gender, range) {
        (VocalGender::Pria, "Tenor") => "Tenor (suara tinggi)",
        (VocalGender::Pria, "Bariton") => "Bariton (suara sedang)",
        (VocalGender::Pria, "Bass") => "Bass (suara rendah)",
        (VocalGender::Wanita, "Sopran") => "Sopran (suara tinggi)",
        (VocalGender::Wanita, "Mezzo-Soprano") => "Mezzo-Soprano (suara sedang)",
        (VocalGender::Wanita, "Alto") => "Alto (suara rendah)",
        _ => range,
    };
    label.to_string()
}

const UNSPECIFIED: &str = "Tidak ditentukan";

/// Raw inputs of the vocalist step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocalistRequest {
    pub male_selected: bool,
    pub male_range: Option<String>,
    pub female_selected: bool,
    pub female_range: Option<String>,
    pub artist_reference: String,
}

impl VocalistRequest {
    /// Trimmed artist reference, if one was given.
    pub fn artist(&self) -> Option<&str> {
        let artist = self.artist_reference.trim();
        (!artist.is_empty()).then_some(artist)
    }

    /// Describes the manual selection without an artist reference.
    ///
    /// Exactly one gender with a range is required.
    pub fn describe_manual(&self) -> Result<String, String> {
        let (gender, range) = match (self.male_selected, self.female_selected) {
            (true, true) => {
                return Err("Pilih hanya satu jenis kelamin vokal (Pria atau Wanita) jika tidak menggunakan referensi artis.".to_string());
            }
            (true, false) => (
                VocalGender::Pria,
                non_empty(&self.male_range)
                    .ok_or_else(|| "Pilih rentang nada untuk vokalis pria.".to_string())?,
            ),
            (false, true) => (
                VocalGender::Wanita,
                non_empty(&self.female_range)
                    .ok_or_else(|| "Pilih rentang nada untuk vokalis wanita.".to_string())?,
            ),
            (false, false) => {
                return Err("Pilih minimal satu tipe vokal (Pria/Wanita).".to_string());
            }
        };
        Ok(format!("{}, {}.", gender, range_label(range, gender)))
    }

    /// Output used when the artist lookup answer is not usable.
    pub fn describe_artist_fallback(&self, artist: &str) -> String {
        let gender = if self.male_selected {
            Some(VocalGender::Pria)
        } else if self.female_selected {
            Some(VocalGender::Wanita)
        } else {
            None
        };
        let male_range = non_empty(&self.male_range).filter(|_| self.male_selected);
        let female_range = non_empty(&self.female_range).filter(|_| self.female_selected);
        let range = match (male_range, female_range) {
            (Some(range), _) => range_label(range, VocalGender::Pria),
            (None, Some(range)) => range_label(range, VocalGender::Wanita),
            (None, None) => UNSPECIFIED.to_string(),
        };
        let gender = gender
            .map(|g| g.to_string())
            .unwrap_or_else(|| UNSPECIFIED.to_string());
        format!(
            "{artist}, {gender}, {range} (berdasarkan pilihan manual, AI tidak dapat memproses referensi artis secara spesifik saat ini)."
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Whether an artist lookup answer follows the requested format.
pub fn answer_matches_artist(answer: &str, artist: &str) -> bool {
    answer.to_lowercase().starts_with(&artist.to_lowercase())
}
