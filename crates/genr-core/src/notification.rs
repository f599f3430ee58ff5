//! Notifications and the relative time labels shown next to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflow::ComponentKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

/// Title and message of a notification before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn lyrics_generated(song_title: &str, language_label: &str) -> Self {
        Self::new(
            "Lirik Berhasil Dibuat!",
            format!("Lirik untuk \"{song_title}\" ({language_label}) telah selesai."),
        )
    }

    pub fn genre_mood_generated(output: &str) -> Self {
        Self::new(
            "Kombinasi Genre & Mood Dibuat!",
            format!("Pilihan Anda: {output}"),
        )
    }

    pub fn instruments_generated(output: &str) -> Self {
        Self::new("Daftar Instrumen Dibuat!", format!("Instrumen terpilih: {output}"))
    }

    pub fn vocalist_generated(output: &str) -> Self {
        Self::new("Karakter Vokalis Dibuat!", format!("Vokalis: {output}"))
    }

    pub fn vocalist_designed(artist: &str) -> Self {
        Self::new(
            "Desain Vokalis Selesai!",
            format!("Karakteristik vokalis untuk \"{artist}\" telah berhasil didesain."),
        )
    }

    pub fn vocalist_artist_fallback() -> Self {
        Self::new(
            "Info Tambahan Vokalis",
            "AI tidak dapat memproses referensi artis secara spesifik, hasil berdasarkan pilihan manual.",
        )
    }

    pub fn instrument_prompt_generated() -> Self {
        Self::new(
            "Prompt Instrumen Khusus Dibuat!",
            "Prompt instrumen spesifik telah dihasilkan oleh AI.",
        )
    }

    pub fn component_sent(kind: ComponentKind) -> Self {
        Self::new(
            "Komponen Terkirim!",
            format!(
                "Data \"{}\" telah dikirim ke Final Prompt.",
                kind.display_name()
            ),
        )
    }

    pub fn nothing_to_send(kind: ComponentKind) -> Self {
        Self::new(
            "Gagal Mengirim",
            format!(
                "Tidak ada output valid dari \"{}\" untuk dikirim.",
                kind.display_name()
            ),
        )
    }

    pub fn final_prompt_enriched() -> Self {
        Self::new(
            "Prompt Musik Final Tersusun!",
            "Prompt musik Anda dengan sentuhan AI telah berhasil dibuat.",
        )
    }

    pub fn final_prompt_fallback() -> Self {
        Self::new(
            "Prompt Musik (Fallback)",
            "Prompt musik dasar berhasil disusun (tanpa tambahan AI).",
        )
    }

    pub fn nothing_to_save() -> Self {
        Self::new("Gagal Menyimpan", "Tidak ada prompt valid untuk disimpan.")
    }

    pub fn no_instrument_to_save() -> Self {
        Self::new(
            "Gagal Menyimpan",
            "Tidak ada deskripsi instrumen valid untuk disimpan.",
        )
    }

    pub fn music_saved(title: &str) -> Self {
        Self::new(
            "Prompt Disimpan",
            format!("Prompt musik \"{title}\" berhasil disimpan ke Musik Kamu."),
        )
    }

    pub fn title_fallback() -> Self {
        Self::new(
            "Info Judul",
            "Gagal membuat judul otomatis, menggunakan judul default.",
        )
    }

    pub fn instrument_saved(title: &str) -> Self {
        Self::new(
            "Instrumen Disimpan",
            format!(
                "Deskripsi instrumen \"{title}\" berhasil disimpan ke Koleksi Instrumen Kamu."
            ),
        )
    }

    pub fn downloaded(file_name: &str) -> Self {
        Self::new("Konten Diunduh", format!("File \"{file_name}\" telah diunduh."))
    }

    pub fn item_deleted(kind_label: &str, title: &str) -> Self {
        Self::new(
            "Item Dihapus",
            format!("{kind_label} \"{title}\" telah berhasil dihapus."),
        )
    }

    pub fn logged_in(username: &str) -> Self {
        Self::new("Login Berhasil", format!("Selamat datang kembali, {username}!"))
    }

    pub fn logged_out(username: &str) -> Self {
        Self::new("Logout Berhasil", format!("Sampai jumpa lagi, {username}!"))
    }

    pub fn profile_picture_updated() -> Self {
        Self::new(
            "Gambar Profil Diperbarui",
            "Gambar profil Anda telah berhasil diubah.",
        )
    }

    pub fn profile_picture_reset() -> Self {
        Self::new(
            "Gambar Profil Direset",
            "Gambar profil Anda telah direset ke default.",
        )
    }
}

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const MONTH: i64 = 2_592_000;
const YEAR: i64 = 31_536_000;

/// Relative Indonesian label for `then`, as seen at `now`.
///
/// Each unit only applies from two whole units upwards, so anything under two
/// years reads as months and anything under two months reads as days.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    let years = seconds / YEAR;
    if years > 1 {
        return format!("{years} tahun lalu");
    }
    let months = seconds / MONTH;
    if months > 1 {
        return format!("{months} bulan lalu");
    }
    match seconds / DAY {
        days if days > 1 => return format!("{days} hari lalu"),
        1 => return "Kemarin".to_string(),
        _ => {}
    }
    match seconds / HOUR {
        hours if hours > 1 => return format!("{hours} jam lalu"),
        1 => return "1 jam lalu".to_string(),
        _ => {}
    }
    match seconds / MINUTE {
        minutes if minutes > 1 => format!("{minutes} menit lalu"),
        1 => "1 menit lalu".to_string(),
        _ => "Baru saja".to_string(),
    }
}
