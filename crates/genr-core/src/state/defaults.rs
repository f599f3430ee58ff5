//! Example items every new user starts with.

use chrono::{DateTime, Duration, Utc};

use crate::collection::SavedItem;

fn item(id: &str, title: &str, content: &str, timestamp: DateTime<Utc>) -> SavedItem {
    SavedItem {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        timestamp,
    }
}

pub fn example_music_items(now: DateTime<Utc>) -> Vec<SavedItem> {
    vec![
        item(
            "music_default_1",
            "Melodi Senja (Contoh)",
            "Genre: Lo-fi Hip Hop, Mood: Tenang (Calm), Instruments: Piano, Drum Machine, Synth Pads\n\
             Bahasa: Instrumental (tidak ada lirik),\n\
             Judul Lagu : Melodi Senja\n\
             Vokalis: Instrumental (tidak ada vokalis),\n\
             Music Type: Instrumental (Tidak ada lirik)",
            now - Duration::days(2),
        ),
        item(
            "music_default_2",
            "Pagi Ceria (Contoh)",
            "Genre: Pop Ceria, Mood: Bahagia (Uplifting), Instruments: Ukulele, Gitar Akustik, Perkusi Ringan\n\
             Bahasa: Indonesia,\n\
             Judul Lagu : Pagi Ceria\n\
             Vokalis: Wanita, Sopran (suara tinggi),\n\
             Include these lyrics:\n\n\
             [Verse 1]\n\
             Mentari bersinar lagi\n\
             Embun pagi menyejukkan hati",
            now - Duration::days(1),
        ),
    ]
}

pub fn example_instrument_items(now: DateTime<Utc>) -> Vec<SavedItem> {
    vec![
        item(
            "instr_default_1",
            "Suara Hujan Akustik (Contoh)",
            "Gitar Akustik, Piano Rhodes, Cello, Suara Hujan.",
            now - Duration::hours(5),
        ),
        item(
            "instr_default_2",
            "Synth Elektronik Klasik (Contoh)",
            "Drum Machine TR-808, Bass Synth Moog, Synth Pads Juno, Glitch Effects.",
            now - Duration::hours(3),
        ),
    ]
}
