//! Instruction templates sent to the generation gateway.

use genr_core::components::LyricLanguage;
use genr_core::error::{GenrError, Result};
use genr_core::prompt::PromptData;
use minijinja::{Environment, context};
use once_cell::sync::Lazy;

/// Persona of the chat assistant.
pub const ASSISTANT_SYSTEM_INSTRUCTION: &str = "Kamu adalah Mr. GenR, seorang pria tampan yang sangat karismatik dan mempesona, dengan pengetahuan luas tentang musik dan seni musik. Sapa pengguna dengan hangat. Gaya bicaramu sopan, ramah, sedikit puitis, dan penuh wawasan musik, seolah berbincang dengan teman dekat. YANG PALING PENTING: Berikan jawaban yang SANGAT RINGKAS dan JELAS untuk setiap pertanyaan. Langsung ke inti permasalahan tanpa bertele-tele, namun tetap pertahankan pesonamu. Hindari paragraf panjang jika tidak benar-benar diperlukan.";

pub const ASSISTANT_WELCOME: &str = "Halo! Saya Mr. GenR, pemandu karismatik Anda di dunia musik. Ada yang bisa saya bantu rangkai hari ini?";

const LYRICS_TEMPLATE: &str = r#"
{%- set structure -%}
Lirik harus mengikuti struktur lagu Pop/Pop Ballad yang umum (misalnya: Verse 1, Chorus, Verse 2, Chorus, Bridge, Chorus, Outro). Pastikan setiap bagian diberi label yang jelas (contoh: [Verse 1], [Chorus]). Jangan sertakan komentar, penjelasan makna, atau teks tambahan apapun selain judul dan lirik itu sendiri.
{%- endset -%}
{%- if language == "indonesia" -%}
Buatkan lirik lagu lengkap dalam Bahasa Indonesia untuk lagu berjudul "{{ title }}". Baris pertama HANYA berisi judul lagu: "{{ title }}". Setelah judul, berikan satu baris kosong, lalu tuliskan lirik lagunya. {{ structure }}
{%- elif language == "japanese_romaji" -%}
Create complete song lyrics in Japanese, written exclusively in Romaji, for a song titled "{{ title }}". The first line MUST ONLY contain the song title: "{{ title }}". After the title, provide a single blank line, then write the song lyrics. Ensure the output is exclusively Romaji. {{ structure }}
{%- else -%}
Create complete song lyrics in {{ language_name }} for a song titled "{{ title }}". The first line MUST ONLY contain the song title: "{{ title }}". After the title, provide a single blank line, then write the song lyrics. {{ structure }}
{%- endif -%}
"#;

const VOCALIST_ARTIST_TEMPLATE: &str = r#"Analisis artis bernama "{{ artist }}". Tentukan jenis kelamin (Pria atau Wanita) dan rentang suara tipikalnya (misalnya Tenor, Sopran, Alto, Bariton, Bass, Mezzo-Soprano). Format jawaban HANYA sebagai berikut: "{{ artist }}, [Jenis Kelamin Teridentifikasi], [Rentang Suara Teridentifikasi (label lengkap dengan deskripsi dalam kurung seperti 'Tenor (suara tinggi)' atau 'Alto (suara rendah)')]." Jangan sertakan komentar, sapaan, atau teks tambahan apapun selain format yang diminta. Contoh: "Adele, Wanita, Mezzo-Soprano (suara sedang)." atau "Bruno Mars, Pria, Tenor (suara tinggi).""#;

const INSTRUMENT_SPECIFIC_TEMPLATE: &str = r#"User wants an instrument sound described as: "{{ description }}".
Generate a detailed and creative 'Text-To-Instrument' prompt suitable for an AI music generator that focuses on specific instrument sounds.
Describe sonic characteristics, articulation, playing style, mood, and any unique instrumental textures or effects.
If the user's input is brief or vague, offer concrete suggestions and examples of musical terms or ideas to enrich the prompt.
The output should be ONLY the final instrument prompt string, ready to be used."#;

const INSTRUMENT_TITLE_TEMPLATE: &str = r#"Based on the following instrument description, generate a concise and descriptive title (3-5 words) for it. The title should be suitable for a list of saved instrument sound designs. Output ONLY the title itself, nothing else.

Instrument Description:
{{ description }}"#;

const FINAL_PROMPT_TEMPLATE: &str = r#"Anda adalah seorang ahli pembuat prompt musik untuk AI Text-to-Music.
Tugas Anda adalah menggunakan DATA YANG DIKUMPULKAN untuk mengisi TEMPLATE WAJIB secara akurat.
TEMPLATE WAJIB sudah memiliki bagian Instruments yang diisi dengan Daftar Instrumen.
Setelah mengisi template dengan informasi yang ada, Anda HARUS menambahkan saran kreatif Anda sendiri mengenai:
1. Tempo (misalnya: slow, medium, fast, spesifik BPM jika bisa).
2. Nuansa atau atmosfer tambahan (misalnya: cinematic, dreamy, energetic, melancholic, epic).
3. Karakteristik musik lainnya (misalnya: powerful build-up, minimalist, groovy, acoustic, electronic).
4. Kualitas produksi (misalnya: clean mix, lofi quality, studio recording, live concert feel).
Integrasikan saran-saran ini ke dalam hasil akhir, baik dengan memperkaya deskripsi di dalam template (misalnya, menambahkan "120 BPM" ke baris Genre/Mood) atau sebagai baris tambahan setelah blok lirik jika lebih sesuai.
Pastikan output akhir tetap menjaga struktur inti dari TEMPLATE WAJIB.

Analisis informasi berikut dan gunakan untuk mengisi TEMPLATE WAJIB.

DATA YANG DIKUMPULKAN:
- Kombinasi Genre & Mood: {{ data.genre_mood or "Tidak ada" }}
- Bahasa Lirik: {{ data.language }}
- Deskripsi Vokalis: {{ data.vocals }}
- Judul Lagu: {{ data.title }}
- Lirik Lagu:
{{ data.lyrics_body or "Tidak ada lirik" }}
- Daftar Instrumen: {{ data.instruments }}

TEMPLATE WAJIB UNTUK OUTPUT (isi placeholder [] dengan data yang relevan dari DATA YANG DIKUMPULKAN dan tambahkan detail dari saran kreatifmu. Bagian 'Instruments' sudah terisi, jangan ubah itu kecuali untuk menambahkan detail kreatif):
Genre: [genre dari data], Mood: [mood dari data], Instruments: {{ data.instruments }}
Bahasa: [bahasa lirik dari data],
Judul Lagu : [judul lagu dari data]
Vokalis: [vokalis dari data],
{% if data.lyrics_body %}Include these lyrics:

[lirik dari data]{% else %}Music Type: Instrumental (Tidak ada lirik){% endif %}

Format output HANYA berupa string prompt musik final yang siap pakai.
JANGAN sertakan sapaan, penjelasan, atau teks tambahan apapun di luar prompt musik itu sendiri.
PENTING: Jika lirik tidak ada, bagian "Include these lyrics:" harus dihilangkan atau diganti dengan deskripsi bahwa musiknya instrumental."#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        ("lyrics", LYRICS_TEMPLATE),
        ("vocalist_artist", VOCALIST_ARTIST_TEMPLATE),
        ("instrument_specific", INSTRUMENT_SPECIFIC_TEMPLATE),
        ("instrument_title", INSTRUMENT_TITLE_TEMPLATE),
        ("final_prompt", FINAL_PROMPT_TEMPLATE),
    ] {
        env.add_template(name, source)
            .expect("invalid built-in template");
    }
    env
});

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    TEMPLATES
        .get_template(name)
        .and_then(|template| template.render(ctx))
        .map(|text| text.trim().to_string())
        .map_err(|e| GenrError::internal(format!("Failed to render '{name}' template: {e}")))
}

/// Lyrics instruction: title on the first line, a blank line, then labelled
/// song sections.
pub fn lyrics_instruction(title: &str, language: &LyricLanguage) -> Result<String> {
    let language_name = match language {
        LyricLanguage::English => "English".to_string(),
        other => other.label(),
    };
    render(
        "lyrics",
        context! {
            title => title,
            language => language.code(),
            language_name => language_name,
        },
    )
}

pub fn vocalist_artist_instruction(artist: &str) -> Result<String> {
    render("vocalist_artist", context! { artist => artist })
}

pub fn instrument_specific_instruction(description: &str) -> Result<String> {
    render(
        "instrument_specific",
        context! { description => description },
    )
}

pub fn instrument_title_instruction(description: &str) -> Result<String> {
    render("instrument_title", context! { description => description })
}

/// Enrichment instruction around the collected data and the mandatory
/// output template.
pub fn final_prompt_instruction(data: &PromptData) -> Result<String> {
    render("final_prompt", context! { data => data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genr_core::components::{CollectedComponents, PromptComponent};

    #[test]
    fn test_lyrics_instruction_per_language() {
        let id = lyrics_instruction("Senja", &LyricLanguage::Indonesia).unwrap();
        assert!(id.starts_with("Buatkan lirik lagu lengkap dalam Bahasa Indonesia"));
        assert!(id.contains("Baris pertama HANYA berisi judul lagu: \"Senja\""));
        assert!(id.contains("[Verse 1], [Chorus]"));

        let en = lyrics_instruction("Rain", &LyricLanguage::English).unwrap();
        assert!(en.starts_with("Create complete song lyrics in English"));

        let jp = lyrics_instruction("Sakura", &LyricLanguage::JapaneseRomaji).unwrap();
        assert!(jp.contains("exclusively in Romaji"));
        assert!(jp.contains("Ensure the output is exclusively Romaji."));
    }

    #[test]
    fn test_title_is_not_escaped() {
        let text = lyrics_instruction("Rock & <Roll>", &LyricLanguage::English).unwrap();
        assert!(text.contains("\"Rock & <Roll>\""));
    }

    #[test]
    fn test_final_prompt_instruction_instrumental() {
        let data = PromptData::from_components(&CollectedComponents::new());
        let text = final_prompt_instruction(&data).unwrap();
        assert!(text.contains("- Kombinasi Genre & Mood: Tidak ada"));
        assert!(text.contains("Tidak ada lirik"));
        assert!(text.contains("Instruments: Tidak ditentukan\nBahasa: [bahasa lirik dari data],"));
        assert!(text.contains("Music Type: Instrumental (Tidak ada lirik)"));
        assert!(!text.contains("Include these lyrics:\n\n[lirik dari data]"));
    }

    #[test]
    fn test_final_prompt_instruction_with_lyrics() {
        let mut collected = CollectedComponents::new();
        collected.insert(PromptComponent::Lyrics {
            text: "Senja\n\n[Verse 1]\nLangit jingga".into(),
            language: LyricLanguage::Indonesia,
        });
        collected.insert(PromptComponent::Instruments {
            text: "Piano, Biola.".into(),
        });
        let data = PromptData::from_components(&collected);
        let text = final_prompt_instruction(&data).unwrap();
        assert!(text.contains("- Judul Lagu: Senja"));
        assert!(text.contains("- Lirik Lagu:\n[Verse 1]\nLangit jingga"));
        assert!(text.contains("Instruments: Piano, Biola."));
        assert!(text.contains("Include these lyrics:\n\n[lirik dari data]"));
    }

    #[test]
    fn test_instrument_instructions_embed_description() {
        let text = instrument_specific_instruction("cello hangat").unwrap();
        assert!(text.starts_with("User wants an instrument sound described as: \"cello hangat\"."));
        let title = instrument_title_instruction("Warm cello legato").unwrap();
        assert!(title.ends_with("Instrument Description:\nWarm cello legato"));
        let artist = vocalist_artist_instruction("Adele").unwrap();
        assert!(artist.contains("Format jawaban HANYA sebagai berikut: \"Adele, "));
    }
}
