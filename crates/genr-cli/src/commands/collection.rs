use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use colored::Colorize;
use genr_application::SessionGate;
use genr_core::collection::{CollectionKind, SavedItem};

use super::utils::studio;

pub async fn save_music(gate: &SessionGate) -> Result<()> {
    let saved = studio(gate)?.collection.save_music_prompt().await?;
    print_saved(saved.as_ref(), "Belum ada prompt final untuk disimpan.");
    Ok(())
}

pub async fn save_instrument(gate: &SessionGate) -> Result<()> {
    let saved = studio(gate)?.collection.save_instrument_description().await?;
    print_saved(saved.as_ref(), "Belum ada prompt instrumen untuk disimpan.");
    Ok(())
}

fn print_saved(saved: Option<&SavedItem>, missing: &str) {
    match saved {
        Some(item) => println!(
            "💾 {} {}",
            format!("\"{}\" disimpan.", item.title).green(),
            format!("({})", item.id).bright_black()
        ),
        None => println!("⚠️  {}", missing.bright_yellow()),
    }
}

pub async fn list(gate: &SessionGate, kind: CollectionKind) -> Result<()> {
    let items = studio(gate)?.collection.list(kind).await;
    if items.is_empty() {
        println!("{}", format!("Koleksi {} kosong.", kind.label()).bright_black());
        return Ok(());
    }
    for item in items {
        println!(
            "{}  {}  {}",
            item.id.bright_black(),
            item.title.bold(),
            item.timestamp
                .with_timezone(&Local)
                .format("%d %b %Y %H:%M")
                .to_string()
                .bright_black()
        );
    }
    Ok(())
}

pub async fn delete(
    gate: &SessionGate,
    kind: CollectionKind,
    id: &str,
    confirmed: bool,
) -> Result<()> {
    let collection = &studio(gate)?.collection;
    if !confirmed {
        let title = collection
            .list(kind)
            .await
            .into_iter()
            .find(|item| item.id == id)
            .map(|item| item.title)
            .unwrap_or_else(|| id.to_string());
        bail!("Hapus {} \"{}\"? Ulangi dengan --yes untuk konfirmasi.", kind.label(), title);
    }

    match collection.delete_item(kind, id).await? {
        Some(item) => println!("🗑️  {}", format!("\"{}\" dihapus.", item.title).green()),
        None => println!("{}", format!("Item {id} tidak ditemukan.").bright_black()),
    }
    Ok(())
}

pub async fn download(
    gate: &SessionGate,
    kind: CollectionKind,
    id: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let download = studio(gate)?.collection.download(kind, id).await?;
    let path = out.unwrap_or_else(|| PathBuf::from(&download.file_name));
    std::fs::write(&path, &download.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("📥 {}", format!("Diunduh ke {}", path.display()).green());
    Ok(())
}
