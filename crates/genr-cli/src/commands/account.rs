use anyhow::Result;
use colored::Colorize;
use genr_application::SessionGate;
use genr_core::collection::CollectionKind;
use genr_core::workflow::StepKind;
use strum::IntoEnumIterator;

pub async fn register(gate: &SessionGate, username: &str, password: &str) -> Result<()> {
    let message = gate.register(username, password).await?;
    println!("✅ {}", message.green());
    Ok(())
}

pub async fn login(gate: &mut SessionGate, username: &str, password: &str) -> Result<()> {
    let outcome = gate.login(username, password).await?;
    println!(
        "✅ {}",
        format!("Selamat datang kembali, {}!", outcome.username).green()
    );
    if let Some(greeting) = outcome.greeting {
        println!("{} {}", "Mr. GenR:".bright_magenta(), greeting);
    }
    Ok(())
}

pub async fn logout(gate: &mut SessionGate) -> Result<()> {
    match gate.logout().await? {
        Some(username) => println!("👋 {} telah logout.", username.bright_blue()),
        None => println!("{}", "Tidak ada sesi aktif.".bright_black()),
    }
    Ok(())
}

/// Dashboard view: one line per step card plus the collected components.
pub async fn status(gate: &SessionGate) -> Result<()> {
    let Some(username) = gate.current_user() else {
        println!("🔒 {}", "Studio terkunci. Silakan login.".bright_black());
        return Ok(());
    };
    let state = gate.studio()?.snapshot().await;

    println!("👤 {}", username.bright_blue());
    println!();
    for kind in StepKind::iter() {
        let card = state.card(kind);
        let sent = if card.sent {
            "terkirim".green()
        } else {
            "-".bright_black()
        };
        println!(
            "  {:<20} {:>3}x  {:>3}%  {}",
            kind.to_string(),
            card.count,
            card.progress_percent,
            sent
        );
    }

    println!();
    if state.collected.is_empty() {
        println!("{}", "Belum ada komponen untuk Prompt Final.".bright_black());
    } else {
        println!("{}", "Komponen Prompt Final:".bright_blue());
        for component in state.collected.iter() {
            println!("  • {}", component.label());
        }
    }
    if state.final_music_prompt.is_some() {
        println!("🎼 Prompt final tersedia (`genr assemble --show`).");
    }

    println!();
    println!(
        "🔔 {} belum dibaca  💾 {} musik, {} instrumen tersimpan",
        state.unread_notifications(),
        state.saved_items(CollectionKind::Music).len(),
        state.saved_items(CollectionKind::Instrument).len()
    );
    Ok(())
}
