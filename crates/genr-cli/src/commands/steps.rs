use anyhow::Result;
use colored::Colorize;
use genr_application::SessionGate;
use genr_core::components::{LyricLanguage, PromptOrigin};
use genr_core::state::SendOutcome;
use genr_core::workflow::{ComponentKind, StepKind, VocalistRequest};

use super::utils::{print_outcome, studio};

pub async fn lyrics(gate: &SessionGate, title: &str, language: &str) -> Result<()> {
    let language = LyricLanguage::from(language.trim().to_lowercase());
    println!("🎵 Menulis lirik ({})...", language.label());
    let outcome = studio(gate)?.steps.generate_lyrics(title, language).await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn genre_mood(
    gate: &SessionGate,
    genres: Vec<String>,
    mood: Option<String>,
) -> Result<()> {
    let outcome = studio(gate)?.steps.generate_genre_mood(genres, mood).await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn instruments(
    gate: &SessionGate,
    main: Vec<String>,
    additional: Vec<String>,
) -> Result<()> {
    let outcome = studio(gate)?
        .steps
        .generate_instruments(main, additional)
        .await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn vocalist(gate: &SessionGate, request: VocalistRequest) -> Result<()> {
    if let Some(artist) = request.artist() {
        println!("🎤 Menganalisis gaya vokal {}...", artist);
    }
    let outcome = studio(gate)?.steps.generate_vocalist(request).await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn instrument_specific(gate: &SessionGate, description: &str) -> Result<()> {
    let outcome = studio(gate)?
        .steps
        .generate_instrument_specific(description)
        .await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn output(gate: &SessionGate, step: StepKind) -> Result<()> {
    match studio(gate)?.steps.output(step).await {
        Some(outcome) => print_outcome(&outcome),
        None => println!("{}", format!("Belum ada hasil untuk {step}.").bright_black()),
    }
    Ok(())
}

pub async fn send(gate: &SessionGate, kind: ComponentKind) -> Result<()> {
    match studio(gate)?.steps.send(kind).await? {
        SendOutcome::Sent { next } => {
            println!(
                "📨 {}",
                format!("{} dikirim ke Prompt Final.", kind.display_name()).green()
            );
            if let Some(next) = next {
                println!("   Berikutnya: {}", format!("genr {}", next.step()).bright_blue());
            }
        }
        SendOutcome::AlreadySent => println!(
            "{}",
            format!("{} sudah dikirim sebelumnya.", kind.display_name()).bright_black()
        ),
        SendOutcome::NothingToSend => println!(
            "⚠️  {}",
            format!("Tidak ada hasil {} yang bisa dikirim.", kind.display_name()).bright_yellow()
        ),
    }
    Ok(())
}

pub async fn assemble(gate: &SessionGate, show: bool) -> Result<()> {
    let assembler = &studio(gate)?.assembler;
    let prompt = if show {
        match assembler.current().await {
            Some(prompt) => prompt,
            None => {
                println!("{}", "Belum ada prompt final. Jalankan `genr assemble`.".bright_black());
                return Ok(());
            }
        }
    } else {
        println!("🎼 Merangkai prompt final...");
        assembler.assemble().await?
    };

    match prompt.origin {
        PromptOrigin::AiEnriched => println!("{}", "✨ Disempurnakan oleh Mr. GenR".green()),
        PromptOrigin::Fallback => {
            println!("{}", "⚠️  Prompt dasar (AI tidak tersedia)".bright_yellow())
        }
    }
    println!();
    println!("{}", prompt.text);
    Ok(())
}
