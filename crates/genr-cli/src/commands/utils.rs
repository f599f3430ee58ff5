use anyhow::{Result, bail};
use colored::Colorize;
use genr_application::{SessionGate, Studio};
use genr_core::workflow::StepOutcome;

/// The logged-in studio, or a hint to log in first.
pub fn studio(gate: &SessionGate) -> Result<&Studio> {
    if gate.is_locked() {
        bail!("Belum login. Jalankan `genr login <username> --password <password>` dulu.");
    }
    Ok(gate.studio()?)
}

pub fn print_outcome(outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Success(text) => {
            println!("{}", "✅ Berhasil".green());
            println!("{text}");
        }
        StepOutcome::ValidationError(text) => println!("⚠️  {}", text.bright_yellow()),
        StepOutcome::ServiceError(text) => println!("❌ {}", text.red()),
    }
}
