use anyhow::Result;
use colored::Colorize;
use genr_application::SessionGate;
use genr_core::preferences::ProfilePictureChange;

use super::utils::studio;

pub async fn profile_picture(gate: &SessionGate, url: Option<&str>) -> Result<()> {
    let preferences = &studio(gate)?.preferences;
    let Some(url) = url else {
        println!("🖼️  {}", preferences.profile_picture().await);
        return Ok(());
    };
    match preferences.set_profile_picture(url).await? {
        ProfilePictureChange::Updated => {
            println!("✅ {}", "Gambar profil diperbarui.".green())
        }
        ProfilePictureChange::Reset => {
            println!("✅ {}", "Gambar profil direset ke default.".green())
        }
    }
    Ok(())
}

pub async fn sidebar(gate: &SessionGate) -> Result<()> {
    let collapsed = studio(gate)?.preferences.toggle_sidebar().await?;
    let label = if collapsed { "diciutkan" } else { "dibentangkan" };
    println!("Sidebar {label}.");
    Ok(())
}
