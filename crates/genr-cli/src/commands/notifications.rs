use anyhow::Result;
use colored::Colorize;
use genr_application::SessionGate;

use super::utils::studio;

/// Lists notifications newest first, or marks them read.
pub async fn run(gate: &SessionGate, read: Option<u64>, read_all: bool) -> Result<()> {
    let center = &studio(gate)?.notifications;

    if read_all {
        let marked = center.mark_all_read().await?;
        println!("✅ {marked} notifikasi ditandai dibaca.");
        return Ok(());
    }
    if let Some(id) = read {
        if center.mark_read(id).await? {
            println!("✅ Notifikasi #{id} ditandai dibaca.");
        } else {
            println!(
                "{}",
                format!("Notifikasi #{id} tidak ada atau sudah dibaca.").bright_black()
            );
        }
        return Ok(());
    }

    let views = center.list().await;
    if views.is_empty() {
        println!("{}", "Tidak ada notifikasi.".bright_black());
        return Ok(());
    }
    println!("🔔 {} belum dibaca", center.unread_count().await);
    for view in views {
        let n = &view.notification;
        let marker = if n.read { " ".normal() } else { "●".bright_yellow() };
        println!(
            "{} #{:<3} {} {}",
            marker,
            n.id,
            n.title.bold(),
            format!("({})", view.time_ago).bright_black()
        );
        println!("        {}", n.message);
    }
    Ok(())
}
