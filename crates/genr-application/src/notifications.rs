//! The notification bell and panel.

use std::sync::Arc;

use chrono::Utc;
use genr_core::error::Result;
use genr_core::notification::{Notice, Notification, format_time_ago};

use crate::workbench::Workbench;

/// A notification as the panel lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub notification: Notification,
    pub time_ago: String,
}

pub struct NotificationCenter {
    workbench: Arc<Workbench>,
}

impl NotificationCenter {
    pub fn new(workbench: Arc<Workbench>) -> Self {
        Self { workbench }
    }

    /// Adds an unread notification. Returns whether the bell should pulse.
    pub async fn add(&self, title: &str, message: &str) -> Result<bool> {
        self.workbench.notify(Notice::new(title, message)).await
    }

    /// Marks one notification read, persisting only when it changed.
    pub async fn mark_read(&self, id: u64) -> Result<bool> {
        let unread = self
            .workbench
            .read(|state| state.notifications.iter().any(|n| n.id == id && !n.read))
            .await;
        if !unread {
            return Ok(false);
        }
        self.workbench
            .update(|state| state.mark_notification_read(id))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<usize> {
        self.workbench
            .update(|state| state.mark_all_notifications_read())
            .await
    }

    /// Opens or closes the panel. Not persisted.
    pub fn toggle_panel(&self) -> bool {
        self.workbench.toggle_panel()
    }

    pub async fn unread_count(&self) -> usize {
        self.workbench
            .read(|state| state.unread_notifications())
            .await
    }

    /// Newest first, with relative times as of now.
    pub async fn list(&self) -> Vec<NotificationView> {
        let now = Utc::now();
        self.workbench
            .read(|state| {
                state
                    .notifications
                    .iter()
                    .map(|n| NotificationView {
                        notification: n.clone(),
                        time_ago: format_time_ago(n.timestamp, now),
                    })
                    .collect()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::workbench;

    #[tokio::test]
    async fn test_add_and_read() {
        let workbench = workbench();
        let center = NotificationCenter::new(workbench.clone());

        assert!(center.add("Halo", "Pesan pertama").await.unwrap());
        assert!(center.toggle_panel());
        assert!(!center.add("Halo lagi", "Pesan kedua").await.unwrap());
        assert_eq!(center.unread_count().await, 2);

        let list = center.list().await;
        assert_eq!(list[0].notification.id, 2);
        assert_eq!(list[0].time_ago, "Baru saja");

        assert!(center.mark_read(1).await.unwrap());
        assert!(!center.mark_read(1).await.unwrap());
        assert!(!center.mark_read(42).await.unwrap());
        assert_eq!(center.mark_all_read().await.unwrap(), 1);
        assert_eq!(center.unread_count().await, 0);
    }
}
