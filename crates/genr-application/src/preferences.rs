//! Profile picture and sidebar preferences.

use std::sync::Arc;

use chrono::Utc;
use genr_core::error::Result;
use genr_core::notification::Notice;
use genr_core::preferences::ProfilePictureChange;

use crate::workbench::Workbench;

pub struct Preferences {
    workbench: Arc<Workbench>,
}

impl Preferences {
    pub fn new(workbench: Arc<Workbench>) -> Self {
        Self { workbench }
    }

    /// Changes the profile picture. An invalid URL is rejected without
    /// touching the state.
    pub async fn set_profile_picture(&self, url: &str) -> Result<ProfilePictureChange> {
        self.workbench
            .update(|state| {
                let change = state.set_profile_picture(url)?;
                let notice = match change {
                    ProfilePictureChange::Updated => Notice::profile_picture_updated(),
                    ProfilePictureChange::Reset => Notice::profile_picture_reset(),
                };
                state.push_notification(notice, Utc::now());
                Ok(change)
            })
            .await?
    }

    /// Collapses or expands the sidebar and returns the new collapsed flag.
    pub async fn toggle_sidebar(&self) -> Result<bool> {
        self.workbench.update(|state| state.toggle_sidebar()).await
    }

    pub async fn profile_picture(&self) -> String {
        self.workbench
            .read(|state| state.profile_pic_url.clone())
            .await
    }
}
