//! Persisted "don't show the tutorial again" flag.

use std::sync::Arc;

use crate::error::TourError;
use crate::store::SettingsStore;

/// Settings keys used for tour persistence.
pub mod settings_keys {
    /// Key for the dismissal flag in the settings table.
    pub const TUTORIAL_DISMISSED: &str = "tutorial_dismissed";
    /// Default user ID when the host page doesn't identify one.
    pub const DEFAULT_USER: &str = "default";
}

/// The stored value meaning "dismissed". Anything else reads as not dismissed.
const DISMISSED_VALUE: &str = "true";

/// One user's dismissal flag.
///
/// A one-way latch: the tour only ever writes `"true"`. Clearing it is left to
/// whoever administers the settings store.
#[derive(Clone)]
pub struct DismissalFlag {
    store: Arc<dyn SettingsStore>,
    user_id: String,
}

impl DismissalFlag {
    pub fn new(store: Arc<dyn SettingsStore>, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Read the stored flag, surfacing storage failures.
    pub async fn read(&self) -> Result<bool, TourError> {
        let value = self
            .store
            .get_setting(&self.user_id, settings_keys::TUTORIAL_DISMISSED)
            .await?;
        Ok(matches!(value, Some(serde_json::Value::String(ref s)) if s == DISMISSED_VALUE))
    }

    /// Read the stored flag, treating an unreachable store as "not dismissed".
    pub async fn is_set(&self) -> bool {
        match self.read().await {
            Ok(dismissed) => dismissed,
            Err(e) => {
                tracing::warn!(user = %self.user_id, "Failed to read tutorial dismissal: {}", e);
                false
            }
        }
    }

    /// Persist the flag as dismissed.
    pub async fn latch(&self) -> Result<(), TourError> {
        self.store
            .set_setting(
                &self.user_id,
                settings_keys::TUTORIAL_DISMISSED,
                &serde_json::Value::String(DISMISSED_VALUE.to_string()),
            )
            .await?;
        tracing::info!(user = %self.user_id, "Tutorial dismissed");
        Ok(())
    }
}
