//! `SettingsStore` trait: per-user key/value persistence.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// Backend-agnostic settings storage, scoped by user id.
///
/// Values are JSON so callers can store whatever shape they need.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a setting. `None` if it was never written.
    async fn get_setting(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DatabaseError>;

    /// Insert or overwrite a setting.
    async fn set_setting(
        &self,
        user_id: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), DatabaseError>;

    /// Remove a setting. Returns whether anything was deleted.
    async fn delete_setting(&self, user_id: &str, key: &str) -> Result<bool, DatabaseError>;
}
