//! In-memory settings store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::DatabaseError;
use crate::store::traits::SettingsStore;

/// Settings kept in a map for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    settings: RwLock<HashMap<(String, String), serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_setting(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DatabaseError> {
        let settings = self.settings.read().await;
        Ok(settings
            .get(&(user_id.to_string(), key.to_string()))
            .cloned())
    }

    async fn set_setting(
        &self,
        user_id: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), DatabaseError> {
        let mut settings = self.settings.write().await;
        settings.insert((user_id.to_string(), key.to_string()), value.clone());
        Ok(())
    }

    async fn delete_setting(&self, user_id: &str, key: &str) -> Result<bool, DatabaseError> {
        let mut settings = self.settings.write().await;
        Ok(settings
            .remove(&(user_id.to_string(), key.to_string()))
            .is_some())
    }
}
