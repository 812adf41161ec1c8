//! libSQL backend: async `SettingsStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::SettingsStore;

/// Settings store on a single libSQL connection.
pub struct LibSqlBackend {
    // Held for the lifetime of `conn`.
    _db: LibSqlDatabase,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) the database file, creating its directory first.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("create {}: {e}", parent.display()))
            })?;
        }
        let backend = Self::open(path).await?;
        info!(path = %path.display(), "Settings database opened");
        Ok(backend)
    }

    /// A throwaway in-memory database.
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        Self::open(":memory:").await
    }

    async fn open(target: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(target)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("open database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("connect: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self { _db: db, conn })
    }
}

#[async_trait]
impl SettingsStore for LibSqlBackend {
    async fn get_setting(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT value FROM settings WHERE user_id = ?1 AND key = ?2",
                params![user_id, key],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_setting: {e}")))?;

        let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("get_setting: {e}")))?
        else {
            return Ok(None);
        };

        let raw: String = row
            .get(0)
            .map_err(|e| DatabaseError::Query(format!("get_setting {user_id}/{key}: {e}")))?;
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            DatabaseError::Serialization(format!("setting {user_id}/{key} is not JSON: {e}"))
        })
    }

    async fn set_setting(
        &self,
        user_id: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO settings (user_id, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (user_id, key) DO UPDATE SET value = ?3, updated_at = ?4",
                params![user_id, key, value_str, now],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("set_setting: {e}")))?;
        Ok(())
    }

    async fn delete_setting(&self, user_id: &str, key: &str) -> Result<bool, DatabaseError> {
        let count = self
            .conn
            .execute(
                "DELETE FROM settings WHERE user_id = ?1 AND key = ?2",
                params![user_id, key],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("delete_setting: {e}")))?;
        Ok(count > 0)
    }
}
