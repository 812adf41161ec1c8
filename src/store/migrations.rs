//! Version-tracked database migrations for the libSQL backend.
//!
//! The schema version is the highest row in `_migrations`; anything above it
//! in `MIGRATIONS` is applied in order.

use libsql::Connection;

use crate::error::DatabaseError;

/// A single migration step.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. Add new versions to the end.
static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "settings",
        sql: r#"
            CREATE TABLE IF NOT EXISTS settings (
                user_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (user_id, key)
            );
        "#,
    },
    Migration {
        version: 2,
        name: "settings_key_index",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_settings_key ON settings(key);
        "#,
    },
];

const MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

fn migration_error(context: &str, e: libsql::Error) -> DatabaseError {
    DatabaseError::Migration(format!("{context}: {e}"))
}

/// Bring the schema up to the latest version.
///
/// Each pending migration runs in its own transaction together with its
/// `_migrations` record, so a failed step leaves the version unchanged.
pub async fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(MIGRATIONS_TABLE, ())
        .await
        .map_err(|e| migration_error("create _migrations", e))?;

    let applied = applied_version(conn).await?;
    let mut version = applied;
    for migration in MIGRATIONS.iter().filter(|m| m.version > applied) {
        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        apply(conn, migration).await?;
        version = migration.version;
    }

    tracing::debug!(from = applied, to = version, "Database schema up to date");
    Ok(())
}

async fn apply(conn: &Connection, migration: &Migration) -> Result<(), DatabaseError> {
    let context = format!("V{} ({})", migration.version, migration.name);
    let tx = conn
        .transaction()
        .await
        .map_err(|e| migration_error(&context, e))?;
    tx.execute_batch(migration.sql)
        .await
        .map_err(|e| migration_error(&context, e))?;
    tx.execute(
        "INSERT INTO _migrations (version, name) VALUES (?1, ?2)",
        libsql::params![migration.version, migration.name],
    )
    .await
    .map_err(|e| migration_error(&context, e))?;
    tx.commit().await.map_err(|e| migration_error(&context, e))
}

/// Highest applied version, 0 on a fresh database.
async fn applied_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM _migrations", ())
        .await
        .map_err(|e| migration_error("read schema version", e))?;
    let Some(row) = rows
        .next()
        .await
        .map_err(|e| migration_error("read schema version", e))?
    else {
        return Ok(0);
    };
    row.get::<i64>(0)
        .map_err(|e| migration_error("read schema version", e))
}
