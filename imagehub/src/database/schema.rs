//! Database schema and migrations
//!
//! This module handles database initialization and schema migrations.
//! Uses SQLite with WAL mode for crash safety.

use crate::error::{HubError, Result};
use sqlx::{sqlite::SqlitePool, Row};

/// Initialize database with schema
///
/// Safe to call on an already initialized database: only migrations newer
/// than the recorded version are applied.
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    tracing::info!("Initializing database schema");

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await
        .map_err(HubError::StorageUnavailable)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(HubError::StorageUnavailable)?;

    let current_version: i32 = sqlx::query("SELECT COALESCE(MAX(version), 0) FROM migrations")
        .fetch_one(pool)
        .await
        .map_err(HubError::StorageUnavailable)?
        .get(0);

    tracing::info!("Current database version: {}", current_version);

    apply_migrations(pool, current_version)
        .await
        .map_err(HubError::StorageUnavailable)?;

    tracing::info!("Database initialization complete");
    Ok(())
}

async fn apply_migrations(
    pool: &SqlitePool,
    current_version: i32,
) -> std::result::Result<(), sqlx::Error> {
    for (version, sql) in get_migrations() {
        if version <= current_version {
            continue;
        }

        tracing::info!("Applying migration version {}", version);

        let mut tx = pool.begin().await?;

        for statement in sql.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query("INSERT INTO migrations (version) VALUES (?)")
            .bind(version)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("Migration version {} applied successfully", version);
    }

    Ok(())
}

fn get_migrations() -> Vec<(i32, &'static str)> {
    vec![(1, include_str!("migrations/001_initial_schema.sql"))]
}
