use anyhow::Result;
use sqlx::{Executor, SqlitePool};
use tracing::debug;

use crate::error::Error;

/// Schema files in application order. Every statement is create-if-absent.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_cameras.sql",
        include_str!("sql/001_create_cameras.sql"),
    ),
    (
        "002_create_alerts.sql",
        include_str!("sql/002_create_alerts.sql"),
    ),
];

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    for (name, sql) in MIGRATIONS {
        execute_migration(pool, name, sql).await?;
    }

    Ok(())
}

async fn execute_migration(pool: &SqlitePool, name: &str, sql: &str) -> Result<()> {
    pool.execute(sql)
        .await
        .map_err(|e| Error::Database(format!("Failed to apply migration {}: {}", name, e)))?;

    debug!("Applied migration: {}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn migrations_are_idempotent() -> Result<()> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        run_migrations(&pool).await?;
        run_migrations(&pool).await?;

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('cameras', 'alerts') ORDER BY name",
        )
        .fetch_all(&pool)
        .await?;
        assert_eq!(tables, vec!["alerts".to_string(), "cameras".to_string()]);

        Ok(())
    }
}
