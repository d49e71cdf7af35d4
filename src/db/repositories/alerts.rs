use crate::db::models::{Alert, NewAlert};
use crate::error::Error;
use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

/// Alerts repository. Alerts are append-only.
#[derive(Clone)]
pub struct AlertsRepository {
    pool: Arc<SqlitePool>,
}

impl AlertsRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Create a new alert
    pub async fn create(&self, alert: &NewAlert) -> Result<Alert> {
        let result = sqlx::query_as::<_, Alert>(
            r#"
            INSERT INTO alerts (message, severity, alert_type, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, message, severity, alert_type, timestamp
            "#,
        )
        .bind(&alert.message)
        .bind(alert.severity)
        .bind(alert.alert_type)
        .bind(&alert.timestamp)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create alert: {}", e)))?;

        info!(
            "Stored {} {} alert {}: {}",
            result.severity, result.alert_type, result.id, result.message
        );
        Ok(result)
    }

    /// All alerts, newest first
    pub async fn list(&self) -> Result<Vec<Alert>> {
        let result = sqlx::query_as::<_, Alert>(
            r#"
            SELECT id, message, severity, alert_type, timestamp
            FROM alerts
            ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to get alerts: {}", e)))?;

        Ok(result)
    }
}
