use crate::{
    db::models::{Camera, CameraUpdate, NewCamera},
    error::Error,
};
use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

/// Cameras repository for handling camera operations
#[derive(Clone)]
pub struct CamerasRepository {
    pool: Arc<SqlitePool>,
}

impl CamerasRepository {
    /// Create a new cameras repository
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Create a new camera
    pub async fn create(&self, camera: &NewCamera) -> Result<Camera> {
        info!("Creating new camera: {}", camera.name);

        let result = sqlx::query_as::<_, Camera>(
            r#"
            INSERT INTO cameras (name, stream_url, location)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, stream_url, location
            "#,
        )
        .bind(&camera.name)
        .bind(&camera.stream_url)
        .bind(&camera.location)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create camera: {}", e)))?;

        Ok(result)
    }

    /// Get camera by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Camera>> {
        let result = sqlx::query_as::<_, Camera>(
            r#"
            SELECT id, name, stream_url, location
            FROM cameras
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to get camera by ID: {}", e)))?;

        Ok(result)
    }

    /// Get one page of cameras in storage order
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Camera>> {
        let result = sqlx::query_as::<_, Camera>(
            r#"
            SELECT id, name, stream_url, location
            FROM cameras
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to list cameras: {}", e)))?;

        Ok(result)
    }

    /// Apply the present fields of `update` in one statement.
    ///
    /// Returns the number of rows touched; zero when `id` is unknown.
    pub async fn update(&self, id: i64, update: &CameraUpdate) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE cameras
            SET name = COALESCE(?1, name),
                stream_url = COALESCE(?2, stream_url),
                location = COALESCE(?3, location)
            WHERE id = ?4
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.stream_url.as_deref())
        .bind(update.location.as_deref())
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to update camera: {}", e)))?;

        debug!("Updated camera {} ({} rows)", id, result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Delete camera
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM cameras
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to delete camera: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
