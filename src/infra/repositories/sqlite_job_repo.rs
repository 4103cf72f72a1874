use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{models::job::Job, ports::JobRepository};
use crate::error::AppError;

pub struct SqliteJobRepo {
    pool: SqlitePool,
}

impl SqliteJobRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl JobRepository for SqliteJobRepo {
    async fn create(&self, job: &Job) -> Result<Job, AppError> {
        sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (id, job_type, payload, execute_at, status, error_message, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&job.id).bind(&job.job_type).bind(&job.payload).bind(job.execute_at)
        .bind(&job.status).bind(&job.error_message).bind(job.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    // Flipping the rows to PROCESSING inside the same statement keeps a
    // second worker from picking them up between read and write.
    async fn claim_due(&self, limit: i32) -> Result<Vec<Job>, AppError> {
        sqlx::query_as::<_, Job>(
            "UPDATE jobs SET status = 'PROCESSING'
             WHERE id IN (
                 SELECT id FROM jobs
                 WHERE status = 'PENDING' AND execute_at <= ?
                 ORDER BY execute_at ASC
                 LIMIT ?
             )
             RETURNING *",
        )
        .bind(Utc::now())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError> {
        sqlx::query("UPDATE jobs SET status = ?, error_message = ? WHERE id = ?")
            .bind(status)
            .bind(error_message)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn cancel_pending_for_booking(&self, booking_id: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE jobs SET status = 'CANCELLED'
             WHERE json_extract(payload, '$.booking_id') = ? AND status = 'PENDING'",
        )
        .bind(booking_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }
}
