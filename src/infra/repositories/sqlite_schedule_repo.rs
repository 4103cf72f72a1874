use crate::domain::{models::schedule::Schedule, ports::ScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteScheduleRepo {
    pool: SqlitePool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn create(&self, schedule: &Schedule) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(
            r#"INSERT INTO schedules (id, tenant_id, tour_id, date, time, max_participants, booked_count, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&schedule.id)
            .bind(&schedule.tenant_id)
            .bind(&schedule.tour_id)
            .bind(schedule.date)
            .bind(&schedule.time)
            .bind(schedule.max_participants)
            .bind(schedule.booked_count)
            .bind(schedule.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_many(&self, schedules: &[Schedule]) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut inserted = 0;
        for schedule in schedules {
            let result = sqlx::query(
                r#"INSERT INTO schedules (id, tenant_id, tour_id, date, time, max_participants, booked_count, created_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                   ON CONFLICT(tour_id, date, time) DO NOTHING"#
            )
                .bind(&schedule.id)
                .bind(&schedule.tenant_id)
                .bind(&schedule.tour_id)
                .bind(schedule.date)
                .bind(&schedule.time)
                .bind(schedule.max_participants)
                .bind(schedule.booked_count)
                .bind(schedule.created_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            inserted += result.rows_affected() as i64;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(inserted)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Schedule>, AppError> {
        sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE tenant_id = ? AND id = ?",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slot(&self, tour_id: &str, date: NaiveDate, time: &str) -> Result<Option<Schedule>, AppError> {
        sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE tour_id = ? AND date = ? AND time = ?",
        )
            .bind(tour_id)
            .bind(date)
            .bind(time)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_range(&self, tour_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Schedule>, AppError> {
        sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE tour_id = ? AND date >= ? AND date <= ? ORDER BY date ASC, time ASC",
        )
            .bind(tour_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, schedule: &Schedule) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(
            "UPDATE schedules SET date=?, time=?, max_participants=? WHERE id=? AND tenant_id=? RETURNING *"
        )
            .bind(schedule.date)
            .bind(&schedule.time)
            .bind(schedule.max_participants)
            .bind(&schedule.id)
            .bind(&schedule.tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Schedule not found".into()));
        }
        Ok(())
    }
}
