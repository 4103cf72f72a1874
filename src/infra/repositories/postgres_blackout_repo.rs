use crate::domain::{models::blackout::BlackoutDate, ports::BlackoutRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresBlackoutRepo {
    pool: PgPool,
}

impl PostgresBlackoutRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl BlackoutRepository for PostgresBlackoutRepo {
    async fn upsert(&self, blackout: &BlackoutDate) -> Result<BlackoutDate, AppError> {
        sqlx::query_as::<_, BlackoutDate>(
            r#"INSERT INTO blackout_dates (id, tenant_id, tour_id, date, reason, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               ON CONFLICT (tour_id, date) DO UPDATE SET
               reason=excluded.reason
               RETURNING *"#
        )
            .bind(&blackout.id)
            .bind(&blackout.tenant_id)
            .bind(&blackout.tour_id)
            .bind(blackout.date)
            .bind(&blackout.reason)
            .bind(blackout.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_date(&self, tour_id: &str, date: NaiveDate) -> Result<Option<BlackoutDate>, AppError> {
        sqlx::query_as::<_, BlackoutDate>(
            "SELECT * FROM blackout_dates WHERE tour_id = $1 AND date = $2"
        )
            .bind(tour_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_range(&self, tour_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<BlackoutDate>, AppError> {
        sqlx::query_as::<_, BlackoutDate>(
            "SELECT * FROM blackout_dates WHERE tour_id = $1 AND date >= $2 AND date <= $3"
        )
            .bind(tour_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<BlackoutDate>, AppError> {
        sqlx::query_as::<_, BlackoutDate>(
            "SELECT * FROM blackout_dates WHERE tour_id = $1 ORDER BY date ASC"
        )
            .bind(tour_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, tour_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM blackout_dates WHERE tour_id = $1 AND date = $2")
            .bind(tour_id)
            .bind(date)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Blackout date not found".into()));
        }
        Ok(())
    }
}
