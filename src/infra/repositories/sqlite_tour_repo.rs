use crate::domain::{models::tour::Tour, ports::TourRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTourRepo {
    pool: SqlitePool,
}

impl SqliteTourRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourRepository for SqliteTourRepo {
    async fn create(&self, tour: &Tour) -> Result<Tour, AppError> {
        sqlx::query_as::<_, Tour>(
            r#"INSERT INTO tours (
                id, tenant_id, slug, name, description, location, timezone,
                base_price, duration_min, max_participants, available_weekdays,
                departure_times, active, image_url, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&tour.id)
            .bind(&tour.tenant_id)
            .bind(&tour.slug)
            .bind(&tour.name)
            .bind(&tour.description)
            .bind(&tour.location)
            .bind(&tour.timezone)
            .bind(&tour.base_price)
            .bind(tour.duration_min)
            .bind(tour.max_participants)
            .bind(&tour.available_weekdays)
            .bind(&tour.departure_times)
            .bind(tour.active)
            .bind(&tour.image_url)
            .bind(tour.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, tenant_id: &str, slug: &str) -> Result<Option<Tour>, AppError> {
        sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours WHERE tenant_id = ? AND slug = ?",
        )
            .bind(tenant_id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Tour>, AppError> {
        sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours WHERE tenant_id = ? AND id = ?",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Tour>, AppError> {
        sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours WHERE tenant_id = ? ORDER BY name ASC",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, tour: &Tour) -> Result<Tour, AppError> {
        sqlx::query_as::<_, Tour>(
            r#"UPDATE tours SET
                slug=?, name=?, description=?, location=?, timezone=?,
                base_price=?, duration_min=?, max_participants=?,
                available_weekdays=?, departure_times=?, active=?, image_url=?
               WHERE id=? AND tenant_id=? RETURNING *"#
        )
            .bind(&tour.slug)
            .bind(&tour.name)
            .bind(&tour.description)
            .bind(&tour.location)
            .bind(&tour.timezone)
            .bind(&tour.base_price)
            .bind(tour.duration_min)
            .bind(tour.max_participants)
            .bind(&tour.available_weekdays)
            .bind(&tour.departure_times)
            .bind(tour.active)
            .bind(&tour.image_url)
            .bind(&tour.id)
            .bind(&tour.tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tours WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tour not found".into()));
        }
        Ok(())
    }
}
