use crate::domain::{models::tour::Tour, ports::TourRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTourRepo {
    pool: PgPool,
}

impl PostgresTourRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourRepository for PostgresTourRepo {
    async fn create(&self, tour: &Tour) -> Result<Tour, AppError> {
        sqlx::query_as::<_, Tour>(
            r#"INSERT INTO tours (
                id, tenant_id, slug, name, description, location, timezone,
                base_price, duration_min, max_participants, available_weekdays,
                departure_times, active, image_url, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
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
            "SELECT * FROM tours WHERE tenant_id = $1 AND slug = $2",
        )
            .bind(tenant_id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Tour>, AppError> {
        sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours WHERE tenant_id = $1 AND id = $2",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Tour>, AppError> {
        sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours WHERE tenant_id = $1 ORDER BY name ASC",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, tour: &Tour) -> Result<Tour, AppError> {
        sqlx::query_as::<_, Tour>(
            r#"UPDATE tours SET
                slug=$1, name=$2, description=$3, location=$4, timezone=$5,
                base_price=$6, duration_min=$7, max_participants=$8,
                available_weekdays=$9, departure_times=$10, active=$11, image_url=$12
               WHERE id=$13 AND tenant_id=$14 RETURNING *"#
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
        let result = sqlx::query("DELETE FROM tours WHERE id = $1 AND tenant_id = $2")
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
