use crate::domain::{models::variant::TourVariant, ports::VariantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteVariantRepo {
    pool: SqlitePool,
}

impl SqliteVariantRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VariantRepository for SqliteVariantRepo {
    async fn create(&self, variant: &TourVariant) -> Result<TourVariant, AppError> {
        sqlx::query_as::<_, TourVariant>(
            r#"INSERT INTO tour_variants (
                id, tenant_id, tour_id, name, description, modifier_kind, modifier_value,
                duration_min, max_participants, available_weekdays, active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&variant.id)
            .bind(&variant.tenant_id)
            .bind(&variant.tour_id)
            .bind(&variant.name)
            .bind(&variant.description)
            .bind(&variant.modifier_kind)
            .bind(&variant.modifier_value)
            .bind(variant.duration_min)
            .bind(variant.max_participants)
            .bind(&variant.available_weekdays)
            .bind(variant.active)
            .bind(variant.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<TourVariant>, AppError> {
        sqlx::query_as::<_, TourVariant>(
            "SELECT * FROM tour_variants WHERE tenant_id = ? AND id = ?",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<TourVariant>, AppError> {
        sqlx::query_as::<_, TourVariant>(
            "SELECT * FROM tour_variants WHERE tour_id = ? ORDER BY created_at ASC",
        )
            .bind(tour_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, variant: &TourVariant) -> Result<TourVariant, AppError> {
        sqlx::query_as::<_, TourVariant>(
            r#"UPDATE tour_variants SET
                name=?, description=?, modifier_kind=?, modifier_value=?,
                duration_min=?, max_participants=?, available_weekdays=?, active=?
               WHERE id=? AND tenant_id=? RETURNING *"#
        )
            .bind(&variant.name)
            .bind(&variant.description)
            .bind(&variant.modifier_kind)
            .bind(&variant.modifier_value)
            .bind(variant.duration_min)
            .bind(variant.max_participants)
            .bind(&variant.available_weekdays)
            .bind(variant.active)
            .bind(&variant.id)
            .bind(&variant.tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tour_variants WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Variant not found".into()));
        }
        Ok(())
    }
}
