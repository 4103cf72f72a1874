use crate::domain::{models::variant::TourVariant, ports::VariantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresVariantRepo {
    pool: PgPool,
}

impl PostgresVariantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VariantRepository for PostgresVariantRepo {
    async fn create(&self, variant: &TourVariant) -> Result<TourVariant, AppError> {
        sqlx::query_as::<_, TourVariant>(
            r#"INSERT INTO tour_variants (
                id, tenant_id, tour_id, name, description, modifier_kind, modifier_value,
                duration_min, max_participants, available_weekdays, active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
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
            "SELECT * FROM tour_variants WHERE tenant_id = $1 AND id = $2",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<TourVariant>, AppError> {
        sqlx::query_as::<_, TourVariant>(
            "SELECT * FROM tour_variants WHERE tour_id = $1 ORDER BY created_at ASC",
        )
            .bind(tour_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, variant: &TourVariant) -> Result<TourVariant, AppError> {
        sqlx::query_as::<_, TourVariant>(
            r#"UPDATE tour_variants SET
                name=$1, description=$2, modifier_kind=$3, modifier_value=$4,
                duration_min=$5, max_participants=$6, available_weekdays=$7, active=$8
               WHERE id=$9 AND tenant_id=$10 RETURNING *"#
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
        let result = sqlx::query("DELETE FROM tour_variants WHERE id = $1 AND tenant_id = $2")
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
