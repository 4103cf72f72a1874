use crate::domain::{models::pricing_tier::PricingTier, ports::PricingTierRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPricingTierRepo {
    pool: PgPool,
}

impl PostgresPricingTierRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingTierRepository for PostgresPricingTierRepo {
    async fn create(&self, tier: &PricingTier) -> Result<PricingTier, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        // Only one default tier per tour.
        if tier.is_default {
            sqlx::query("UPDATE pricing_tiers SET is_default = FALSE WHERE tour_id = $1")
                .bind(&tier.tour_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }
        let created = sqlx::query_as::<_, PricingTier>(
            r#"INSERT INTO pricing_tiers (
                id, tenant_id, tour_id, name, label, price, min_age, max_age,
                min_quantity, max_quantity, counts_toward_capacity, is_default, active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *"#
        )
            .bind(&tier.id)
            .bind(&tier.tenant_id)
            .bind(&tier.tour_id)
            .bind(&tier.name)
            .bind(&tier.label)
            .bind(&tier.price)
            .bind(tier.min_age)
            .bind(tier.max_age)
            .bind(tier.min_quantity)
            .bind(tier.max_quantity)
            .bind(tier.counts_toward_capacity)
            .bind(tier.is_default)
            .bind(tier.active)
            .bind(tier.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<PricingTier>, AppError> {
        sqlx::query_as::<_, PricingTier>(
            "SELECT * FROM pricing_tiers WHERE tenant_id = $1 AND id = $2",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<PricingTier>, AppError> {
        sqlx::query_as::<_, PricingTier>(
            "SELECT * FROM pricing_tiers WHERE tour_id = $1 ORDER BY created_at ASC",
        )
            .bind(tour_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, tier: &PricingTier) -> Result<PricingTier, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        if tier.is_default {
            sqlx::query("UPDATE pricing_tiers SET is_default = FALSE WHERE tour_id = $1 AND id != $2")
                .bind(&tier.tour_id)
                .bind(&tier.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }
        let updated = sqlx::query_as::<_, PricingTier>(
            r#"UPDATE pricing_tiers SET
                name=$1, label=$2, price=$3, min_age=$4, max_age=$5, min_quantity=$6,
                max_quantity=$7, counts_toward_capacity=$8, is_default=$9, active=$10
               WHERE id=$11 AND tenant_id=$12 RETURNING *"#
        )
            .bind(&tier.name)
            .bind(&tier.label)
            .bind(&tier.price)
            .bind(tier.min_age)
            .bind(tier.max_age)
            .bind(tier.min_quantity)
            .bind(tier.max_quantity)
            .bind(tier.counts_toward_capacity)
            .bind(tier.is_default)
            .bind(tier.active)
            .bind(&tier.id)
            .bind(&tier.tenant_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pricing_tiers WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pricing tier not found".into()));
        }
        Ok(())
    }
}
