use crate::domain::{models::pricing_tier::PricingTier, ports::PricingTierRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePricingTierRepo {
    pool: SqlitePool,
}

impl SqlitePricingTierRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingTierRepository for SqlitePricingTierRepo {
    async fn create(&self, tier: &PricingTier) -> Result<PricingTier, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        // Only one default tier per tour.
        if tier.is_default {
            sqlx::query("UPDATE pricing_tiers SET is_default = 0 WHERE tour_id = ?")
                .bind(&tier.tour_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }
        let created = sqlx::query_as::<_, PricingTier>(
            r#"INSERT INTO pricing_tiers (
                id, tenant_id, tour_id, name, label, price, min_age, max_age,
                min_quantity, max_quantity, counts_toward_capacity, is_default, active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
            "SELECT * FROM pricing_tiers WHERE tenant_id = ? AND id = ?",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tour(&self, tour_id: &str) -> Result<Vec<PricingTier>, AppError> {
        sqlx::query_as::<_, PricingTier>(
            "SELECT * FROM pricing_tiers WHERE tour_id = ? ORDER BY created_at ASC",
        )
            .bind(tour_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, tier: &PricingTier) -> Result<PricingTier, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        if tier.is_default {
            sqlx::query("UPDATE pricing_tiers SET is_default = 0 WHERE tour_id = ? AND id != ?")
                .bind(&tier.tour_id)
                .bind(&tier.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }
        let updated = sqlx::query_as::<_, PricingTier>(
            r#"UPDATE pricing_tiers SET
                name=?, label=?, price=?, min_age=?, max_age=?, min_quantity=?,
                max_quantity=?, counts_toward_capacity=?, is_default=?, active=?
               WHERE id=? AND tenant_id=? RETURNING *"#
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
        let result = sqlx::query("DELETE FROM pricing_tiers WHERE id = ? AND tenant_id = ?")
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
