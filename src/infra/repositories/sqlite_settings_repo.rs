use crate::domain::{models::settings::OrganizationSettings, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
}

impl SqliteSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepo {
    async fn get_or_create(&self, tenant_id: &str) -> Result<OrganizationSettings, AppError> {
        let existing = sqlx::query_as::<_, OrganizationSettings>(
            "SELECT * FROM organization_settings WHERE tenant_id = ?"
        )
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if let Some(settings) = existing {
            return Ok(settings);
        }

        let defaults = OrganizationSettings::with_defaults(tenant_id.to_string());
        // DO NOTHING keeps a concurrent first access from failing; the
        // re-select below returns whichever row won.
        sqlx::query(
            r#"INSERT INTO organization_settings (
                id, tenant_id, payment_methods, allow_online_payment, allow_partial_payment,
                payment_link_expiry_hours, payment_reminder_hours, refund_deadline_hours,
                auto_refund, tax_enabled, tax_name, tax_rate, prices_include_tax,
                deposit_enabled, deposit_type, deposit_amount, deposit_due_days, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(tenant_id) DO NOTHING"#
        )
            .bind(&defaults.id)
            .bind(&defaults.tenant_id)
            .bind(&defaults.payment_methods)
            .bind(defaults.allow_online_payment)
            .bind(defaults.allow_partial_payment)
            .bind(defaults.payment_link_expiry_hours)
            .bind(defaults.payment_reminder_hours)
            .bind(defaults.refund_deadline_hours)
            .bind(defaults.auto_refund)
            .bind(defaults.tax_enabled)
            .bind(&defaults.tax_name)
            .bind(&defaults.tax_rate)
            .bind(defaults.prices_include_tax)
            .bind(defaults.deposit_enabled)
            .bind(&defaults.deposit_type)
            .bind(&defaults.deposit_amount)
            .bind(defaults.deposit_due_days)
            .bind(defaults.updated_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        sqlx::query_as::<_, OrganizationSettings>(
            "SELECT * FROM organization_settings WHERE tenant_id = ?"
        )
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, settings: &OrganizationSettings) -> Result<OrganizationSettings, AppError> {
        sqlx::query_as::<_, OrganizationSettings>(
            r#"UPDATE organization_settings SET
                payment_methods=?, allow_online_payment=?, allow_partial_payment=?,
                payment_link_expiry_hours=?, payment_reminder_hours=?, refund_deadline_hours=?,
                auto_refund=?, tax_enabled=?, tax_name=?, tax_rate=?, prices_include_tax=?,
                deposit_enabled=?, deposit_type=?, deposit_amount=?, deposit_due_days=?, updated_at=?
               WHERE tenant_id=? RETURNING *"#
        )
            .bind(&settings.payment_methods)
            .bind(settings.allow_online_payment)
            .bind(settings.allow_partial_payment)
            .bind(settings.payment_link_expiry_hours)
            .bind(settings.payment_reminder_hours)
            .bind(settings.refund_deadline_hours)
            .bind(settings.auto_refund)
            .bind(settings.tax_enabled)
            .bind(&settings.tax_name)
            .bind(&settings.tax_rate)
            .bind(settings.prices_include_tax)
            .bind(settings.deposit_enabled)
            .bind(&settings.deposit_type)
            .bind(&settings.deposit_amount)
            .bind(settings.deposit_due_days)
            .bind(settings.updated_at)
            .bind(&settings.tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
