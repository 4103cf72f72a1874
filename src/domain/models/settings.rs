use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct OrganizationSettings {
    pub id: String,
    pub tenant_id: String,
    pub payment_methods: String,
    pub allow_online_payment: bool,
    pub allow_partial_payment: bool,
    pub payment_link_expiry_hours: i32,
    pub payment_reminder_hours: i32,
    pub refund_deadline_hours: i32,
    pub auto_refund: bool,
    pub tax_enabled: bool,
    pub tax_name: String,
    pub tax_rate: String,
    pub prices_include_tax: bool,
    pub deposit_enabled: bool,
    pub deposit_type: String,
    pub deposit_amount: String,
    pub deposit_due_days: i32,
    pub updated_at: DateTime<Utc>,
}

impl OrganizationSettings {
    /// Row inserted the first time a tenant's settings are read.
    pub fn with_defaults(tenant_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            payment_methods: r#"["cash","card","bank_transfer"]"#.to_string(),
            allow_online_payment: false,
            allow_partial_payment: true,
            payment_link_expiry_hours: 48,
            payment_reminder_hours: 24,
            refund_deadline_hours: 48,
            auto_refund: false,
            tax_enabled: false,
            tax_name: "Tax".to_string(),
            tax_rate: "0".to_string(),
            prices_include_tax: false,
            deposit_enabled: false,
            deposit_type: "percentage".to_string(),
            deposit_amount: "0".to_string(),
            deposit_due_days: 7,
            updated_at: Utc::now(),
        }
    }
}
