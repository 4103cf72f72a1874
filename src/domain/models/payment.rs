use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: String,
    pub tenant_id: String,
    pub booking_id: String,
    pub amount: String,
    pub method: String,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(tenant_id: String, booking_id: String, amount: String, method: String, reference: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            booking_id,
            amount,
            method,
            reference,
            created_at: Utc::now(),
        }
    }
}
