use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PricingTier {
    pub id: String,
    pub tenant_id: String,
    pub tour_id: String,
    pub name: String,
    pub label: String,
    pub price: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub counts_toward_capacity: bool,
    pub is_default: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl PricingTier {
    pub fn new(tenant_id: String, tour_id: String, name: String, label: String, price: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            tour_id,
            name,
            label,
            price,
            min_age: None,
            max_age: None,
            min_quantity: None,
            max_quantity: None,
            counts_toward_capacity: true,
            is_default: false,
            active: true,
            created_at: Utc::now(),
        }
    }
}
