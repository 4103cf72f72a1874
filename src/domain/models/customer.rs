use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Customer {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(tenant_id: String, name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name,
            email,
            phone: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}
