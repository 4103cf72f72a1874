use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BlackoutDate {
    pub id: String,
    pub tenant_id: String,
    pub tour_id: String,
    pub date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BlackoutDate {
    pub fn new(tenant_id: String, tour_id: String, date: NaiveDate, reason: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            tour_id,
            date,
            reason,
            created_at: Utc::now(),
        }
    }
}
