use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TourVariant {
    pub id: String,
    pub tenant_id: String,
    pub tour_id: String,
    pub name: String,
    pub description: String,
    pub modifier_kind: String,
    pub modifier_value: String,
    pub duration_min: Option<i32>,
    pub max_participants: Option<i32>,
    pub available_weekdays: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl TourVariant {
    pub fn new(tenant_id: String, tour_id: String, name: String, modifier_kind: String, modifier_value: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            tour_id,
            name,
            description: String::new(),
            modifier_kind,
            modifier_value,
            duration_min: None,
            max_participants: None,
            available_weekdays: None,
            active: true,
            created_at: Utc::now(),
        }
    }
}
