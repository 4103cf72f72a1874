use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A configured departure slot, e.g. {"time": "09:00", "label": "Morning"}.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DepartureTime {
    pub time: String,
    pub label: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tour {
    pub id: String,
    pub tenant_id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub timezone: String,
    pub base_price: String,
    pub duration_min: i32,
    pub max_participants: i32,
    pub available_weekdays: String,
    pub departure_times: String,
    pub active: bool,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}
