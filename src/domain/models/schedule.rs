use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Schedule {
    pub id: String,
    pub tenant_id: String,
    pub tour_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub max_participants: i32,
    pub booked_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(tenant_id: String, tour_id: String, date: NaiveDate, time: String, max_participants: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            tour_id,
            date,
            time,
            max_participants,
            booked_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn spots_remaining(&self) -> i32 {
        (self.max_participants - self.booked_count).max(0)
    }
}
