use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MailLog {
    pub id: String,
    pub job_id: String,
    pub recipient: String,
    pub template_name: String,
    pub context_hash: String,
    pub sent_at: DateTime<Utc>,
    pub status: String,
}
