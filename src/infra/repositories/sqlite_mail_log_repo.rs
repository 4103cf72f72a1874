use crate::domain::{models::mail_log::MailLog, ports::MailLogRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMailLogRepo {
    pool: SqlitePool,
}

impl SqliteMailLogRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl MailLogRepository for SqliteMailLogRepo {
    async fn log_mail(&self, log: &MailLog) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO mail_logs (id, job_id, recipient, template_name, context_hash, sent_at, status)
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&log.id).bind(&log.job_id).bind(&log.recipient)
            .bind(&log.template_name).bind(&log.context_hash).bind(log.sent_at).bind(&log.status)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn has_mail_been_sent(&self, recipient: &str, template_name: &str, context_hash: &str) -> Result<bool, AppError> {
        let count: i32 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM mail_logs WHERE recipient = ? AND template_name = ? AND context_hash = ? AND status = 'SENT'"
        )
            .bind(recipient).bind(template_name).bind(context_hash)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        Ok(count > 0)
    }
}
