//! MySQL send-log store.
//!
//! Persists one row per send attempt into `sms_log`; see
//! `migrations/0001_create_sms_log_table.sql`.

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use sg_core::services::sms::SendRecord;

use super::store::AuditStore;
use crate::InfraError;

pub struct MysqlAuditStore {
    pool: MySqlPool,
}

impl MysqlAuditStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for MysqlAuditStore {
    async fn record(&self, entry: &SendRecord) -> Result<(), InfraError> {
        let data = serde_json::to_string(&entry.code)?;

        sqlx::query(
            r#"
            INSERT INTO sms_log (mobile, data, is_sent, result, created_at, updated_at)
            VALUES (?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(entry.code.full_number())
        .bind(data)
        .bind(entry.sent)
        .bind(entry.raw.to_string())
        .execute(&self.pool)
        .await?;

        debug!(mobile = %entry.code.full_number(), sent = entry.sent, "Send record persisted");
        Ok(())
    }
}
