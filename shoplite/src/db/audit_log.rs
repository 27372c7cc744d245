//! 監査ログストレージ
//!
//! 追記専用。アプリケーション自身が読み戻すことはない。

use crate::audit::types::AuditRecord;
use crate::error::Error;
use chrono::Utc;
use sqlx::SqlitePool;

/// 監査レコードを1件挿入する
///
/// `timestamp` は挿入時点のサーバー時刻が割り当てられる。
/// 戻り値のレコードは呼び出し側で消費されないため返さない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `record` - 完成した監査レコード
///
/// # Returns
/// * `Ok(())` - 挿入成功
/// * `Err(Error)` - 挿入失敗（リトライしない）
pub async fn insert(pool: &SqlitePool, record: &AuditRecord) -> Result<(), Error> {
    sqlx::query(
        "INSERT INTO audit_logs (timestamp, endpoint, request_payload, response_payload, status_code) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Utc::now().to_rfc3339())
    .bind(&record.endpoint)
    .bind(&record.request_payload)
    .bind(&record.response_payload)
    .bind(record.status_code as i64)
    .execute(pool)
    .await
    .map_err(|e| Error::Database(format!("Failed to create audit log: {}", e)))?;

    Ok(())
}
