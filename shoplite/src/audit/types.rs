//! 監査ログの型定義

/// 監査レコード
///
/// 1インバウンドリクエストにつき1件生成される追記専用レコード。
/// `timestamp` と `id` は挿入時にストレージ側で割り当てられる。
#[derive(Debug, Clone)]
pub struct AuditRecord {
    /// エンドポイントラベル（"METHOD PATH" 形式）
    pub endpoint: String,
    /// リクエストボディ（テキスト。ボディなしは空文字列）
    pub request_payload: String,
    /// レスポンスボディ（テキスト。ボディなしは空文字列）
    pub response_payload: String,
    /// HTTPステータスコード
    pub status_code: u16,
}
