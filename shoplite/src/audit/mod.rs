//! 監査ログシステム
//!
//! 全インバウンドリクエストを傍受し、リクエスト/レスポンスボディと
//! ステータスコードを監査レコードとして永続化する。

/// 監査ログミドルウェア
pub mod middleware;

/// 監査ログの型定義
pub mod types;
