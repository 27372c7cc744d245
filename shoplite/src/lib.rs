//! Shoplite server
//!
//! ユーザー・商品・注文を扱う小規模トランザクションサービス。
//! 全リクエスト/レスポンスを監査ログとして記録する。

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// 監査ログシステム
pub mod audit;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// エラー型定義
pub mod error;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 注文組み立て（ヘッダー+明細のトランザクション作成）
pub mod orders;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
}
