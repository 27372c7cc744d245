//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化。エンティティごとに1モジュール。

/// 監査ログストレージ
pub mod audit_log;

/// データベースマイグレーション
pub mod migrations;

pub mod models;

/// 注文・注文明細
pub mod orders;

/// 商品管理
pub mod products;

/// ユーザー管理
pub mod users;
