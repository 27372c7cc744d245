//! ルートエンドポイント

use axum::Json;
use serde_json::{json, Value};

/// GET / - 稼働確認メッセージ
pub async fn read_root() -> Json<Value> {
    Json(json!({ "message": "API is live" }))
}
