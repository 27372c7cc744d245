//! ユーザーAPI

use crate::api::error::AppError;
use crate::db;
use crate::db::models::User;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;

/// ユーザー作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// 表示名
    pub name: String,
    /// メールアドレス
    pub email: String,
    /// ロール
    pub role: String,
}

/// POST /users/ - ユーザー作成
///
/// # Returns
/// * `200 OK` - 作成されたユーザー（生成されたID付き）
/// * `500 Internal Server Error` - ストレージエラー
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = db::users::create(
        &state.db_pool,
        &request.name,
        &request.email,
        &request.role,
    )
    .await?;
    Ok(Json(user))
}

/// GET /users/ - ユーザー一覧取得
///
/// # Returns
/// * `200 OK` - 全ユーザーの配列
/// * `500 Internal Server Error` - ストレージエラー
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = db::users::list(&state.db_pool).await?;
    Ok(Json(users))
}
