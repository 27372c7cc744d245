//! 商品API

use crate::api::error::AppError;
use crate::db;
use crate::db::models::Product;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;

/// 商品作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// 商品名
    pub name: String,
    /// 価格
    pub price: f64,
    /// カテゴリ
    pub category: String,
}

/// POST /products/ - 商品作成
///
/// # Returns
/// * `200 OK` - 作成された商品（生成されたID付き）
/// * `500 Internal Server Error` - ストレージエラー
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<Product>, AppError> {
    let product = db::products::create(
        &state.db_pool,
        &request.name,
        request.price,
        &request.category,
    )
    .await?;
    Ok(Json(product))
}
