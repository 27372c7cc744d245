//! 注文API
//!
//! 注文作成とユーザー別注文サマリー射影

use crate::api::error::AppError;
use crate::db;
use crate::db::models::{NewOrderItem, Order};
use crate::orders;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 注文作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// 注文者のユーザーID
    pub user_id: i64,
    /// 注文明細（空でも可）
    pub items: Vec<NewOrderItem>,
}

/// ユーザー別注文サマリーレスポンス
#[derive(Debug, Serialize)]
pub struct OrdersSummaryResponse {
    /// ユーザーID
    pub user_id: i64,
    /// 注文履歴（注文ごとのサマリー）
    pub order_history: Vec<OrderSummary>,
}

/// 注文1件のサマリー
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    /// 注文ID
    pub order_id: i64,
    /// 注文日時
    pub date: DateTime<Utc>,
    /// 全明細の数量合計
    pub total_items: i64,
    /// 明細（商品名と数量）
    pub items: Vec<SummaryItem>,
}

/// サマリー明細エントリ
///
/// 商品はIDではなく表示名で報告する。
#[derive(Debug, Serialize)]
pub struct SummaryItem {
    /// 商品の表示名
    pub product: String,
    /// 数量
    pub qty: i64,
}

/// POST /orders/ - 注文作成
///
/// ヘッダーと明細をまとめて1つの論理操作として永続化する。
///
/// # Returns
/// * `200 OK` - 明細付きの作成済み注文
/// * `500 Internal Server Error` - ストレージエラー（注文全体が取り消される）
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let order = orders::place_order(&state.db_pool, request.user_id, &request.items).await?;
    Ok(Json(order))
}

/// GET /users/:user_id/orders-summary - ユーザー別注文サマリー
///
/// 生の注文・明細・商品行を人間向けの集計形式へ変換して返す。
/// 注文を持たないユーザーには空の履歴を返す（404にはしない）。
///
/// # Returns
/// * `200 OK` - 注文履歴サマリー
/// * `500 Internal Server Error` - ストレージエラー
pub async fn user_orders_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<OrdersSummaryResponse>, AppError> {
    let orders = db::orders::list_for_user(&state.db_pool, user_id).await?;

    let order_history = orders
        .into_iter()
        .map(|order| {
            let total_items = order.items.iter().map(|item| item.quantity).sum();
            OrderSummary {
                order_id: order.id,
                date: order.order_date,
                total_items,
                items: order
                    .items
                    .into_iter()
                    .map(|item| SummaryItem {
                        product: item.product_name,
                        qty: item.quantity,
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(Json(OrdersSummaryResponse {
        user_id,
        order_history,
    }))
}
