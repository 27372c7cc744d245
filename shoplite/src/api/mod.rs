//! REST APIハンドラー
//!
//! ルーター構築と各エンドポイントのハンドラー群

/// APIエラーレスポンス型
pub mod error;

/// 注文API
pub mod orders;

/// 商品API
pub mod products;

/// ルートエンドポイント
pub mod root;

/// ユーザーAPI
pub mod users;

use crate::audit::middleware::audit_middleware;
use crate::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// アプリケーションのルーターを構築する
///
/// パニック変換レイヤーは監査レイヤーの内側に置く。パニック由来の
/// 500エンベロープも通常のレスポンスとして監査対象になる。
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::read_root))
        .route("/users/", post(users::create_user).get(users::list_users))
        .route(
            "/users/:user_id/orders-summary",
            get(orders::user_orders_summary),
        )
        .route("/products/", post(products::create_product))
        .route("/orders/", post(orders::create_order))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .with_state(state)
}
