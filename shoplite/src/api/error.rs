//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング。未処理の失敗はすべて
//! 固定形式のエラーエンベロープに変換して境界の外へ出す。

use crate::config;
use crate::error::Error;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 全エラー詳細はサーバーログにのみ残す
        tracing::error!("Request failed: {}", self.0);
        let status = self.0.status_code();
        (status, Json(error_envelope(&self.0.to_string()))).into_response()
    }
}

/// 固定形式のエラーエンベロープを構築する
///
/// `detail` は開発モードでのみ診断メッセージを含み、
/// それ以外では問い合わせ案内の定型文になる。
pub fn error_envelope(diagnostic: &str) -> Value {
    let detail = if config::is_dev_mode() {
        diagnostic.to_string()
    } else {
        "Contact support for more information.".to_string()
    };
    json!({
        "status": "error",
        "message": "An internal server error occurred.",
        "detail": detail,
    })
}

/// パニックを固定エンベロープの500レスポンスへ変換する
///
/// 生のスタックトレースや内部エラー型を境界の外へ漏らさない。
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let diagnostic = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", diagnostic);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_envelope(&diagnostic)),
    )
        .into_response()
}
