//! 監査ログミドルウェア
//!
//! 全HTTPリクエストのボディ・レスポンスボディ・処理時間を記録する。
//! ボディは一度しか読めないストリームのため、キャプチャ後に同一バイト列から
//! 再構築して下流ハンドラー／トランスポート層へ渡す。

use crate::api::error::AppError;
use crate::audit::types::AuditRecord;
use crate::db;
use crate::error::Error;
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

/// メソッドの意味上ボディを持ちうるか判定する
fn has_request_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// 監査ログミドルウェア
///
/// リクエストボディを読み取って複製し、下流ハンドラーチェーンの完了後に
/// レスポンスボディを吸い上げて同一内容のレスポンスを再構築する。
/// 監査レコードの書き込み失敗はログに残すだけで、計算済みの
/// クライアントレスポンスには影響させない。リトライは行わない。
pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // リクエストボディのキャプチャと再構築
    let (request, request_payload) = match capture_request(request).await {
        Ok(captured) => captured,
        Err(err) => return AppError(err).into_response(),
    };

    let start = Instant::now();
    let response = next.run(request).await;

    // レスポンスボディのキャプチャと再構築。経過時間は吸い上げ完了後に確定する
    let (response, response_payload) = match capture_response(response).await {
        Ok(captured) => captured,
        Err(err) => return AppError(err).into_response(),
    };
    let duration = start.elapsed();
    let status_code = response.status().as_u16();

    let record = AuditRecord {
        endpoint: format!("{} {}", method, path),
        request_payload,
        response_payload,
        status_code,
    };

    if let Err(e) = db::audit_log::insert(&state.db_pool, &record).await {
        tracing::error!("Failed to persist audit record: {}", e);
    }

    tracing::info!(
        method = %method,
        path = %path,
        status = status_code,
        duration_ms = duration.as_millis() as i64,
        "request audited"
    );

    response
}

/// リクエストボディを一度だけ読み取り、同一バイト列のリクエストを再構築する
///
/// ボディを持たないメソッドは読み取りをスキップし、空ペイロードを返す。
/// UTF-8として不正なバイト列はエラー（黙って置換しない）。
async fn capture_request(request: Request<Body>) -> Result<(Request<Body>, String), Error> {
    if !has_request_body(request.method()) {
        return Ok((request, String::new()));
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| Error::BodyCapture(format!("Failed to read request body: {}", e)))?;
    let payload = std::str::from_utf8(&bytes)
        .map_err(|e| Error::BodyCapture(format!("Request body is not valid UTF-8: {}", e)))?
        .to_string();

    Ok((Request::from_parts(parts, Body::from(bytes)), payload))
}

/// レスポンスボディを全量吸い上げ、同一内容のレスポンスを再構築する
///
/// ステータス・ヘッダーはpartsごと引き継ぐため、クライアントは
/// ハンドラーが生成したものとバイト単位で同一のレスポンスを受け取る。
async fn capture_response(response: Response) -> Result<(Response, String), Error> {
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| Error::BodyCapture(format!("Failed to drain response body: {}", e)))?;
    let payload = std::str::from_utf8(&bytes)
        .map_err(|e| Error::BodyCapture(format!("Response body is not valid UTF-8: {}", e)))?
        .to_string();

    Ok((Response::from_parts(parts, Body::from(bytes)), payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils;
    use axum::http::StatusCode;
    use axum::{
        middleware as axum_middleware,
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt;

    fn build_test_app(state: AppState) -> Router {
        Router::new()
            .route("/api/test", get(|| async { "ok" }))
            .route("/api/echo", post(|body: String| async move { body }))
            .route(
                "/api/created",
                post(|| async { (StatusCode::CREATED, "made") }),
            )
            .layer(axum_middleware::from_fn_with_state(state, audit_middleware))
    }

    async fn read_body(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_audit_captures_get_request() {
        let state = test_utils::test_state().await;
        let pool = state.db_pool.clone();
        let app = build_test_app(state);

        let res = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), 200);
        assert_eq!(read_body(res).await, b"ok");

        let row: (String, String, String, i64) = sqlx::query_as(
            "SELECT endpoint, request_payload, response_payload, status_code FROM audit_logs",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(row.0, "GET /api/test");
        assert_eq!(row.1, "", "GET carries no body, payload should be empty");
        assert_eq!(row.2, "ok");
        assert_eq!(row.3, 200);
    }

    #[tokio::test]
    async fn test_post_body_reaches_handler_unchanged() {
        let state = test_utils::test_state().await;
        let pool = state.db_pool.clone();
        let app = build_test_app(state);

        let payload = r#"{"hello":"world","n":42}"#;
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/echo")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), 200);
        // エコーハンドラーが返したボディ == クライアントが送ったボディ
        assert_eq!(read_body(res).await, payload.as_bytes());

        let row: (String, String) =
            sqlx::query_as("SELECT request_payload, response_payload FROM audit_logs")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(row.0, payload);
        assert_eq!(row.1, payload);
    }

    #[tokio::test]
    async fn test_response_headers_survive_reconstruction() {
        let state = test_utils::test_state().await;
        let app = build_test_app(state);

        let res = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let content_type = res
            .headers()
            .get("content-type")
            .expect("content-type should be preserved")
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_exactly_one_audit_record_per_call() {
        let state = test_utils::test_state().await;
        let pool = state.db_pool.clone();
        let app = build_test_app(state);

        for _ in 0..3 {
            let res = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/api/test")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(res.status(), 200);
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_non_success_status_recorded() {
        let state = test_utils::test_state().await;
        let pool = state.db_pool.clone();
        let app = build_test_app(state);

        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/created")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let (status,): (i64,) = sqlx::query_as(
            "SELECT status_code FROM audit_logs WHERE endpoint = 'POST /api/created'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(status, 201);
    }

    #[tokio::test]
    async fn test_audit_persist_failure_preserves_response() {
        let state = test_utils::test_state().await;
        let pool = state.db_pool.clone();
        let app = build_test_app(state);

        // 監査ログの書き込み先を壊して永続化を失敗させる
        sqlx::query("DROP TABLE audit_logs")
            .execute(&pool)
            .await
            .unwrap();

        let res = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // クライアントは計算済みのビジネスレスポンスをそのまま受け取る
        assert_eq!(res.status(), 200);
        assert_eq!(read_body(res).await, b"ok");
    }

    #[tokio::test]
    async fn test_non_utf8_request_body_fails_without_audit() {
        let state = test_utils::test_state().await;
        let pool = state.db_pool.clone();
        let app = build_test_app(state);

        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/echo")
                    .body(Body::from(vec![0xff, 0xfe, 0xfd]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(&read_body(res).await).unwrap();
        assert_eq!(body["status"], "error");

        // キャプチャ失敗時は監査レコードを書かない
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    // has_request_body のユニットテスト
    #[test]
    fn test_has_request_body_by_method() {
        assert!(has_request_body(&Method::POST));
        assert!(has_request_body(&Method::PUT));
        assert!(has_request_body(&Method::PATCH));
        assert!(!has_request_body(&Method::GET));
        assert!(!has_request_body(&Method::DELETE));
        assert!(!has_request_body(&Method::HEAD));
    }
}
