//! 원시 OHLC 배열 패턴 감지 endpoint.
//!
//! 호출자가 보낸 시가/고가/저가/종가 배열에 장악형 감지기를 적용합니다.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use signal_analytics::PatternKind;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// OHLC 배열 길이 검증.
fn validate_equal_lengths(request: &DetectRequest) -> Result<(), ValidationError> {
    let len = request.open.len();
    if request.high.len() != len || request.low.len() != len || request.close.len() != len {
        return Err(ValidationError::new("ohlc_length_mismatch")
            .with_message("open, high, low, close must have the same length".into()));
    }
    Ok(())
}

/// 패턴 감지 요청.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[validate(schema(function = "validate_equal_lengths"))]
pub struct DetectRequest {
    /// 시가
    pub open: Vec<f64>,
    /// 고가
    pub high: Vec<f64>,
    /// 저가
    pub low: Vec<f64>,
    /// 종가
    pub close: Vec<f64>,
}

/// 패턴 감지 응답.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DetectResponse {
    /// 입력과 같은 길이의 장악형 신호 값 (0 = 없음, ±80/±100)
    pub pattern: Vec<i32>,
}

/// 장악형 패턴 감지.
///
/// POST /detect
#[utoipa::path(
    post,
    path = "/detect",
    request_body = DetectRequest,
    responses(
        (status = 200, description = "감지 성공", body = DetectResponse),
        (status = 400, description = "배열 길이 불일치", body = ApiErrorResponse)
    ),
    tag = "patterns"
)]
pub async fn detect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetectRequest>,
) -> ApiResult<Json<DetectResponse>> {
    if let Err(errors) = request.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(ApiErrorResponse::validation(&errors))));
    }

    let pattern = state
        .indicator
        .detect(
            PatternKind::Engulfing,
            &request.open,
            &request.high,
            &request.low,
            &request.close,
        )
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiErrorResponse::new("VALIDATION_ERROR", e.to_string())),
            )
        })?;

    Ok(Json(DetectResponse { pattern }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{body::Body, http::Request, routing::post, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/detect", post(detect))
            .with_state(Arc::new(create_test_state(None)))
    }

    async fn post_json(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_detect_bullish_engulfing() {
        let (status, body) = post_json(serde_json::json!({
            "open": [100.0, 95.0],
            "high": [101.0, 102.0],
            "low": [95.0, 94.0],
            "close": [96.0, 101.0]
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pattern"], serde_json::json!([0, 100]));
    }

    #[tokio::test]
    async fn test_detect_empty_arrays() {
        let (status, body) = post_json(serde_json::json!({
            "open": [], "high": [], "low": [], "close": []
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pattern"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_detect_length_mismatch() {
        let (status, body) = post_json(serde_json::json!({
            "open": [100.0, 95.0],
            "high": [101.0],
            "low": [95.0, 94.0],
            "close": [96.0, 101.0]
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
