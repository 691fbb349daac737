//! 헬스 체크 endpoint.
//!
//! 서버 상태 확인을 위한 헬스 체크 엔드포인트를 제공합니다.
//! 로드밸런서나 오케스트레이션 시스템(Kubernetes 등)에서 사용됩니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// Liveness 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
}

/// Readiness 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 개별 컴포넌트 상태
    pub components: ComponentHealth,
}

/// 개별 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    /// 1차 제공자 (Yahoo Finance)
    pub primary_provider: ComponentStatus,

    /// 2차 제공자 (Twelve Data)
    pub secondary_provider: ComponentStatus,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// 상태 ("up" | "not_configured")
    pub status: String,

    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    /// 미설정 상태.
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self {
            status: "not_configured".to_string(),
            message: Some(message.into()),
        }
    }

    /// 정보 포함 정상 상태.
    pub fn up_with_info(message: impl Into<String>) -> Self {
        Self {
            status: "up".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// 서버가 응답 가능한 상태인지만 확인합니다.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "서버 동작 중", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// 상세 헬스 체크 (readiness probe용).
///
/// 제공자 구성을 보고합니다. 2차 제공자 API 키가 없으면 "degraded"입니다.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "제공자 구성 상태", body = ReadinessResponse)
    ),
    tag = "health"
)]
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let plan = state.signal_service.plan();

    let primary = ComponentStatus::up_with_info(format!(
        "yahoo_finance: {} (proxy {})",
        plan.target, plan.proxy
    ));

    let (overall_status, secondary) = if state.secondary_configured {
        (
            "healthy",
            ComponentStatus::up_with_info(format!("twelve_data: {}", plan.fallback)),
        )
    } else {
        (
            "degraded",
            ComponentStatus::not_configured("twelve_data api key not configured"),
        )
    };

    let response = ReadinessResponse {
        status: overall_status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        components: ComponentHealth {
            primary_provider: primary,
            secondary_provider: secondary,
        },
    };

    (StatusCode::OK, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(health_ready))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check_returns_json() {
        let app = health_router().with_state(Arc::new(create_test_state(None)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert!(!health.version.is_empty());
    }

    #[tokio::test]
    async fn test_health_ready_reports_providers() {
        let app = health_router().with_state(Arc::new(create_test_state(None)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let ready: ReadinessResponse = serde_json::from_slice(&body).unwrap();

        // 테스트 상태는 2차 제공자 미설정
        assert_eq!(ready.status, "degraded");
        assert_eq!(ready.components.primary_provider.status, "up");
        assert_eq!(ready.components.secondary_provider.status, "not_configured");
    }
}
