//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/detect` - 원시 OHLC 배열 장악형 감지
//! - `/api/pattern-detect` - 패턴 시그널 판단

pub mod detect;
pub mod health;
pub mod pattern_detect;

pub use detect::{detect, DetectRequest, DetectResponse};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse, ReadinessResponse};
pub use pattern_detect::pattern_detect;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::state::AppState;

/// API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_router())
        .route("/detect", post(detect))
        .route("/api/pattern-detect", post(pattern_detect))
}
