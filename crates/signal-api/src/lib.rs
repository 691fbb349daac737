//! 캔들 패턴 시그널 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (패턴 감지, 패턴 시그널)
//! - 헬스 체크 엔드포인트
//! - OpenAPI 문서 및 Swagger UI
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`services`]: 요청 처리 서비스 (수집 → 평가 → 판단)
//! - [`middleware`]: HTTP 미들웨어 (CORS)
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult};
pub use middleware::cors_layer;
pub use routes::*;
pub use services::{PatternSignalService, SignalError};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, StaticBarProvider};
