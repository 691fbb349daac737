//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use signal_core::{DataSource, Decision, MarketContext, ProviderKind, SignalAction};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::routes::{
    ComponentHealth, ComponentStatus, DetectRequest, DetectResponse, HealthResponse,
    ReadinessResponse,
};

// ==================== OpenAPI 문서 정의 ====================

/// Pattern Signal API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "NIFTY Pattern Signal API",
        version = "0.1.0",
        description = r#"
# NIFTY 50 캔들 패턴 시그널 REST API

최근 일봉의 캔들 패턴(하라미, 장악형)과 호출자가 전달한 시장 상황으로
옵션 방향(BUY CE / SELL PE / WAIT)을 제안합니다.

## 데이터 소스

1. Yahoo Finance `^NSEI`
2. Yahoo Finance `NIFTYBEES.NS` (대리 심볼)
3. Twelve Data (폴백 심볼)

응답의 `source` 필드가 실제 데이터를 제공한 소스를 알려줍니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "patterns", description = "패턴 - 원시 OHLC 배열 캔들 패턴 감지"),
        (name = "signals", description = "시그널 - 패턴 기반 옵션 방향 판단")
    ),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ReadinessResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,

            // ===== Patterns =====
            DetectRequest,
            DetectResponse,

            // ===== Signals =====
            MarketContext,
            Decision,
            SignalAction,
            DataSource,
            ProviderKind,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
        crate::routes::detect::detect,
        crate::routes::pattern_detect::pattern_detect,
    )
)]
pub struct ApiDoc;

// ==================== Swagger UI 라우터 ====================

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
