//! HTTP 미들웨어.
//!
//! - CORS: 설정된 origin 목록만 허용 (자격 증명 포함)

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use signal_core::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// CORS 레이어 생성.
///
/// `cors.allowed_origins`에 있는 origin만 허용합니다.
/// 자격 증명을 허용하므로 와일드카드 origin은 사용하지 않습니다.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        warn!("No valid CORS origins configured, cross-origin requests will be rejected");
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        // 허용되는 HTTP 메서드
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // 허용되는 헤더
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_credentials(true)
        // preflight 요청 캐시 시간
        .max_age(Duration::from_secs(3600))
}
