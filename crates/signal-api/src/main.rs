//! 패턴 시그널 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 헬스 체크, 원시 OHLC 패턴 감지, 패턴 시그널 판단 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use utoipa::OpenApi;

use signal_api::cors_layer;
use signal_api::openapi::{swagger_ui_router, ApiDoc};
use signal_api::routes::create_api_router;
use signal_api::state::AppState;
use signal_core::{init_logging, AppConfig, CorsConfig, LogConfig};

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, cors: &CorsConfig) -> Router {
    Router::new()
        .merge(create_api_router().with_state(state))
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(30)))
        .layer(cors_layer(cors))
}

/// OpenAPI 스펙 내보내기 처리.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 설정된 경우
/// OpenAPI JSON 스펙을 stdout으로 출력하고 종료합니다.
fn handle_export_openapi() -> Result<(), Box<dyn std::error::Error>> {
    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");

    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
        println!("{}", json);
        std::process::exit(0);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // OpenAPI 내보내기 처리 (서버 시작 전)
    handle_export_openapi()?;

    // 설정 로드
    let config = AppConfig::load_default()?;

    // tracing 초기화
    init_logging(LogConfig::from(&config.logging))?;

    config.validate().map_err(|e| {
        error!(error = %e, "설정이 유효하지 않습니다");
        e
    })?;

    info!("Starting Pattern Signal API server...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            error!(
                host = %config.server.host,
                port = config.server.port,
                error = %e,
                "소켓 주소 설정이 유효하지 않습니다. SIGNAL__SERVER__HOST, SIGNAL__SERVER__PORT를 확인하세요."
            );
            e
        })?;

    let state = Arc::new(AppState::from_config(&config)?);

    info!(version = %state.version, "Application state initialized");
    info!(
        target_symbol = %config.providers.yahoo.target_symbol,
        proxy_symbol = %config.providers.yahoo.proxy_symbol,
        fallback_symbol = %config.providers.twelve_data.symbol,
        lookback_days = config.acquisition.days,
        request_timeout_secs = config.providers.request_timeout_secs,
        "Provider chain configured"
    );
    if !state.secondary_configured {
        warn!("Twelve Data api key not configured, fallback provider will always fail");
    }

    let app = create_router(state, &config.cors);

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
