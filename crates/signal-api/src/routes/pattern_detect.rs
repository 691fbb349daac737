//! 패턴 시그널 endpoint.
//!
//! 시장 상황을 받아 최근 일봉의 패턴으로 옵션 방향을 판단합니다.

use std::sync::Arc;

use axum::{extract::State, Json};
use signal_core::{Decision, MarketContext};
use tracing::warn;

use crate::error::{signal_error_response, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 패턴 시그널 판단.
///
/// POST /api/pattern-detect
#[utoipa::path(
    post,
    path = "/api/pattern-detect",
    request_body = MarketContext,
    responses(
        (status = 200, description = "판단 성공", body = Decision),
        (status = 500, description = "수집/평가 오류", body = ApiErrorResponse),
        (status = 502, description = "모든 데이터 제공자 실패", body = ApiErrorResponse)
    ),
    tag = "signals"
)]
pub async fn pattern_detect(
    State(state): State<Arc<AppState>>,
    Json(ctx): Json<MarketContext>,
) -> ApiResult<Json<Decision>> {
    let decision = state.signal_service.analyze(&ctx).await.map_err(|e| {
        warn!(error = %e, "Pattern signal failed");
        signal_error_response(&e)
    })?;

    Ok(Json(decision))
}
