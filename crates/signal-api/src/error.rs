//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use signal_analytics::IndicatorError;
use signal_data::AcquisitionError;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::services::SignalError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "ALL_PROVIDERS_FAILED",
///   "message": "All providers failed after 3 attempts: twelve_data INFY: Missing values: ...",
///   "details": {"attempts": 3},
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "VALIDATION_ERROR", "ALL_PROVIDERS_FAILED")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    ///
    /// # Arguments
    ///
    /// * `code` - 에러 코드
    /// * `message` - 에러 메시지
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    /// 입력 검증 실패 에러.
    ///
    /// 필드별 메시지를 `details`에 담습니다.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{}: invalid value", field))
                })
            })
            .collect();

        let message = if messages.is_empty() {
            "invalid request".to_string()
        } else {
            messages.join("; ")
        };

        Self::with_details("VALIDATION_ERROR", message, serde_json::json!({ "errors": messages }))
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 시그널 처리 오류를 HTTP 상태 코드와 에러 응답으로 변환합니다.
///
/// 제공자 체인 소진은 상위 서비스 실패(502), 그 외는 내부 오류(500)입니다.
pub fn signal_error_response(err: &SignalError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, body) = match err {
        SignalError::Acquisition(AcquisitionError::AllProvidersFailed { attempts, .. }) => (
            StatusCode::BAD_GATEWAY,
            ApiErrorResponse::with_details(
                "ALL_PROVIDERS_FAILED",
                err.to_string(),
                serde_json::json!({ "attempts": attempts }),
            ),
        ),
        SignalError::Acquisition(AcquisitionError::InvalidDays(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorResponse::new("ACQUISITION_ERROR", err.to_string()),
        ),
        SignalError::Indicator(IndicatorError::InsufficientData { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorResponse::new("INSUFFICIENT_DATA", err.to_string()),
        ),
        SignalError::Indicator(IndicatorError::InvalidParameter(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorResponse::new("INDICATOR_ERROR", err.to_string()),
        ),
    };

    (status, Json(body))
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
        assert_eq!(error.to_string(), "[TEST_ERROR] Test message");
    }

    #[test]
    fn test_json_omits_empty_details() {
        let error = ApiErrorResponse::new("ACQUISITION_ERROR", "boom");
        let json = serde_json::to_string(&error).unwrap();

        assert!(!json.contains("details"));
        assert!(json.contains(r#""code":"ACQUISITION_ERROR""#));
    }

    #[derive(Validate)]
    struct NamedInput {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
    }

    #[test]
    fn test_validation_error_collects_messages() {
        let errors = NamedInput { name: String::new() }.validate().unwrap_err();
        let error = ApiErrorResponse::validation(&errors);

        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.message, "name must not be empty");
        assert!(error.details.is_some());
    }

    #[test]
    fn test_signal_error_status_mapping() {
        let failed = SignalError::Acquisition(AcquisitionError::AllProvidersFailed {
            attempts: 3,
            last_message: "twelve_data INFY: Missing values: out of credits".to_string(),
        });
        let (status, Json(body)) = signal_error_response(&failed);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "ALL_PROVIDERS_FAILED");
        assert!(body.message.contains("out of credits"));

        let invalid = SignalError::Acquisition(AcquisitionError::InvalidDays(0));
        let (status, Json(body)) = signal_error_response(&invalid);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "ACQUISITION_ERROR");

        let insufficient = SignalError::Indicator(IndicatorError::InsufficientData {
            required: 1,
            provided: 0,
        });
        let (status, Json(body)) = signal_error_response(&insufficient);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INSUFFICIENT_DATA");
    }
}
