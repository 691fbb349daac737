//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 개별 제공자 호출 오류.
///
/// 수집 서비스가 내부에서 복구하며, 다음 제공자로 넘어가는 신호로만 쓰입니다.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 조회 결과가 비어 있음
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// 응답에 `values` 필드가 없음
    #[error("Missing values: {detail}")]
    MissingValues { detail: String },

    /// 네트워크/전송 오류
    #[error("Transport error: {0}")]
    Transport(String),

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 호출 타임아웃
    #[error("Request timeout after {0} ms")]
    Timeout(u64),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // URL에 API 키가 포함되므로 메시지에서 제거
        let err = err.without_url();
        if err.is_timeout() {
            ProviderError::Transport(format!("request timed out: {}", err))
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

/// 캔들 수집 오류.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// 조회 일수가 0
    #[error("Invalid days: {0} (must be at least 1)")]
    InvalidDays(usize),

    /// 모든 제공자 시도 실패
    #[error("All providers failed after {attempts} attempts: {last_message}")]
    AllProvidersFailed { attempts: usize, last_message: String },
}

pub type Result<T> = std::result::Result<T, ProviderError>;
