//! 기술적 지표 모듈.
//!
//! # 지원 지표
//!
//! ## 캔들 패턴 (Candle Patterns)
//! - **Harami**: 하라미 (잉태형), 긴 몸통 안에 짧은 몸통
//! - **Engulfing**: 장악형, 이전 몸통을 감싸는 반대 색 캔들
//!
//! 출력 값은 TA-Lib 관례를 따릅니다: 0은 패턴 없음, 부호는 방향(+강세, -약세),
//! 크기는 100(완전) 또는 80(한쪽 끝 일치).
//!
//! # 사용 예시
//!
//! ```ignore
//! use signal_analytics::indicators::{CandlePatternIndicator, PatternKind};
//!
//! let indicator = CandlePatternIndicator::new();
//! let values = indicator.detect(PatternKind::Engulfing, &open, &high, &low, &close)?;
//! ```

pub mod candle_patterns;

use thiserror::Error;

pub use candle_patterns::{CandlePatternIndicator, PatternKind};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("Insufficient data: required {required}, provided {provided}")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
