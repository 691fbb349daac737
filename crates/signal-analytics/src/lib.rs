//! 캔들 패턴 분석 및 시그널 판단.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 캔들 패턴 지표 (하라미, 장악형)
//! - 캔들 시리즈의 마지막 캔들 패턴 평가 (`PatternEvaluator`)
//! - 패턴과 시장 상황으로 옵션 방향을 정하는 판단 규칙 (`decide`)

pub mod evaluator;
pub mod indicators;
pub mod signal;

pub use evaluator::PatternEvaluator;
pub use indicators::{
    CandlePatternIndicator, IndicatorError, IndicatorResult, PatternKind,
};
pub use signal::decide;
