//! 요청 처리 서비스.
//!
//! - `pattern_signal`: 캔들 수집 → 패턴 평가 → 시그널 판단

pub mod pattern_signal;

pub use pattern_signal::{PatternSignalService, SignalError};
