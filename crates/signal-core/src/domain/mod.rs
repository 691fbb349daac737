//! 패턴 시그널 서비스의 도메인 모델.

mod market_data;
mod signal;

pub use market_data::*;
pub use signal::*;
