//! # Signal Core
//!
//! 패턴 시그널 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! - 일봉 캔들 및 정규화된 캔들 시리즈
//! - 패턴 감지 값, 시장 상황, 판단 결과
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
