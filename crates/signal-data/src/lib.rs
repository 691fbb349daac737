//! 시세 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - 일봉 캔들 제공자 (`BarProvider`): Yahoo Finance (1차), Twelve Data (2차)
//! - 폴백 체인을 따라 캔들을 수집하는 `OhlcAcquisitionService`

pub mod acquisition;
pub mod error;
pub mod provider;

pub use acquisition::{AcquiredSeries, OhlcAcquisitionService, SymbolPlan, DEFAULT_DAYS};
pub use error::{AcquisitionError, ProviderError, Result};
pub use provider::{BarProvider, TwelveDataProvider, YahooFinanceProvider};
