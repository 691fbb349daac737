//! 시세 데이터 Provider 모듈.
//!
//! 일봉 캔들을 공통 형태(`BarSeries`)로 반환하는 제공자들을 정의합니다.
//!
//! ## Yahoo Finance
//! - `YahooFinanceProvider`: 티커 심볼과 일수로 과거 시세 조회 (1차)
//!
//! ## Twelve Data
//! - `TwelveDataProvider`: REST time-series API (2차, API 키 필요)

pub mod twelve_data;
pub mod yahoo;

use async_trait::async_trait;
use signal_core::{BarSeries, ProviderKind};

use crate::error::Result;

pub use twelve_data::TwelveDataProvider;
pub use yahoo::YahooFinanceProvider;

/// 일봉 캔들 제공자 trait.
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// 제공자 종류.
    fn kind(&self) -> ProviderKind;

    /// 최근 일봉 캔들 조회.
    ///
    /// # 인자
    /// * `symbol` - 제공자 형식의 심볼 (예: "^NSEI", "NIFTYBEES.NS", "INFY")
    /// * `days` - 최대 캔들 개수
    ///
    /// # 반환
    /// 오래된 것부터 정렬된 캔들 시리즈 (길이 ≤ `days`)
    async fn fetch_bars(&self, symbol: &str, days: usize) -> Result<BarSeries>;
}
