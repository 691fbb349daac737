//! Yahoo Finance 과거 데이터 제공자.
//!
//! Yahoo Finance API를 사용하여 일봉 OHLCV 데이터를 조회합니다.
//!
//! # 심볼 형식
//!
//! 모든 심볼은 Yahoo Finance 형식으로 전달되어야 합니다:
//! - 지수: "^NSEI" (NIFTY 50)
//! - NSE 상장 ETF/주식: "NIFTYBEES.NS"
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use signal_data::provider::{BarProvider, YahooFinanceProvider};
//!
//! let provider = YahooFinanceProvider::new()?;
//! let series = provider.fetch_bars("^NSEI", 20).await?;
//! ```

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use signal_core::{Bar, BarSeries, ProviderKind};
use tracing::{debug, info};
use yahoo_finance_api as yahoo;

use super::BarProvider;
use crate::error::{ProviderError, Result};

/// 일봉 조회 간격.
const DAILY_INTERVAL: &str = "1d";

/// Yahoo Finance 과거 데이터 제공자.
pub struct YahooFinanceProvider {
    connector: yahoo::YahooConnector,
}

impl YahooFinanceProvider {
    /// 새로운 Yahoo Finance 제공자 생성.
    ///
    /// 호출 타임아웃은 수집 서비스가 시도 단위로 적용합니다.
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| ProviderError::Transport(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self { connector })
    }

    /// 요청 일수에 따른 조회 기간 문자열 반환.
    ///
    /// 휴장일을 감안해 달력 기준으로 넉넉하게 잡습니다.
    pub fn range_for_days(days: usize) -> &'static str {
        if days <= 5 {
            "5d"
        } else if days <= 20 {
            "1mo"
        } else if days <= 60 {
            "3mo"
        } else if days <= 120 {
            "6mo"
        } else if days <= 250 {
            "1y"
        } else {
            "2y"
        }
    }

    /// Yahoo Quote를 Bar로 변환.
    fn quote_to_bar(quote: &yahoo::Quote) -> Option<Bar> {
        if !quote.close.is_finite() || !quote.open.is_finite() {
            return None;
        }

        let time = Utc.timestamp_opt(quote.timestamp, 0).single()?;
        Some(Bar::new(
            time,
            quote.open,
            quote.high,
            quote.low,
            quote.close,
            quote.volume as f64,
        ))
    }
}

#[async_trait]
impl BarProvider for YahooFinanceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::YahooFinance
    }

    async fn fetch_bars(&self, symbol: &str, days: usize) -> Result<BarSeries> {
        let range = Self::range_for_days(days);

        info!(
            symbol = %symbol,
            interval = DAILY_INTERVAL,
            range = range,
            "Yahoo Finance: requesting {} daily bars",
            days
        );

        let response = self
            .connector
            .get_quote_range(symbol, DAILY_INTERVAL, range)
            .await
            .map_err(|e| ProviderError::Transport(format!("Yahoo Finance API 오류 ({}): {}", symbol, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| ProviderError::Transport(format!("Quote 파싱 오류 ({}): {}", symbol, e)))?;

        let bars: Vec<Bar> = quotes.iter().filter_map(Self::quote_to_bar).collect();
        if bars.is_empty() {
            return Err(ProviderError::EmptyResult(format!(
                "Yahoo Finance: {} 데이터 없음",
                symbol
            )));
        }

        debug!(symbol = %symbol, count = bars.len(), "Yahoo Finance: 캔들 수신");

        Ok(BarSeries::normalized(symbol, bars, days))
    }
}
