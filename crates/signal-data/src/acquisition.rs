//! 일봉 캔들 수집 서비스.
//!
//! 고정된 순서의 폴백 체인으로 최근 일봉을 수집합니다.
//!
//! 1. 1차 제공자, 대상 심볼 (NIFTY 50 지수)
//! 2. 1차 제공자, 대리 심볼 (NIFTY 추종 ETF)
//! 3. 2차 제공자, 폴백 심볼 (다른 종목일 수 있음)
//!
//! 첫 번째로 비어 있지 않은 시리즈를 반환하며, 각 시도는 개별 타임아웃을 가집니다.
//! 개별 실패는 경고 로그만 남기고 다음 단계로 넘어갑니다.

use std::sync::Arc;
use std::time::Duration;

use signal_core::{BarSeries, DataSource, ProviderKind};
use tracing::{error, info, warn};

use crate::error::{AcquisitionError, ProviderError};
use crate::provider::BarProvider;

/// 기본 조회 일수.
pub const DEFAULT_DAYS: usize = 20;

/// 폴백 체인에서 사용하는 심볼 구성.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPlan {
    /// 1차 제공자 대상 심볼
    pub target: String,
    /// 1차 제공자 대리 심볼
    pub proxy: String,
    /// 2차 제공자 폴백 심볼
    pub fallback: String,
}

impl SymbolPlan {
    /// 새로운 심볼 구성 생성.
    pub fn new(target: impl Into<String>, proxy: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            proxy: proxy.into(),
            fallback: fallback.into(),
        }
    }
}

impl Default for SymbolPlan {
    fn default() -> Self {
        Self::new("^NSEI", "NIFTYBEES.NS", "INFY")
    }
}

/// 수집 결과 (시리즈 + 출처).
#[derive(Debug, Clone)]
pub struct AcquiredSeries {
    pub series: BarSeries,
    pub source: DataSource,
}

/// 캔들 수집 서비스.
pub struct OhlcAcquisitionService {
    primary: Arc<dyn BarProvider>,
    secondary: Arc<dyn BarProvider>,
    plan: SymbolPlan,
    attempt_timeout: Duration,
}

impl OhlcAcquisitionService {
    /// 새로운 수집 서비스 생성.
    ///
    /// # 인자
    /// * `primary` - 1차 제공자 (대상/대리 심볼 조회)
    /// * `secondary` - 2차 제공자 (폴백 심볼 조회)
    /// * `plan` - 단계별 심볼
    /// * `attempt_timeout` - 시도당 최대 대기 시간
    pub fn new(
        primary: Arc<dyn BarProvider>,
        secondary: Arc<dyn BarProvider>,
        plan: SymbolPlan,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            plan,
            attempt_timeout,
        }
    }

    /// 심볼 구성.
    pub fn plan(&self) -> &SymbolPlan {
        &self.plan
    }

    /// 최근 `days`개 일봉 수집.
    ///
    /// 성공 시 오래된 순으로 정렬된, 길이 1 이상 `days` 이하의 시리즈를 반환합니다.
    pub async fn acquire(&self, days: usize) -> Result<AcquiredSeries, AcquisitionError> {
        if days == 0 {
            return Err(AcquisitionError::InvalidDays(days));
        }

        let chain: [(&Arc<dyn BarProvider>, &str, bool); 3] = [
            (&self.primary, self.plan.target.as_str(), false),
            (&self.primary, self.plan.proxy.as_str(), true),
            (&self.secondary, self.plan.fallback.as_str(), true),
        ];

        let mut attempts = 0;
        let mut last_message = String::from("no provider attempted");

        for (provider, symbol, substituted) in chain {
            attempts += 1;
            let kind = provider.kind();
            info!(provider = %kind, symbol = %symbol, attempt = attempts, days, "Fetching OHLC");

            match self.attempt(provider.as_ref(), symbol, days).await {
                Ok(series) => {
                    info!(
                        provider = %kind,
                        symbol = %symbol,
                        bars = series.len(),
                        substituted,
                        "OHLC acquired"
                    );
                    return Ok(AcquiredSeries {
                        series,
                        source: DataSource {
                            provider: kind,
                            symbol: symbol.to_string(),
                            substituted,
                        },
                    });
                }
                Err(e) => {
                    warn!(
                        provider = %kind,
                        symbol = %symbol,
                        attempt = attempts,
                        error = %e,
                        "OHLC attempt failed, falling back"
                    );
                    last_message = format!("{} {}: {}", kind, symbol, e);
                }
            }
        }

        error!(attempts, last_message = %last_message, "OHLC acquisition exhausted all providers");
        Err(AcquisitionError::AllProvidersFailed {
            attempts,
            last_message,
        })
    }

    /// 단일 시도 (타임아웃 + 빈 결과 검사).
    async fn attempt(
        &self,
        provider: &dyn BarProvider,
        symbol: &str,
        days: usize,
    ) -> Result<BarSeries, ProviderError> {
        let series = tokio::time::timeout(self.attempt_timeout, provider.fetch_bars(symbol, days))
            .await
            .map_err(|_| ProviderError::Timeout(self.attempt_timeout.as_millis() as u64))??;

        if series.is_empty() {
            return Err(ProviderError::EmptyResult(format!("{} 데이터 없음", symbol)));
        }

        Ok(series.into_recent(days))
    }
}

impl std::fmt::Debug for OhlcAcquisitionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OhlcAcquisitionService")
            .field("primary", &self.primary.kind())
            .field("secondary", &self.secondary.kind())
            .field("plan", &self.plan)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use signal_core::Bar;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 심볼별로 미리 정한 응답을 돌려주는 테스트 제공자.
    struct StubProvider {
        kind: ProviderKind,
        responses: HashMap<String, Stub>,
        calls: Mutex<Vec<String>>,
    }

    #[derive(Clone)]
    enum Stub {
        Bars(usize),
        Empty,
        Fail,
        Hang,
    }

    impl StubProvider {
        fn new(kind: ProviderKind, responses: &[(&str, Stub)]) -> Arc<Self> {
            Arc::new(Self {
                kind,
                responses: responses
                    .iter()
                    .map(|(s, r)| (s.to_string(), r.clone()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i as i64);
                let close = 100.0 + i as f64;
                Bar::new(time, close - 1.0, close + 1.0, close - 2.0, close, 1000.0)
            })
            .collect()
    }

    #[async_trait]
    impl BarProvider for StubProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn fetch_bars(&self, symbol: &str, days: usize) -> crate::error::Result<BarSeries> {
            self.calls.lock().unwrap().push(symbol.to_string());
            match self.responses.get(symbol).cloned().unwrap_or(Stub::Fail) {
                Stub::Bars(n) => Ok(BarSeries::normalized(symbol, bars(n), days)),
                Stub::Empty => Ok(BarSeries::normalized(symbol, Vec::new(), days)),
                Stub::Fail => Err(ProviderError::Transport("connection refused".to_string())),
                Stub::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(ProviderError::Transport("unreachable".to_string()))
                }
            }
        }
    }

    fn service(primary: Arc<StubProvider>, secondary: Arc<StubProvider>) -> OhlcAcquisitionService {
        OhlcAcquisitionService::new(primary, secondary, SymbolPlan::default(), Duration::from_millis(100))
    }

    #[tokio::test]
    async fn test_primary_target_success() {
        let primary = StubProvider::new(ProviderKind::YahooFinance, &[("^NSEI", Stub::Bars(25))]);
        let secondary = StubProvider::new(ProviderKind::TwelveData, &[]);
        let svc = service(primary.clone(), secondary.clone());

        let acquired = svc.acquire(20).await.unwrap();
        assert_eq!(acquired.series.len(), 20);
        assert_eq!(acquired.source.provider, ProviderKind::YahooFinance);
        assert_eq!(acquired.source.symbol, "^NSEI");
        assert!(!acquired.source.substituted);
        assert!(secondary.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_target_falls_back_to_proxy() {
        let primary = StubProvider::new(
            ProviderKind::YahooFinance,
            &[("^NSEI", Stub::Empty), ("NIFTYBEES.NS", Stub::Bars(5))],
        );
        let secondary = StubProvider::new(ProviderKind::TwelveData, &[]);
        let svc = service(primary.clone(), secondary);

        let acquired = svc.acquire(20).await.unwrap();
        assert_eq!(acquired.series.len(), 5);
        assert_eq!(acquired.source.symbol, "NIFTYBEES.NS");
        assert!(acquired.source.substituted);
        assert_eq!(primary.calls(), vec!["^NSEI", "NIFTYBEES.NS"]);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back_to_secondary() {
        let primary = StubProvider::new(ProviderKind::YahooFinance, &[]);
        let secondary = StubProvider::new(ProviderKind::TwelveData, &[("INFY", Stub::Bars(20))]);
        let svc = service(primary.clone(), secondary.clone());

        let acquired = svc.acquire(20).await.unwrap();
        assert_eq!(acquired.source.provider, ProviderKind::TwelveData);
        assert_eq!(acquired.source.symbol, "INFY");
        assert!(acquired.source.substituted);
        assert_eq!(primary.calls().len(), 2);
        assert_eq!(secondary.calls(), vec!["INFY"]);
    }

    #[tokio::test]
    async fn test_all_providers_failed() {
        let primary = StubProvider::new(ProviderKind::YahooFinance, &[("^NSEI", Stub::Empty)]);
        let secondary = StubProvider::new(ProviderKind::TwelveData, &[]);
        let svc = service(primary, secondary);

        match svc.acquire(20).await {
            Err(AcquisitionError::AllProvidersFailed { attempts, last_message }) => {
                assert_eq!(attempts, 3);
                assert!(last_message.contains("INFY"));
            }
            other => panic!("unexpected result: {:?}", other.map(|a| a.source)),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_attempt_times_out() {
        let primary = StubProvider::new(
            ProviderKind::YahooFinance,
            &[("^NSEI", Stub::Hang), ("NIFTYBEES.NS", Stub::Bars(3))],
        );
        let secondary = StubProvider::new(ProviderKind::TwelveData, &[]);
        let svc = service(primary, secondary);

        let acquired = svc.acquire(20).await.unwrap();
        assert_eq!(acquired.source.symbol, "NIFTYBEES.NS");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported_by_attempt() {
        let primary = StubProvider::new(
            ProviderKind::YahooFinance,
            &[("^NSEI", Stub::Hang), ("NIFTYBEES.NS", Stub::Hang)],
        );
        let secondary = StubProvider::new(ProviderKind::TwelveData, &[("INFY", Stub::Hang)]);
        let svc = service(primary, secondary);

        match svc.acquire(20).await {
            Err(AcquisitionError::AllProvidersFailed { attempts, last_message }) => {
                assert_eq!(attempts, 3);
                assert!(last_message.contains("Request timeout after 100 ms"));
            }
            other => panic!("unexpected result: {:?}", other.map(|a| a.source)),
        }
    }

    #[tokio::test]
    async fn test_zero_days_rejected() {
        let primary = StubProvider::new(ProviderKind::YahooFinance, &[("^NSEI", Stub::Bars(5))]);
        let secondary = StubProvider::new(ProviderKind::TwelveData, &[]);
        let svc = service(primary.clone(), secondary);

        assert!(matches!(svc.acquire(0).await, Err(AcquisitionError::InvalidDays(0))));
        assert!(primary.calls().is_empty());
    }
}
