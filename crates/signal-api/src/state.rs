//! 애플리케이션 상태 관리.
//!
//! 모든 API 핸들러에서 공유하는 상태를 정의합니다.
//! 요청 간 변경 가능한 상태는 없으며, 제공자 클라이언트는 `Arc`로 공유됩니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use signal_analytics::CandlePatternIndicator;
use signal_core::AppConfig;
use signal_data::{
    OhlcAcquisitionService, ProviderError, SymbolPlan, TwelveDataProvider, YahooFinanceProvider,
};

use crate::services::PatternSignalService;

/// 애플리케이션 공유 상태.
pub struct AppState {
    /// 패턴 시그널 서비스 - 수집, 평가, 판단
    pub signal_service: Arc<PatternSignalService>,

    /// 원시 OHLC 배열용 캔들 패턴 감지기
    pub indicator: CandlePatternIndicator,

    /// 2차 제공자 API 키 설정 여부
    pub secondary_configured: bool,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `signal_service` - 패턴 시그널 서비스
    /// * `secondary_configured` - 2차 제공자 사용 가능 여부
    pub fn new(signal_service: PatternSignalService, secondary_configured: bool) -> Self {
        Self {
            signal_service: Arc::new(signal_service),
            indicator: CandlePatternIndicator::new(),
            secondary_configured,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 설정에서 제공자와 서비스를 구성합니다.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(config.providers.request_timeout_secs);

        let primary = YahooFinanceProvider::new()?;
        let secondary = TwelveDataProvider::from_config(&config.providers.twelve_data, timeout)?;
        let secondary_configured = secondary.has_api_key();

        let plan = SymbolPlan::new(
            config.providers.yahoo.target_symbol.clone(),
            config.providers.yahoo.proxy_symbol.clone(),
            config.providers.twelve_data.symbol.clone(),
        );
        let acquisition =
            OhlcAcquisitionService::new(Arc::new(primary), Arc::new(secondary), plan, timeout);

        Ok(Self::new(
            PatternSignalService::new(acquisition, config.acquisition.days),
            secondary_configured,
        ))
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}

/// 테스트용 고정 응답 제공자.
///
/// 심볼과 관계없이 미리 정한 캔들을 반환하거나 항상 실패합니다.
#[cfg(any(test, feature = "test-utils"))]
pub struct StaticBarProvider {
    kind: signal_core::ProviderKind,
    bars: Option<Vec<signal_core::Bar>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl StaticBarProvider {
    /// 항상 `bars`를 반환하는 제공자.
    pub fn with_bars(kind: signal_core::ProviderKind, bars: Vec<signal_core::Bar>) -> Self {
        Self {
            kind,
            bars: Some(bars),
        }
    }

    /// 항상 실패하는 제공자.
    pub fn failing(kind: signal_core::ProviderKind) -> Self {
        Self { kind, bars: None }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait::async_trait]
impl signal_data::BarProvider for StaticBarProvider {
    fn kind(&self) -> signal_core::ProviderKind {
        self.kind
    }

    async fn fetch_bars(
        &self,
        symbol: &str,
        days: usize,
    ) -> signal_data::Result<signal_core::BarSeries> {
        match &self.bars {
            Some(bars) => Ok(signal_core::BarSeries::normalized(symbol, bars.clone(), days)),
            None => Err(ProviderError::Transport(format!("{} unavailable", self.kind))),
        }
    }
}

/// 테스트용 AppState 생성.
///
/// 1차 제공자는 `primary_bars`를 반환하고 (`None`이면 실패), 2차 제공자는 항상 실패합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state(primary_bars: Option<Vec<signal_core::Bar>>) -> AppState {
    use signal_core::ProviderKind;

    let primary = match primary_bars {
        Some(bars) => StaticBarProvider::with_bars(ProviderKind::YahooFinance, bars),
        None => StaticBarProvider::failing(ProviderKind::YahooFinance),
    };
    let secondary = StaticBarProvider::failing(ProviderKind::TwelveData);

    let acquisition = OhlcAcquisitionService::new(
        Arc::new(primary),
        Arc::new(secondary),
        SymbolPlan::default(),
        Duration::from_secs(1),
    );

    AppState::new(PatternSignalService::new(acquisition, signal_data::DEFAULT_DAYS), false)
}
