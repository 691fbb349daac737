//! 패턴 시그널 서비스.
//!
//! 한 요청을 처리하는 흐름을 조합합니다:
//! 최근 일봉 수집 → 마지막 캔들 패턴 평가 → 판단 규칙 적용 → 데이터 출처 첨부.

use signal_analytics::{decide, IndicatorError, PatternEvaluator};
use signal_core::{Decision, MarketContext};
use signal_data::{AcquisitionError, OhlcAcquisitionService, SymbolPlan};
use thiserror::Error;
use tracing::info;

/// 패턴 시그널 처리 오류.
#[derive(Debug, Error)]
pub enum SignalError {
    /// 캔들 수집 실패
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// 패턴 평가 실패
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// 패턴 시그널 서비스.
pub struct PatternSignalService {
    acquisition: OhlcAcquisitionService,
    evaluator: PatternEvaluator,
    lookback_days: usize,
}

impl PatternSignalService {
    /// 새로운 서비스 생성.
    ///
    /// # 인자
    /// * `acquisition` - 캔들 수집 서비스
    /// * `lookback_days` - 요청마다 수집할 일봉 개수
    pub fn new(acquisition: OhlcAcquisitionService, lookback_days: usize) -> Self {
        Self {
            acquisition,
            evaluator: PatternEvaluator::new(),
            lookback_days,
        }
    }

    /// 수집 일수.
    pub fn lookback_days(&self) -> usize {
        self.lookback_days
    }

    /// 수집 심볼 구성.
    pub fn plan(&self) -> &SymbolPlan {
        self.acquisition.plan()
    }

    /// 시장 상황에 대한 시그널 판단.
    pub async fn analyze(&self, ctx: &MarketContext) -> Result<Decision, SignalError> {
        let acquired = self.acquisition.acquire(self.lookback_days).await?;
        let reading = self.evaluator.evaluate(&acquired.series)?;
        let decision = decide(reading, ctx).with_source(acquired.source);

        info!(
            pattern = %decision.pattern,
            signal = %decision.signal,
            confidence = decision.confidence,
            bars = acquired.series.len(),
            "Pattern signal decided"
        );

        Ok(decision)
    }
}
