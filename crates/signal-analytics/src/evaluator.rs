//! 최근 캔들 패턴 평가.

use signal_core::{BarSeries, PatternReading};
use tracing::debug;

use crate::indicators::{CandlePatternIndicator, IndicatorError, IndicatorResult, PatternKind};

/// 캔들 시리즈의 마지막 캔들에서 하라미/장악형 값을 읽는 평가기.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternEvaluator {
    indicator: CandlePatternIndicator,
}

impl PatternEvaluator {
    /// 새로운 평가기 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 전체 시리즈에 두 감지기를 적용하고 마지막 위치의 값만 반환합니다.
    ///
    /// # 오류
    /// 시리즈가 비어 있으면 `IndicatorError::InsufficientData`
    pub fn evaluate(&self, series: &BarSeries) -> IndicatorResult<PatternReading> {
        if series.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let (open, high, low, close) = series.columns();
        let harami = self.last_value(PatternKind::Harami, &open, &high, &low, &close)?;
        let engulfing = self.last_value(PatternKind::Engulfing, &open, &high, &low, &close)?;

        debug!(
            symbol = %series.symbol(),
            bars = series.len(),
            harami,
            engulfing,
            "Pattern evaluated"
        );

        Ok(PatternReading::new(harami, engulfing))
    }

    fn last_value(
        &self,
        kind: PatternKind,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> IndicatorResult<i32> {
        let values = self.indicator.detect(kind, open, high, low, close)?;
        Ok(values.last().copied().unwrap_or(0))
    }
}
