//! 캔들 패턴 감지 지표.
//!
//! 2봉 반전 패턴을 감지하여 각 시점의 신호 값을 제공합니다.
//!
//! ## 지원 패턴
//! - **하라미 (Harami)**: 긴 몸통 다음의 짧은 몸통이 이전 몸통 안에 위치
//! - **장악형 (Engulfing)**: 현재 몸통이 반대 색의 이전 몸통을 감쌈
//!
//! ## 신호 값
//! - `0`: 패턴 없음
//! - `±100`: 완전한 패턴
//! - `±80`: 몸통 한쪽 끝이 이전 캔들과 일치
//!
//! 부호가 양수면 강세, 음수면 약세입니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// 몸통 평균 계산 기간 (하라미).
const BODY_AVG_PERIOD: usize = 10;

/// 하라미 판단에 필요한 선행 캔들 수.
///
/// 이전 캔들의 몸통 평균을 구하려면 그 앞에 `BODY_AVG_PERIOD`개가 필요합니다.
const HARAMI_LOOKBACK: usize = BODY_AVG_PERIOD + 1;

/// 완전한 패턴 값.
const FULL_SIGNAL: i32 = 100;

/// 한쪽 끝이 일치하는 패턴 값.
const PARTIAL_SIGNAL: i32 = 80;

/// 캔들 패턴 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// 하라미 (잉태형).
    Harami,
    /// 장악형.
    Engulfing,
}

impl PatternKind {
    /// 지표 이름 (TA-Lib 관례).
    pub fn indicator_name(&self) -> &'static str {
        match self {
            PatternKind::Harami => "cdl_harami",
            PatternKind::Engulfing => "cdl_engulfing",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indicator_name())
    }
}

impl FromStr for PatternKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cdl_harami" | "harami" => Ok(PatternKind::Harami),
            "cdl_engulfing" | "engulfing" => Ok(PatternKind::Engulfing),
            other => Err(IndicatorError::InvalidParameter(format!(
                "unknown candle pattern: {}",
                other
            ))),
        }
    }
}

/// 캔들 데이터.
#[derive(Debug, Clone, Copy)]
struct Candle {
    open: f64,
    close: f64,
}

impl Candle {
    fn at(open: &[f64], close: &[f64], index: usize) -> Self {
        Self {
            open: open[index],
            close: close[index],
        }
    }

    /// 캔들 몸통 크기.
    fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// 몸통 상단.
    fn body_top(&self) -> f64 {
        self.open.max(self.close)
    }

    /// 몸통 하단.
    fn body_bottom(&self) -> f64 {
        self.open.min(self.close)
    }

    /// 캔들 색 (종가 ≥ 시가면 +1, 아니면 -1).
    fn color(&self) -> i32 {
        if self.close >= self.open {
            1
        } else {
            -1
        }
    }
}

/// 캔들 패턴 감지기.
#[derive(Debug, Default, Clone, Copy)]
pub struct CandlePatternIndicator;

impl CandlePatternIndicator {
    /// 새로운 캔들 패턴 감지기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 캔들 패턴 감지.
    ///
    /// # 인자
    /// * `kind` - 감지할 패턴
    /// * `open` - 시가 데이터
    /// * `high` - 고가 데이터
    /// * `low` - 저가 데이터
    /// * `close` - 종가 데이터
    ///
    /// # 반환
    /// 입력과 같은 길이의 신호 값 (0 = 패턴 없음)
    pub fn detect(
        &self,
        kind: PatternKind,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> IndicatorResult<Vec<i32>> {
        if open.len() != high.len() || open.len() != low.len() || open.len() != close.len() {
            return Err(IndicatorError::InvalidParameter(format!(
                "OHLC length mismatch: open={}, high={}, low={}, close={}",
                open.len(),
                high.len(),
                low.len(),
                close.len()
            )));
        }

        let result = (0..open.len())
            .map(|i| match kind {
                PatternKind::Harami => self.harami_at(open, close, i),
                PatternKind::Engulfing => self.engulfing_at(open, close, i),
            })
            .collect();

        Ok(result)
    }

    /// `index` 위치의 장악형 신호.
    fn engulfing_at(&self, open: &[f64], close: &[f64], index: usize) -> i32 {
        if index < 1 {
            return 0;
        }

        let prev = Candle::at(open, close, index - 1);
        let curr = Candle::at(open, close, index);

        // 양봉이 음봉을 감쌈 (한쪽 끝은 같아도 됨)
        let bullish = curr.color() == 1
            && prev.color() == -1
            && ((curr.close >= prev.open && curr.open < prev.close)
                || (curr.close > prev.open && curr.open <= prev.close));

        // 음봉이 양봉을 감쌈
        let bearish = curr.color() == -1
            && prev.color() == 1
            && ((curr.open >= prev.close && curr.close < prev.open)
                || (curr.open > prev.close && curr.close <= prev.open));

        if !bullish && !bearish {
            return 0;
        }

        let strict = curr.open != prev.close && curr.close != prev.open;
        let magnitude = if strict { FULL_SIGNAL } else { PARTIAL_SIGNAL };
        curr.color() * magnitude
    }

    /// `index` 위치의 하라미 신호.
    fn harami_at(&self, open: &[f64], close: &[f64], index: usize) -> i32 {
        if index < HARAMI_LOOKBACK {
            return 0;
        }

        let prev = Candle::at(open, close, index - 1);
        let curr = Candle::at(open, close, index);

        // 이전 캔들은 긴 몸통, 현재 캔들은 짧은 몸통
        let prev_avg = Self::average_body(open, close, index - 1);
        let curr_avg = Self::average_body(open, close, index);
        if prev.body() <= prev_avg || curr.body() > curr_avg {
            return 0;
        }

        let sign = -prev.color();

        if curr.body_top() < prev.body_top() && curr.body_bottom() > prev.body_bottom() {
            sign * FULL_SIGNAL
        } else if curr.body_top() <= prev.body_top() && curr.body_bottom() >= prev.body_bottom() {
            sign * PARTIAL_SIGNAL
        } else {
            0
        }
    }

    /// `index` 직전 `BODY_AVG_PERIOD`개 캔들의 평균 몸통 크기.
    fn average_body(open: &[f64], close: &[f64], index: usize) -> f64 {
        let start = index.saturating_sub(BODY_AVG_PERIOD);
        let window = index - start;
        if window == 0 {
            return 0.0;
        }

        let sum: f64 = (start..index)
            .map(|i| Candle::at(open, close, i).body())
            .sum();
        sum / window as f64
    }
}
