//! 시장 데이터 구조체.
//!
//! 이 모듈은 일봉 OHLCV 데이터 타입을 정의합니다:
//! - `Bar` - 하루치 OHLCV 캔들
//! - `BarSeries` - 시간 오름차순으로 정규화된 캔들 시퀀스

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 일봉 OHLCV 캔들.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Bar {
    /// 캔들 시작 시간
    pub time: DateTime<Utc>,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: f64,
}

impl Bar {
    /// 새 캔들을 생성합니다.
    pub fn new(time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// 시간 오름차순으로 정렬된 캔들 시퀀스.
///
/// 생성 시점에 정규화됩니다: 오래된 것부터 정렬하고, 같은 타임스탬프는
/// 마지막 값만 남기며, 요청 개수를 넘는 과거 캔들은 버립니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// 데이터를 제공한 심볼
    symbol: String,
    /// 오래된 것부터 정렬된 캔들
    bars: Vec<Bar>,
}

impl BarSeries {
    /// 캔들 목록을 정규화하여 시리즈를 생성합니다.
    ///
    /// # 인자
    /// * `symbol` - 데이터 소스 심볼
    /// * `bars` - 임의 순서의 캔들
    /// * `limit` - 유지할 최근 캔들 최대 개수
    pub fn normalized(symbol: impl Into<String>, mut bars: Vec<Bar>, limit: usize) -> Self {
        // 안정 정렬이므로 중복 타임스탬프는 입력 순서를 유지
        bars.sort_by_key(|b| b.time);

        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.time == bar.time => *last = bar,
                _ => deduped.push(bar),
            }
        }

        if deduped.len() > limit {
            let skip = deduped.len() - limit;
            deduped.drain(..skip);
        }

        Self {
            symbol: symbol.into(),
            bars: deduped,
        }
    }

    /// 최근 `limit`개 캔들만 남긴 시리즈.
    pub fn into_recent(mut self, limit: usize) -> Self {
        if self.bars.len() > limit {
            let skip = self.bars.len() - limit;
            self.bars.drain(..skip);
        }
        self
    }

    /// 데이터 소스 심볼.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 캔들 슬라이스 (오래된 것부터).
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// 캔들 개수.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 시가/고가/저가/종가 열을 분리해 반환합니다.
    pub fn columns(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let open = self.bars.iter().map(|b| b.open).collect();
        let high = self.bars.iter().map(|b| b.high).collect();
        let low = self.bars.iter().map(|b| b.low).collect();
        let close = self.bars.iter().map(|b| b.close).collect();
        (open, high, low, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(day: u32, close: f64) -> Bar {
        let time = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        Bar::new(time, close - 1.0, close + 1.0, close - 2.0, close, 1000.0)
    }

    #[test]
    fn test_normalized_sorts_ascending() {
        let series = BarSeries::normalized("^NSEI", vec![bar(3, 103.0), bar(1, 101.0), bar(2, 102.0)], 20);

        let closes: Vec<f64> = series.bars().iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![101.0, 102.0, 103.0]);
    }

    #[test]
    fn test_normalized_drops_duplicate_timestamps() {
        let series = BarSeries::normalized("^NSEI", vec![bar(1, 101.0), bar(1, 999.0), bar(2, 102.0)], 20);

        assert_eq!(series.len(), 2);
        // 같은 타임스탬프는 마지막 값이 남음
        assert_eq!(series.bars()[0].close, 999.0);
        for window in series.bars().windows(2) {
            assert!(window[0].time < window[1].time);
        }
    }

    #[test]
    fn test_normalized_keeps_most_recent() {
        let bars = (1..=10).map(|d| bar(d, 100.0 + d as f64)).collect();
        let series = BarSeries::normalized("^NSEI", bars, 3);

        assert_eq!(series.len(), 3);
        assert_eq!(series.bars().last().map(|b| b.close), Some(110.0));
        assert_eq!(series.bars()[0].close, 108.0);
    }

    #[test]
    fn test_columns_aligned() {
        let series = BarSeries::normalized("^NSEI", vec![bar(1, 101.0), bar(2, 102.0)], 20);
        let (open, high, low, close) = series.columns();

        assert_eq!(open, vec![100.0, 101.0]);
        assert_eq!(high, vec![102.0, 103.0]);
        assert_eq!(low, vec![99.0, 100.0]);
        assert_eq!(close, vec![101.0, 102.0]);
    }


    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalized_is_strictly_ascending_and_bounded(
                days in proptest::collection::vec(1u32..=28, 0..40),
                limit in 1usize..30,
            ) {
                let bars = days.iter().map(|&d| bar(d, 100.0 + d as f64)).collect();
                let series = BarSeries::normalized("^NSEI", bars, limit);

                prop_assert!(series.len() <= limit);
                for window in series.bars().windows(2) {
                    prop_assert!(window[0].time < window[1].time);
                }
                if let Some(max_day) = days.iter().max() {
                    prop_assert_eq!(series.bars().last().map(|b| b.close), Some(100.0 + *max_day as f64));
                }
            }
        }
    }
}
