//! 패턴 기반 트레이딩 시그널.
//!
//! 이 모듈은 시그널 판단에 관련된 타입을 정의합니다:
//! - `PatternReading` - 최근 캔들의 패턴 감지 값
//! - `MarketContext` - 호출자가 전달하는 시장 상황
//! - `SignalAction` - 권장 액션 (대기, 콜 매수, 풋 매도)
//! - `Decision` - 최종 판단 결과
//! - `DataSource` - 실제로 데이터를 제공한 소스

use serde::{Deserialize, Serialize};

/// 최근 캔들의 패턴 감지 값.
///
/// 0이면 패턴 없음, 0이 아니면 패턴 있음 (부호는 방향).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct PatternReading {
    /// 잉태형 (harami) 감지 값
    pub harami: i32,
    /// 장악형 (engulfing) 감지 값
    pub engulfing: i32,
}

impl PatternReading {
    /// 새 감지 값을 생성합니다.
    pub fn new(harami: i32, engulfing: i32) -> Self {
        Self { harami, engulfing }
    }

    /// 잉태형 패턴 존재 여부.
    pub fn has_harami(&self) -> bool {
        self.harami != 0
    }

    /// 장악형 패턴 존재 여부.
    pub fn has_engulfing(&self) -> bool {
        self.engulfing != 0
    }
}

/// 호출자가 전달하는 시장 상황.
///
/// RSI/VIX/OI 값은 검증 없이 신뢰합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct MarketContext {
    /// 이벤트 라벨 (현재 판단에 사용하지 않음)
    #[serde(rename = "event")]
    pub event_label: String,
    /// NIFTY 지수 수준 (현재 판단에 사용하지 않음)
    #[serde(rename = "nifty")]
    pub nifty_level: f64,
    /// RSI
    pub rsi: f64,
    /// VIX
    pub vix: f64,
    /// 미결제약정 변화율 (%)
    #[serde(rename = "oiChange")]
    pub oi_change_percent: f64,
}

/// 권장 액션.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum SignalAction {
    /// 관망
    #[serde(rename = "WAIT")]
    Wait,
    /// 콜옵션 매수
    #[serde(rename = "BUY CE")]
    BuyCe,
    /// 풋옵션 매도
    #[serde(rename = "SELL PE")]
    SellPe,
}

impl std::fmt::Display for SignalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalAction::Wait => write!(f, "WAIT"),
            SignalAction::BuyCe => write!(f, "BUY CE"),
            SignalAction::SellPe => write!(f, "SELL PE"),
        }
    }
}

/// 시세 데이터 제공자 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Yahoo Finance (1차)
    YahooFinance,
    /// Twelve Data (2차)
    TwelveData,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::YahooFinance => write!(f, "yahoo_finance"),
            ProviderKind::TwelveData => write!(f, "twelve_data"),
        }
    }
}

/// 실제로 캔들 데이터를 제공한 소스.
///
/// `substituted`가 true면 요청한 지수가 아닌 대체 심볼의 데이터입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct DataSource {
    /// 제공자
    pub provider: ProviderKind,
    /// 조회한 심볼
    pub symbol: String,
    /// 대체 심볼 사용 여부
    pub substituted: bool,
}

/// 시그널 판단 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Decision {
    /// 감지된 패턴 이름 ("Bullish Harami", "Engulfing", "None")
    pub pattern: String,
    /// 권장 액션
    pub signal: SignalAction,
    /// 신뢰도 (0 ~ 100)
    pub confidence: f64,
    /// 판단 근거
    pub reason: String,
    /// 데이터 소스 (판단 규칙 자체는 채우지 않음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
}

impl Decision {
    /// 데이터 소스를 설정합니다.
    #[must_use]
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = Some(source);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_context_wire_names() {
        let json = r#"{"event":"RBI policy","nifty":22150.5,"rsi":38.2,"vix":14.1,"oiChange":-3.5}"#;
        let ctx: MarketContext = serde_json::from_str(json).unwrap();

        assert_eq!(ctx.event_label, "RBI policy");
        assert_eq!(ctx.nifty_level, 22150.5);
        assert_eq!(ctx.rsi, 38.2);
        assert_eq!(ctx.vix, 14.1);
        assert_eq!(ctx.oi_change_percent, -3.5);
    }

    #[test]
    fn test_signal_action_serialization() {
        assert_eq!(serde_json::to_string(&SignalAction::Wait).unwrap(), r#""WAIT""#);
        assert_eq!(serde_json::to_string(&SignalAction::BuyCe).unwrap(), r#""BUY CE""#);
        assert_eq!(serde_json::to_string(&SignalAction::SellPe).unwrap(), r#""SELL PE""#);
        assert_eq!(SignalAction::SellPe.to_string(), "SELL PE");
    }

    #[test]
    fn test_decision_omits_missing_source() {
        let decision = Decision {
            pattern: "None".to_string(),
            signal: SignalAction::Wait,
            confidence: 55.0,
            reason: "No pattern detected.".to_string(),
            source: None,
        };
        let json = serde_json::to_string(&decision).unwrap();
        assert!(!json.contains("source"));

        let with_source = decision.with_source(DataSource {
            provider: ProviderKind::TwelveData,
            symbol: "INFY".to_string(),
            substituted: true,
        });
        let json = serde_json::to_string(&with_source).unwrap();
        assert!(json.contains(r#""provider":"twelve_data""#));
        assert!(json.contains(r#""substituted":true"#));
    }

    #[test]
    fn test_pattern_reading_presence() {
        assert!(!PatternReading::default().has_harami());
        assert!(PatternReading::new(-100, 0).has_harami());
        assert!(PatternReading::new(0, 80).has_engulfing());
    }
}
