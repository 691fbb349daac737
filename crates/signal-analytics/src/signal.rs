//! 패턴 시그널 판단 규칙.
//!
//! 패턴 감지 값과 시장 상황으로 옵션 방향을 결정합니다.
//!
//! | 우선순위 | 조건 | 패턴 | 시그널 | 신뢰도 |
//! |---|---|---|---|---|
//! | 1 | 하라미 | "Bullish Harami" | BUY CE | RSI < 40 이면 85, 아니면 70 |
//! | 2 | 장악형 | "Engulfing" | RSI < 50 이면 BUY CE, 아니면 SELL PE | 80 |
//! | 3 | 없음 | "None" | WAIT | 55 |
//!
//! 하라미는 방향과 무관하게 "Bullish Harami"로 보고합니다.

use signal_core::{Decision, MarketContext, PatternReading, SignalAction};

/// 하라미 패턴 이름.
pub const HARAMI_PATTERN: &str = "Bullish Harami";
/// 장악형 패턴 이름.
pub const ENGULFING_PATTERN: &str = "Engulfing";
/// 패턴 없음.
pub const NO_PATTERN: &str = "None";

/// 하라미 고신뢰 RSI 상한 (미만).
const HARAMI_OVERSOLD_RSI: f64 = 40.0;
/// 장악형 콜 매수 RSI 상한 (미만).
const ENGULFING_BUY_RSI: f64 = 50.0;

const HARAMI_OVERSOLD_CONFIDENCE: f64 = 85.0;
const HARAMI_CONFIDENCE: f64 = 70.0;
const ENGULFING_CONFIDENCE: f64 = 80.0;
const WAIT_CONFIDENCE: f64 = 55.0;

/// 패턴 감지 값과 시장 상황으로 판단 결과를 생성합니다.
///
/// 순수 함수이며 `source`는 비워 둡니다. `event_label`과 `nifty_level`은 사용하지 않습니다.
pub fn decide(reading: PatternReading, ctx: &MarketContext) -> Decision {
    let (pattern, signal, confidence) = if reading.has_harami() {
        let confidence = if ctx.rsi < HARAMI_OVERSOLD_RSI {
            HARAMI_OVERSOLD_CONFIDENCE
        } else {
            HARAMI_CONFIDENCE
        };
        (HARAMI_PATTERN, SignalAction::BuyCe, confidence)
    } else if reading.has_engulfing() {
        let signal = if ctx.rsi < ENGULFING_BUY_RSI {
            SignalAction::BuyCe
        } else {
            SignalAction::SellPe
        };
        (ENGULFING_PATTERN, signal, ENGULFING_CONFIDENCE)
    } else {
        (NO_PATTERN, SignalAction::Wait, WAIT_CONFIDENCE)
    };

    let reason = if signal == SignalAction::Wait {
        format!("No pattern detected. {}", context_summary(ctx))
    } else {
        format!("{} + {}", pattern, context_summary(ctx))
    };

    Decision {
        pattern: pattern.to_string(),
        signal,
        confidence,
        reason,
        source: None,
    }
}

/// "RSI=.., VIX=.., OI Change=..%" 형식.
fn context_summary(ctx: &MarketContext) -> String {
    format!(
        "RSI={}, VIX={}, OI Change={}%",
        format_number(ctx.rsi),
        format_number(ctx.vix),
        format_number(ctx.oi_change_percent)
    )
}

/// 최단 왕복 표기로 숫자를 출력합니다.
///
/// 정수 값도 `35.0`처럼 소수점을 유지하고, 지수 표기는 부호와 두 자리 이상의
/// 지수를 씁니다 (`1e-05`, `1.5e+16`).
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => repr,
        },
        None => repr,
    }
}
