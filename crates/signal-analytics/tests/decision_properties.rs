//! 판단 규칙 속성 테스트.

use proptest::prelude::*;
use signal_analytics::decide;
use signal_core::{MarketContext, PatternReading, SignalAction};

fn market(rsi: f64, vix: f64, oi: f64) -> MarketContext {
    MarketContext {
        event_label: "Expiry".to_string(),
        nifty_level: 22000.0,
        rsi,
        vix,
        oi_change_percent: oi,
    }
}

proptest! {
    #[test]
    fn decide_is_deterministic(
        harami in -100i32..=100,
        engulfing in -100i32..=100,
        rsi in 0.0f64..100.0,
        vix in 5.0f64..80.0,
        oi in -50.0f64..50.0,
    ) {
        let reading = PatternReading::new(harami, engulfing);
        let ctx = market(rsi, vix, oi);
        prop_assert_eq!(decide(reading, &ctx), decide(reading, &ctx));
    }

    #[test]
    fn harami_always_wins(
        harami in prop_oneof![-100i32..=-1, 1i32..=100],
        engulfing in -100i32..=100,
        rsi in 0.0f64..100.0,
    ) {
        let decision = decide(PatternReading::new(harami, engulfing), &market(rsi, 15.0, 0.0));

        prop_assert_eq!(decision.pattern.as_str(), "Bullish Harami");
        prop_assert_eq!(decision.signal, SignalAction::BuyCe);
        let expected = if rsi < 40.0 { 85.0 } else { 70.0 };
        prop_assert_eq!(decision.confidence, expected);
    }

    #[test]
    fn engulfing_direction_follows_rsi(
        engulfing in prop_oneof![-100i32..=-1, 1i32..=100],
        rsi in 0.0f64..100.0,
    ) {
        let decision = decide(PatternReading::new(0, engulfing), &market(rsi, 15.0, 0.0));

        prop_assert_eq!(decision.pattern.as_str(), "Engulfing");
        prop_assert_eq!(decision.confidence, 80.0);
        let expected = if rsi < 50.0 { SignalAction::BuyCe } else { SignalAction::SellPe };
        prop_assert_eq!(decision.signal, expected);
    }

    #[test]
    fn confidence_stays_in_range(
        harami in -100i32..=100,
        engulfing in -100i32..=100,
        rsi in -1000.0f64..1000.0,
    ) {
        let decision = decide(PatternReading::new(harami, engulfing), &market(rsi, 15.0, 0.0));
        prop_assert!((0.0..=100.0).contains(&decision.confidence));
        prop_assert!(decision.source.is_none());
    }

    #[test]
    fn no_pattern_waits(rsi in 0.0f64..100.0, vix in 5.0f64..80.0) {
        let decision = decide(PatternReading::default(), &market(rsi, vix, 1.0));

        prop_assert_eq!(decision.signal, SignalAction::Wait);
        prop_assert_eq!(decision.confidence, 55.0);
        prop_assert!(decision.reason.starts_with("No pattern detected. RSI="));
    }
}
