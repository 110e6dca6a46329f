//! Unit tests for the payoff engine.

use super::*;
use crate::strategy::StrategyKind;
use chrono::{DateTime, TimeZone, Utc};

const EPS: f64 = 1e-9;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn live(strike: f64, premium: f64) -> PayoffEngine {
    PayoffEngine::new(Contract::new(strike, Some(premium), "2024-12-31", Some(now())).unwrap())
}

fn expired(strike: f64, premium: f64) -> PayoffEngine {
    PayoffEngine::new(Contract::new(strike, Some(premium), "2024-01-19", Some(now())).unwrap())
}

fn q(strike: f64, premium: f64) -> LegQuote {
    LegQuote::new(strike, premium)
}

// ============================================================================
// Primitive Tests
// ============================================================================

#[test]
fn test_long_call_values() {
    let engine = live(100.0, 10.0);
    assert_eq!(engine.long_call(90.0), -10.0);
    assert_eq!(engine.long_call(100.0), -10.0);
    assert_eq!(engine.long_call(120.0), 10.0);
}

#[test]
fn test_long_put_values() {
    let engine = live(100.0, 10.0);
    assert_eq!(engine.long_put(80.0), 10.0);
    assert_eq!(engine.long_put(100.0), -10.0);
    assert_eq!(engine.long_put(130.0), -10.0);
}

#[test]
fn test_short_put_values() {
    let engine = live(100.0, 10.0);
    assert_eq!(engine.short_put(80.0), -10.0);
    assert_eq!(engine.short_put(100.0), 10.0);
    assert_eq!(engine.short_put(150.0), 10.0);
}

#[test]
fn test_short_call_capped_at_premium() {
    let engine = live(100.0, 10.0);
    for spot in [0.0, 50.0, 99.9, 100.0, 100.1, 150.0, 1_000_000.0] {
        assert!(engine.short_call(spot) <= 10.0);
        assert!(engine.short_put(spot) <= 10.0);
    }
    assert_eq!(engine.short_call(50.0), 10.0);
    assert_eq!(engine.short_call(130.0), -20.0);
}

#[test]
fn test_long_and_short_are_zero_sum() {
    let engine = live(100.0, 7.5);
    for spot in [0.0, 42.0, 92.5, 100.0, 107.5, 250.0] {
        assert_eq!(engine.long_call(spot) + engine.short_call(spot), 0.0);
        assert_eq!(engine.long_put(spot) + engine.short_put(spot), 0.0);
    }
}

#[test]
fn test_explicit_quote_ignores_contract_defaults() {
    let engine = live(100.0, 10.0);
    assert_eq!(engine.long_call_with(120.0, q(110.0, 4.0)), 6.0);
    assert_eq!(engine.long_put_with(95.0, q(105.0, 4.0)), 6.0);
    // Defaults unchanged after explicit evaluation.
    assert_eq!(engine.long_call(120.0), 10.0);
    assert_eq!(engine.default_quote(), q(100.0, 10.0));
}

#[test]
fn test_expired_primitives_are_premium_only() {
    let engine = expired(100.0, 10.0);
    assert!(engine.expired());
    for spot in [0.0, 100.0, 1_000_000.0] {
        assert_eq!(engine.long_call(spot), -10.0);
        assert_eq!(engine.long_put(spot), -10.0);
        assert_eq!(engine.short_call(spot), 10.0);
        assert_eq!(engine.short_put(spot), 10.0);
        assert_eq!(engine.underlying_with(spot, Side::Long, 100.0), 0.0);
    }
}

#[test]
fn test_underlying_pnl() {
    let engine = live(100.0, 10.0);
    assert_eq!(engine.underlying_with(120.0, Side::Long, 100.0), 20.0);
    assert_eq!(engine.underlying_with(120.0, Side::Short, 100.0), -20.0);
}

#[test]
fn test_leg_applies_ratio() {
    let engine = live(100.0, 10.0);
    let leg = Leg::option(OptionStyle::Call, Side::Short, q(100.0, 5.0)).with_ratio(2);
    assert_eq!(engine.leg(&leg, 110.0), -10.0);
}

// ============================================================================
// Single-Strike Composite Tests
// ============================================================================

#[test]
fn test_long_synthetic_matches_primitives() {
    let engine = live(100.0, 10.0);
    for spot in [60.0, 100.0, 140.0] {
        let synthetic = engine.long_synthetic(spot, 100.0, 10.0, 10.0);
        assert_eq!(synthetic.net, engine.long_call(spot) + engine.short_put(spot));
        // Synthetic long behaves like the underlying bought at the strike.
        assert_eq!(synthetic.net, spot - 100.0);
    }
}

#[test]
fn test_short_synthetic_mirrors_long() {
    let engine = live(100.0, 10.0);
    for spot in [60.0, 100.0, 140.0] {
        let long = engine.long_synthetic(spot, 100.0, 6.0, 4.0);
        let short = engine.short_synthetic(spot, 100.0, 6.0, 4.0);
        assert_eq!(long.net + short.net, 0.0);
    }
}

#[test]
fn test_long_straddle_symmetric() {
    let engine = live(100.0, 10.0);
    for d in [1.0, 5.0, 20.0, 75.0] {
        let up = engine.long_straddle(100.0 + d, 100.0, 6.0, 6.0);
        let down = engine.long_straddle(100.0 - d, 100.0, 6.0, 6.0);
        assert_eq!(up.net, down.net);
    }
    assert_eq!(engine.long_straddle(100.0, 100.0, 6.0, 6.0).net, -12.0);
}

#[test]
fn test_short_straddle_max_profit_at_strike() {
    let engine = live(100.0, 10.0);
    let at_strike = engine.short_straddle(100.0, 100.0, 6.0, 5.0);
    assert_eq!(at_strike.legs, [6.0, 5.0]);
    assert_eq!(at_strike.net, 11.0);
    assert!(engine.short_straddle(130.0, 100.0, 6.0, 5.0).net < at_strike.net);
}

#[test]
fn test_strap_and_strip_ratios() {
    let engine = live(100.0, 10.0);
    let strap = engine.strap(120.0, 100.0, 5.0, 4.0);
    assert_eq!(strap.legs, [30.0, -4.0]);
    let strip = engine.strip(80.0, 100.0, 5.0, 4.0);
    assert_eq!(strip.legs, [-5.0, 32.0]);
}

// ============================================================================
// Spread Tests
// ============================================================================

#[test]
fn test_bull_call_spread_scenario() {
    let engine = live(100.0, 10.0);
    let spread = engine.bull_call_spread(100.0, q(90.0, 8.0), q(110.0, 3.0));
    assert_eq!(spread.net, (100.0 - 90.0) - (8.0 - 3.0));
    assert_eq!(spread.net, 5.0);
}

#[test]
fn test_bull_call_spread_bounds() {
    let engine = live(100.0, 10.0);
    let (lower, upper) = (q(90.0, 8.0), q(110.0, 3.0));
    assert_eq!(engine.bull_call_spread(50.0, lower, upper).net, -5.0);
    assert_eq!(engine.bull_call_spread(500.0, lower, upper).net, 15.0);
}

#[test]
fn test_bear_call_spread_is_bull_reversed() {
    let engine = live(100.0, 10.0);
    let (lower, upper) = (q(90.0, 8.0), q(110.0, 3.0));
    for spot in [50.0, 95.0, 105.0, 200.0] {
        let bull = engine.bull_call_spread(spot, lower, upper).net;
        let bear = engine.bear_call_spread(spot, lower, upper).net;
        assert_eq!(bull + bear, 0.0);
    }
}

#[test]
fn test_put_spreads() {
    let engine = live(100.0, 10.0);
    let (lower, upper) = (q(90.0, 2.0), q(110.0, 9.0));
    // Bull put spread collects a net credit of 7 above the upper strike.
    assert_eq!(engine.bull_put_spread(120.0, lower, upper).net, 7.0);
    assert_eq!(engine.bull_put_spread(50.0, lower, upper).net, -13.0);
    // Bear put spread pays 7 and earns the width below the lower strike.
    assert_eq!(engine.bear_put_spread(120.0, lower, upper).net, -7.0);
    assert_eq!(engine.bear_put_spread(50.0, lower, upper).net, 13.0);
}

#[test]
fn test_call_backspread() {
    let engine = live(100.0, 10.0);
    let (lower, upper) = (q(100.0, 6.0), q(110.0, 2.0));
    // Below both strikes: keep 2 x 6 received, lose 3 x 2 paid.
    let low = engine.call_backspread(80.0, lower, upper);
    assert_eq!(low.legs, [12.0, -6.0]);
    assert_eq!(low.net, 6.0);
    // Far above: three long calls outrun the two short.
    assert!(engine.call_backspread(200.0, lower, upper).net > low.net);
}

#[test]
fn test_put_backspread() {
    let engine = live(100.0, 10.0);
    let (lower, upper) = (q(90.0, 2.0), q(100.0, 6.0));
    let high = engine.put_backspread(120.0, lower, upper);
    assert_eq!(high.legs, [-6.0, 12.0]);
    assert!(engine.put_backspread(10.0, lower, upper).net > high.net);
}

#[test]
fn test_long_combo_and_strangles() {
    let engine = live(100.0, 10.0);
    let (put, call) = (q(90.0, 3.0), q(110.0, 4.0));

    assert_eq!(engine.long_combo(100.0, put, call).net, -1.0);
    assert_eq!(engine.long_combo(130.0, put, call).net, 19.0);
    assert_eq!(engine.long_combo(70.0, put, call).net, -21.0);

    assert_eq!(engine.long_strangle(100.0, put, call).net, -7.0);
    assert_eq!(engine.long_strangle(130.0, put, call).net, 13.0);
    for spot in [60.0, 90.0, 100.0, 125.0] {
        assert_eq!(
            engine.long_strangle(spot, put, call).net + engine.short_strangle(spot, put, call).net,
            0.0
        );
    }
}

// ============================================================================
// Ladder, Butterfly and Condor Tests
// ============================================================================

#[test]
fn test_long_call_ladder() {
    let engine = live(100.0, 10.0);
    let quotes = [q(90.0, 12.0), q(100.0, 6.0), q(110.0, 3.0)];
    // Below 90: net credit 6 + 3 - 12.
    assert_eq!(engine.long_call_ladder(80.0, quotes).net, -3.0);
    // Between the upper strikes the position is capped.
    assert_eq!(engine.long_call_ladder(105.0, quotes).net, 7.0);
    // Above 110 it loses one-for-one.
    assert_eq!(engine.long_call_ladder(130.0, quotes).net, -13.0);
    for spot in [80.0, 105.0, 130.0] {
        assert_eq!(
            engine.long_call_ladder(spot, quotes).net + engine.short_call_ladder(spot, quotes).net,
            0.0
        );
    }
}

#[test]
fn test_long_put_ladder() {
    let engine = live(100.0, 10.0);
    let quotes = [q(90.0, 3.0), q(100.0, 6.0), q(110.0, 12.0)];
    assert_eq!(engine.long_put_ladder(120.0, quotes).net, -3.0);
    assert_eq!(engine.long_put_ladder(95.0, quotes).net, 7.0);
    assert_eq!(engine.long_put_ladder(70.0, quotes).net, -13.0);
    assert_eq!(
        engine.short_put_ladder(70.0, quotes).net,
        -engine.long_put_ladder(70.0, quotes).net
    );
}

#[test]
fn test_long_call_butterfly_peaks_at_body() {
    let engine = live(100.0, 10.0);
    let quotes = [q(90.0, 12.0), q(100.0, 6.0), q(110.0, 12.0)];
    let body = engine.long_call_butterfly(100.0, quotes);
    assert_eq!(body.legs, [-2.0, 12.0, -12.0]);
    for spot in [80.0, 90.0, 95.0, 99.0, 101.0, 105.0, 110.0, 130.0] {
        assert!(engine.long_call_butterfly(spot, quotes).net <= body.net);
    }
}

#[test]
fn test_put_butterfly_wings_flat() {
    let engine = live(100.0, 10.0);
    let quotes = [q(90.0, 2.0), q(100.0, 5.0), q(110.0, 11.0)];
    let far_low = engine.long_put_butterfly(10.0, quotes).net;
    let low = engine.long_put_butterfly(85.0, quotes).net;
    let high = engine.long_put_butterfly(150.0, quotes).net;
    assert!((far_low - low).abs() < EPS);
    assert!((low - high).abs() < EPS);
    assert!(engine.long_put_butterfly(100.0, quotes).net > high);
    assert_eq!(
        engine.short_put_butterfly(100.0, quotes).net,
        -engine.long_put_butterfly(100.0, quotes).net
    );
}

#[test]
fn test_short_call_butterfly_inverts_long() {
    let engine = live(100.0, 10.0);
    let quotes = [q(90.0, 12.0), q(100.0, 6.0), q(110.0, 2.0)];
    for spot in [80.0, 100.0, 120.0] {
        assert_eq!(
            engine.long_call_butterfly(spot, quotes).net
                + engine.short_call_butterfly(spot, quotes).net,
            0.0
        );
    }
}

#[test]
fn test_long_call_condor_plateau() {
    let engine = live(100.0, 10.0);
    let quotes = [q(80.0, 22.0), q(90.0, 14.0), q(110.0, 4.0), q(120.0, 1.0)];
    // Net debit 22 + 1 - 14 - 4 = 5; plateau of width 10 between inner strikes.
    assert_eq!(engine.long_call_condor(70.0, quotes).net, -5.0);
    assert_eq!(engine.long_call_condor(95.0, quotes).net, 5.0);
    assert_eq!(engine.long_call_condor(105.0, quotes).net, 5.0);
    assert_eq!(engine.long_call_condor(150.0, quotes).net, -5.0);
    assert_eq!(engine.short_call_condor(100.0, quotes).net, -5.0);
    assert_eq!(engine.long_call_condor(100.0, quotes).legs.len(), 4);
}

// ============================================================================
// Covered and Collar Tests
// ============================================================================

#[test]
fn test_covered_call() {
    let engine = live(100.0, 10.0);
    let call = q(100.0, 5.0);
    assert_eq!(engine.covered_call(80.0, 100.0, call).net, -15.0);
    assert_eq!(engine.covered_call(150.0, 100.0, call).net, 5.0);
    assert_eq!(engine.covered_call(150.0, 100.0, call).legs, [50.0, -45.0]);
}

#[test]
fn test_covered_put() {
    let engine = live(100.0, 10.0);
    let put = q(100.0, 5.0);
    assert_eq!(engine.covered_put(120.0, 100.0, put).net, -15.0);
    assert_eq!(engine.covered_put(50.0, 100.0, put).net, 5.0);
}

#[test]
fn test_collar_bounded() {
    let engine = live(100.0, 10.0);
    let (put, call) = (q(90.0, 3.0), q(110.0, 3.0));
    assert_eq!(engine.collar(10.0, 100.0, put, call).net, -10.0);
    assert_eq!(engine.collar(500.0, 100.0, put, call).net, 10.0);
    assert_eq!(engine.collar(100.0, 100.0, put, call).net, 0.0);
}

// ============================================================================
// Expiration Tests
// ============================================================================

#[test]
fn test_expired_composites_flat() {
    let engine = expired(100.0, 10.0);
    let quotes3 = [q(90.0, 12.0), q(100.0, 6.0), q(110.0, 2.0)];
    let at_zero = engine.long_call_butterfly(0.0, quotes3);
    let at_big = engine.long_call_butterfly(1_000_000.0, quotes3);
    assert_eq!(at_zero, at_big);
    assert_eq!(at_zero.net, -12.0 + 12.0 - 2.0);

    assert_eq!(
        engine.collar(0.0, 100.0, q(90.0, 3.0), q(110.0, 4.0)),
        engine.collar(1_000_000.0, 100.0, q(90.0, 3.0), q(110.0, 4.0))
    );
    assert_eq!(engine.covered_call(0.0, 100.0, q(100.0, 5.0)).net, 5.0);
}

// ============================================================================
// Data-Driven Evaluation Tests
// ============================================================================

#[test]
fn test_evaluate_matches_typed_spread() {
    let engine = live(100.0, 10.0);
    let strategy = Strategy::new(
        StrategyKind::BullCallSpread,
        &[q(90.0, 8.0), q(110.0, 3.0)],
    )
    .unwrap();
    for spot in [70.0, 100.0, 130.0] {
        let typed: StrategyPayoff = engine
            .bull_call_spread(spot, q(90.0, 8.0), q(110.0, 3.0))
            .into();
        assert_eq!(engine.evaluate(&strategy, spot), typed);
    }
}

#[test]
fn test_evaluate_matches_typed_collar() {
    let engine = live(100.0, 10.0);
    let strategy = Strategy::from_contract(StrategyKind::Collar, engine.contract(), 10.0).unwrap();
    for spot in [70.0, 100.0, 130.0] {
        let typed: StrategyPayoff = engine.collar(spot, 100.0, q(90.0, 10.0), q(110.0, 10.0)).into();
        assert_eq!(engine.evaluate(&strategy, spot), typed);
    }
}

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PayoffEngine>();
}

// ============================================================================
// Non-Numeric Input Tests
// ============================================================================

#[test]
fn test_nan_spot_propagates_through_primitives() {
    let engine = live(100.0, 10.0);
    assert!(engine.long_call(f64::NAN).is_nan());
    assert!(engine.long_put(f64::NAN).is_nan());
    assert!(engine.short_call(f64::NAN).is_nan());
    assert!(engine.short_put(f64::NAN).is_nan());
}

#[test]
fn test_nan_strike_propagates() {
    let engine = live(100.0, 10.0);
    assert!(engine.long_call_with(120.0, q(f64::NAN, 4.0)).is_nan());
    assert!(engine.short_put_with(80.0, q(f64::NAN, 4.0)).is_nan());
}

#[test]
fn test_nan_spot_propagates_through_every_leg() {
    let engine = live(100.0, 10.0);
    let covered = engine.covered_call(f64::NAN, 100.0, q(110.0, 5.0));
    assert!(covered.legs.iter().all(|value| value.is_nan()));
    assert!(covered.net.is_nan());

    let spread = engine.bull_call_spread(f64::NAN, q(90.0, 8.0), q(110.0, 3.0));
    assert!(spread.legs.iter().all(|value| value.is_nan()));
}
