//! Shared helpers for the payoff engine integration tests.

use chrono::{DateTime, TimeZone, Utc};
use option_payoff_engine::contract::Contract;
use option_payoff_engine::engine::PayoffEngine;
use option_payoff_engine::models::{LegQuote, StrategyPayoff};
use option_payoff_engine::strategy::{Strategy, StrategyKind};

/// Tolerance for float comparisons that involve non-trivial arithmetic.
pub const EPSILON: f64 = 1e-9;

/// Fixed evaluation instant used by every test.
///
/// # Panics
/// Panics if the timestamp is not a valid UTC instant.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 15, 30, 0).unwrap()
}

/// Engine over a contract expiring after [`fixed_now`].
///
/// # Panics
/// Panics if the contract parameters are rejected.
#[must_use]
pub fn live_engine(strike: f64, premium: f64) -> PayoffEngine {
    let contract = Contract::new(strike, Some(premium), "2024-12-20", Some(fixed_now()))
        .expect("valid contract");
    PayoffEngine::new(contract)
}

/// Engine over a contract that expired before [`fixed_now`].
///
/// # Panics
/// Panics if the contract parameters are rejected.
#[must_use]
pub fn expired_engine(strike: f64, premium: f64) -> PayoffEngine {
    let contract = Contract::new(strike, Some(premium), "2024-03-15", Some(fixed_now()))
        .expect("valid contract");
    PayoffEngine::new(contract)
}

/// Asserts two floats agree within [`EPSILON`].
///
/// # Panics
/// Panics if they differ.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Evaluates a strategy through the engine's typed method for its kind.
///
/// # Panics
/// Panics if the strategy's legs do not match its kind.
#[must_use]
pub fn typed_payoff(engine: &PayoffEngine, strategy: &Strategy, spot: f64) -> StrategyPayoff {
    let q: Vec<LegQuote> = strategy.legs().iter().map(|leg| leg.quote()).collect();
    let e = engine;
    match strategy.kind() {
        StrategyKind::LongCall => single(e.long_call_with(spot, q[0])),
        StrategyKind::LongPut => single(e.long_put_with(spot, q[0])),
        StrategyKind::ShortCall => single(e.short_call_with(spot, q[0])),
        StrategyKind::ShortPut => single(e.short_put_with(spot, q[0])),
        StrategyKind::LongStraddle => {
            e.long_straddle(spot, q[0].strike, q[0].premium, q[1].premium).into()
        }
        StrategyKind::ShortStraddle => {
            e.short_straddle(spot, q[0].strike, q[0].premium, q[1].premium).into()
        }
        StrategyKind::LongSynthetic => {
            e.long_synthetic(spot, q[0].strike, q[0].premium, q[1].premium).into()
        }
        StrategyKind::ShortSynthetic => {
            e.short_synthetic(spot, q[0].strike, q[0].premium, q[1].premium).into()
        }
        StrategyKind::BullCallSpread => e.bull_call_spread(spot, q[0], q[1]).into(),
        StrategyKind::BearCallSpread => e.bear_call_spread(spot, q[0], q[1]).into(),
        StrategyKind::BullPutSpread => e.bull_put_spread(spot, q[0], q[1]).into(),
        StrategyKind::BearPutSpread => e.bear_put_spread(spot, q[0], q[1]).into(),
        StrategyKind::CallBackspread => e.call_backspread(spot, q[0], q[1]).into(),
        StrategyKind::PutBackspread => e.put_backspread(spot, q[0], q[1]).into(),
        StrategyKind::LongCombo => e.long_combo(spot, q[0], q[1]).into(),
        StrategyKind::LongStrangle => e.long_strangle(spot, q[0], q[1]).into(),
        StrategyKind::ShortStrangle => e.short_strangle(spot, q[0], q[1]).into(),
        StrategyKind::Strap => e.strap(spot, q[0].strike, q[0].premium, q[1].premium).into(),
        StrategyKind::Strip => e.strip(spot, q[0].strike, q[0].premium, q[1].premium).into(),
        StrategyKind::LongCallLadder => e.long_call_ladder(spot, [q[0], q[1], q[2]]).into(),
        StrategyKind::ShortCallLadder => e.short_call_ladder(spot, [q[0], q[1], q[2]]).into(),
        StrategyKind::LongPutLadder => e.long_put_ladder(spot, [q[0], q[1], q[2]]).into(),
        StrategyKind::ShortPutLadder => e.short_put_ladder(spot, [q[0], q[1], q[2]]).into(),
        StrategyKind::LongCallButterfly => {
            e.long_call_butterfly(spot, [q[0], q[1], q[2]]).into()
        }
        StrategyKind::ShortCallButterfly => {
            e.short_call_butterfly(spot, [q[0], q[1], q[2]]).into()
        }
        StrategyKind::LongPutButterfly => e.long_put_butterfly(spot, [q[0], q[1], q[2]]).into(),
        StrategyKind::ShortPutButterfly => {
            e.short_put_butterfly(spot, [q[0], q[1], q[2]]).into()
        }
        StrategyKind::LongCallCondor => e.long_call_condor(spot, [q[0], q[1], q[2], q[3]]).into(),
        StrategyKind::ShortCallCondor => {
            e.short_call_condor(spot, [q[0], q[1], q[2], q[3]]).into()
        }
        StrategyKind::CoveredCall => e.covered_call(spot, q[0].strike, q[1]).into(),
        StrategyKind::CoveredPut => e.covered_put(spot, q[0].strike, q[1]).into(),
        StrategyKind::Collar => e.collar(spot, q[0].strike, q[1], q[2]).into(),
    }
}

fn single(value: f64) -> StrategyPayoff {
    StrategyPayoff {
        legs: vec![value],
        net: value,
    }
}

/// Every catalogued strategy with default legs around the engine's contract.
///
/// # Panics
/// Panics if a default strategy cannot be built.
#[must_use]
pub fn default_strategies(engine: &PayoffEngine, width: f64) -> Vec<Strategy> {
    StrategyKind::ALL
        .into_iter()
        .map(|kind| Strategy::from_contract(kind, engine.contract(), width).expect("defaults"))
        .collect()
}
