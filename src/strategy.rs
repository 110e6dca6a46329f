//! Strategy catalogue.
//!
//! [`StrategyKind`] is the closed set of supported strategies. Each kind carries
//! its canonical leg composition as static data ([`LegTemplate`]), so a caller can
//! select a strategy by key and evaluate it through
//! [`PayoffEngine::evaluate`](crate::engine::PayoffEngine::evaluate) without any
//! per-strategy dispatch.

use crate::contract::Contract;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{Instrument, Leg, LegQuote, OptionStyle, Side};
use crate::models::Side::{Long as L, Short as S};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default spacing between strikes when legs are derived from a contract.
pub const DEFAULT_STRIKE_WIDTH: f64 = 10.0;

/// Coarse grouping used by strategy pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Single legs, straddles, synthetics, verticals and covered positions.
    Basic,
    /// Ratio, three-strike and four-strike structures.
    Advanced,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// One leg of a strategy's canonical composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegTemplate {
    /// Option style or underlying.
    pub instrument: Instrument,
    /// Long or short.
    pub side: Side,
    /// Integer multiple of the leg.
    pub ratio: u32,
    /// Index into the strategy's ascending strike ladder.
    pub slot: usize,
}

const fn call(side: Side, ratio: u32, slot: usize) -> LegTemplate {
    LegTemplate {
        instrument: Instrument::Option(OptionStyle::Call),
        side,
        ratio,
        slot,
    }
}

const fn put(side: Side, ratio: u32, slot: usize) -> LegTemplate {
    LegTemplate {
        instrument: Instrument::Option(OptionStyle::Put),
        side,
        ratio,
        slot,
    }
}

const fn stock(side: Side, slot: usize) -> LegTemplate {
    LegTemplate {
        instrument: Instrument::Underlying,
        side,
        ratio: 1,
        slot,
    }
}

const LONG_CALL: &[LegTemplate] = &[call(L, 1, 0)];
const LONG_PUT: &[LegTemplate] = &[put(L, 1, 0)];
const SHORT_CALL: &[LegTemplate] = &[call(S, 1, 0)];
const SHORT_PUT: &[LegTemplate] = &[put(S, 1, 0)];
const LONG_STRADDLE: &[LegTemplate] = &[call(L, 1, 0), put(L, 1, 0)];
const SHORT_STRADDLE: &[LegTemplate] = &[call(S, 1, 0), put(S, 1, 0)];
const LONG_SYNTHETIC: &[LegTemplate] = &[call(L, 1, 0), put(S, 1, 0)];
const SHORT_SYNTHETIC: &[LegTemplate] = &[call(S, 1, 0), put(L, 1, 0)];
const BULL_CALL_SPREAD: &[LegTemplate] = &[call(L, 1, 0), call(S, 1, 1)];
const BEAR_CALL_SPREAD: &[LegTemplate] = &[call(S, 1, 0), call(L, 1, 1)];
const BULL_PUT_SPREAD: &[LegTemplate] = &[put(L, 1, 0), put(S, 1, 1)];
const BEAR_PUT_SPREAD: &[LegTemplate] = &[put(S, 1, 0), put(L, 1, 1)];
const CALL_BACKSPREAD: &[LegTemplate] = &[call(S, 2, 0), call(L, 3, 1)];
const PUT_BACKSPREAD: &[LegTemplate] = &[put(L, 3, 0), put(S, 2, 1)];
const LONG_COMBO: &[LegTemplate] = &[put(S, 1, 0), call(L, 1, 1)];
const LONG_STRANGLE: &[LegTemplate] = &[put(L, 1, 0), call(L, 1, 1)];
const SHORT_STRANGLE: &[LegTemplate] = &[put(S, 1, 0), call(S, 1, 1)];
const STRAP: &[LegTemplate] = &[call(L, 2, 0), put(L, 1, 0)];
const STRIP: &[LegTemplate] = &[call(L, 1, 0), put(L, 2, 0)];
const LONG_CALL_LADDER: &[LegTemplate] = &[call(L, 1, 0), call(S, 1, 1), call(S, 1, 2)];
const SHORT_CALL_LADDER: &[LegTemplate] = &[call(S, 1, 0), call(L, 1, 1), call(L, 1, 2)];
const LONG_PUT_LADDER: &[LegTemplate] = &[put(S, 1, 0), put(S, 1, 1), put(L, 1, 2)];
const SHORT_PUT_LADDER: &[LegTemplate] = &[put(L, 1, 0), put(L, 1, 1), put(S, 1, 2)];
const LONG_CALL_BUTTERFLY: &[LegTemplate] = &[call(L, 1, 0), call(S, 2, 1), call(L, 1, 2)];
const SHORT_CALL_BUTTERFLY: &[LegTemplate] = &[call(S, 1, 0), call(L, 2, 1), call(S, 1, 2)];
const LONG_PUT_BUTTERFLY: &[LegTemplate] = &[put(L, 1, 0), put(S, 2, 1), put(L, 1, 2)];
const SHORT_PUT_BUTTERFLY: &[LegTemplate] = &[put(S, 1, 0), put(L, 2, 1), put(S, 1, 2)];
const LONG_CALL_CONDOR: &[LegTemplate] =
    &[call(L, 1, 0), call(S, 1, 1), call(S, 1, 2), call(L, 1, 3)];
const SHORT_CALL_CONDOR: &[LegTemplate] =
    &[call(S, 1, 0), call(L, 1, 1), call(L, 1, 2), call(S, 1, 3)];
const COVERED_CALL: &[LegTemplate] = &[stock(L, 0), call(S, 1, 0)];
const COVERED_PUT: &[LegTemplate] = &[stock(S, 0), put(S, 1, 0)];
const COLLAR: &[LegTemplate] = &[stock(L, 1), put(L, 1, 0), call(S, 1, 2)];

/// Every supported strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Buy a call.
    LongCall,
    /// Buy a put.
    LongPut,
    /// Write a call.
    ShortCall,
    /// Write a put.
    ShortPut,
    /// Long call and put, same strike.
    LongStraddle,
    /// Short call and put, same strike.
    ShortStraddle,
    /// Long call and short put, same strike.
    LongSynthetic,
    /// Short call and long put, same strike.
    ShortSynthetic,
    /// Long lower call, short upper call.
    BullCallSpread,
    /// Short lower call, long upper call.
    BearCallSpread,
    /// Long lower put, short upper put.
    BullPutSpread,
    /// Short lower put, long upper put.
    BearPutSpread,
    /// Two short lower calls, three long upper calls.
    CallBackspread,
    /// Three long lower puts, two short upper puts.
    PutBackspread,
    /// Short lower put, long upper call.
    LongCombo,
    /// Long lower put, long upper call.
    LongStrangle,
    /// Short lower put, short upper call.
    ShortStrangle,
    /// Two long calls per long put.
    Strap,
    /// Two long puts per long call.
    Strip,
    /// Long lowest call, short two higher calls.
    LongCallLadder,
    /// Short lowest call, long two higher calls.
    ShortCallLadder,
    /// Long highest put, short two lower puts.
    LongPutLadder,
    /// Short highest put, long two lower puts.
    ShortPutLadder,
    /// Long call wings, two short body calls.
    LongCallButterfly,
    /// Short call wings, two long body calls.
    ShortCallButterfly,
    /// Long put wings, two short body puts.
    LongPutButterfly,
    /// Short put wings, two long body puts.
    ShortPutButterfly,
    /// Long outer calls, short inner calls.
    LongCallCondor,
    /// Short outer calls, long inner calls.
    ShortCallCondor,
    /// Owned underlying plus short call.
    CoveredCall,
    /// Shorted underlying plus short put.
    CoveredPut,
    /// Owned underlying, long put, short call.
    Collar,
}

impl StrategyKind {
    /// All strategies in catalogue order.
    pub const ALL: [StrategyKind; 32] = [
        StrategyKind::LongCall,
        StrategyKind::LongPut,
        StrategyKind::ShortCall,
        StrategyKind::ShortPut,
        StrategyKind::LongStraddle,
        StrategyKind::ShortStraddle,
        StrategyKind::LongSynthetic,
        StrategyKind::ShortSynthetic,
        StrategyKind::BullCallSpread,
        StrategyKind::BearCallSpread,
        StrategyKind::BullPutSpread,
        StrategyKind::BearPutSpread,
        StrategyKind::CallBackspread,
        StrategyKind::PutBackspread,
        StrategyKind::LongCombo,
        StrategyKind::LongStrangle,
        StrategyKind::ShortStrangle,
        StrategyKind::Strap,
        StrategyKind::Strip,
        StrategyKind::LongCallLadder,
        StrategyKind::ShortCallLadder,
        StrategyKind::LongPutLadder,
        StrategyKind::ShortPutLadder,
        StrategyKind::LongCallButterfly,
        StrategyKind::ShortCallButterfly,
        StrategyKind::LongPutButterfly,
        StrategyKind::ShortPutButterfly,
        StrategyKind::LongCallCondor,
        StrategyKind::ShortCallCondor,
        StrategyKind::CoveredCall,
        StrategyKind::CoveredPut,
        StrategyKind::Collar,
    ];

    /// Snake-case key shared with strategy metadata.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LongCall => "long_call",
            Self::LongPut => "long_put",
            Self::ShortCall => "short_call",
            Self::ShortPut => "short_put",
            Self::LongStraddle => "long_straddle",
            Self::ShortStraddle => "short_straddle",
            Self::LongSynthetic => "long_synthetic",
            Self::ShortSynthetic => "short_synthetic",
            Self::BullCallSpread => "bull_call_spread",
            Self::BearCallSpread => "bear_call_spread",
            Self::BullPutSpread => "bull_put_spread",
            Self::BearPutSpread => "bear_put_spread",
            Self::CallBackspread => "call_backspread",
            Self::PutBackspread => "put_backspread",
            Self::LongCombo => "long_combo",
            Self::LongStrangle => "long_strangle",
            Self::ShortStrangle => "short_strangle",
            Self::Strap => "strap",
            Self::Strip => "strip",
            Self::LongCallLadder => "long_call_ladder",
            Self::ShortCallLadder => "short_call_ladder",
            Self::LongPutLadder => "long_put_ladder",
            Self::ShortPutLadder => "short_put_ladder",
            Self::LongCallButterfly => "long_call_butterfly",
            Self::ShortCallButterfly => "short_call_butterfly",
            Self::LongPutButterfly => "long_put_butterfly",
            Self::ShortPutButterfly => "short_put_butterfly",
            Self::LongCallCondor => "long_call_condor",
            Self::ShortCallCondor => "short_call_condor",
            Self::CoveredCall => "covered_call",
            Self::CoveredPut => "covered_put",
            Self::Collar => "collar",
        }
    }

    /// Human title, e.g. `"Bull Call Spread"`.
    #[must_use]
    pub fn label(self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Basic or advanced.
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::LongCall
            | Self::LongPut
            | Self::ShortCall
            | Self::ShortPut
            | Self::LongStraddle
            | Self::ShortStraddle
            | Self::LongSynthetic
            | Self::ShortSynthetic
            | Self::BullCallSpread
            | Self::BearCallSpread
            | Self::BullPutSpread
            | Self::BearPutSpread
            | Self::CoveredCall
            | Self::CoveredPut => Category::Basic,
            _ => Category::Advanced,
        }
    }

    /// Canonical leg composition.
    #[must_use]
    pub fn template(self) -> &'static [LegTemplate] {
        match self {
            Self::LongCall => LONG_CALL,
            Self::LongPut => LONG_PUT,
            Self::ShortCall => SHORT_CALL,
            Self::ShortPut => SHORT_PUT,
            Self::LongStraddle => LONG_STRADDLE,
            Self::ShortStraddle => SHORT_STRADDLE,
            Self::LongSynthetic => LONG_SYNTHETIC,
            Self::ShortSynthetic => SHORT_SYNTHETIC,
            Self::BullCallSpread => BULL_CALL_SPREAD,
            Self::BearCallSpread => BEAR_CALL_SPREAD,
            Self::BullPutSpread => BULL_PUT_SPREAD,
            Self::BearPutSpread => BEAR_PUT_SPREAD,
            Self::CallBackspread => CALL_BACKSPREAD,
            Self::PutBackspread => PUT_BACKSPREAD,
            Self::LongCombo => LONG_COMBO,
            Self::LongStrangle => LONG_STRANGLE,
            Self::ShortStrangle => SHORT_STRANGLE,
            Self::Strap => STRAP,
            Self::Strip => STRIP,
            Self::LongCallLadder => LONG_CALL_LADDER,
            Self::ShortCallLadder => SHORT_CALL_LADDER,
            Self::LongPutLadder => LONG_PUT_LADDER,
            Self::ShortPutLadder => SHORT_PUT_LADDER,
            Self::LongCallButterfly => LONG_CALL_BUTTERFLY,
            Self::ShortCallButterfly => SHORT_CALL_BUTTERFLY,
            Self::LongPutButterfly => LONG_PUT_BUTTERFLY,
            Self::ShortPutButterfly => SHORT_PUT_BUTTERFLY,
            Self::LongCallCondor => LONG_CALL_CONDOR,
            Self::ShortCallCondor => SHORT_CALL_CONDOR,
            Self::CoveredCall => COVERED_CALL,
            Self::CoveredPut => COVERED_PUT,
            Self::Collar => COLLAR,
        }
    }

    /// Number of legs.
    #[must_use]
    pub fn leg_count(self) -> usize {
        self.template().len()
    }

    /// Number of distinct strikes in the composition.
    #[must_use]
    pub fn strike_count(self) -> usize {
        self.template()
            .iter()
            .map(|leg| leg.slot + 1)
            .max()
            .unwrap_or(0)
    }

    /// Ascending strike ladder spaced `width` apart around `center`.
    #[must_use]
    pub fn default_strikes(self, center: f64, width: f64) -> Vec<f64> {
        match self.strike_count() {
            1 => vec![center],
            2 => vec![center - width, center + width],
            3 => vec![center - width, center, center + width],
            _ => vec![
                center - 2.0 * width,
                center - width,
                center + width,
                center + 2.0 * width,
            ],
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = PayoffError;

    /// Accepts `bull_call_spread`, `bull call spread`, `Bull Call Spread` or
    /// `bull-call-spread`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == key)
            .ok_or_else(|| PayoffError::UnknownStrategy(s.to_string()))
    }
}

/// A strategy bound to concrete strikes and premiums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strategy {
    kind: StrategyKind,
    legs: Vec<Leg>,
}

impl Strategy {
    /// Binds a strategy's template to one quote per leg, in template order.
    ///
    /// For an underlying leg the quote's strike is the cost basis.
    ///
    /// # Errors
    /// Returns [`PayoffError::InvalidParameter`] if the number of quotes does not
    /// match the template or any value is not finite.
    pub fn new(kind: StrategyKind, quotes: &[LegQuote]) -> PayoffResult<Self> {
        let template = kind.template();
        if quotes.len() != template.len() {
            return Err(PayoffError::InvalidParameter(format!(
                "{} needs {} legs, got {}",
                kind,
                template.len(),
                quotes.len()
            )));
        }
        if let Some(bad) = quotes
            .iter()
            .find(|q| !q.strike.is_finite() || !q.premium.is_finite())
        {
            return Err(PayoffError::InvalidParameter(format!(
                "{} leg has non-numeric strike or premium: {:?}",
                kind, bad
            )));
        }

        let legs = template
            .iter()
            .zip(quotes)
            .map(|(leg, quote)| {
                let built = match leg.instrument {
                    Instrument::Option(style) => Leg::option(style, leg.side, *quote),
                    Instrument::Underlying => Leg::underlying(leg.side, quote.strike),
                };
                built.with_ratio(leg.ratio)
            })
            .collect();

        Ok(Self { kind, legs })
    }

    /// Builds default legs from a contract: strikes spaced `width` apart around
    /// the contract strike, every option at the contract premium and any
    /// underlying held at the contract strike.
    ///
    /// # Errors
    /// Returns [`PayoffError::InvalidParameter`] if `width` is negative or not finite.
    pub fn from_contract(kind: StrategyKind, contract: &Contract, width: f64) -> PayoffResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(PayoffError::InvalidParameter(format!(
                "strike width must be a non-negative number, got {}",
                width
            )));
        }

        let strikes = kind.default_strikes(contract.strike(), width);
        let quotes: Vec<LegQuote> = kind
            .template()
            .iter()
            .map(|leg| match leg.instrument {
                Instrument::Underlying => LegQuote::new(contract.strike(), 0.0),
                Instrument::Option(_) => LegQuote::new(strikes[leg.slot], contract.premium()),
            })
            .collect();

        Self::new(kind, &quotes)
    }

    /// Strategy kind.
    #[must_use]
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Concrete legs in template order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }
}
