//! Payoff engine: the four primitive legs and every composite strategy.
//!
//! All functions are pure. Composite strategies evaluate each leg with an
//! explicit [`LegQuote`]; the contract's own strike and premium are only the
//! defaults for the single-leg primitives. Every composite returns a
//! [`Breakdown`] holding each leg's payoff (ratio already applied) and the net.
//!
//! Once the contract has expired, option legs pay only their premium
//! (`-premium` long, `+premium` short) and ownership legs pay nothing, so every
//! strategy is flat in spot.

use crate::contract::Contract;
use crate::models::{Breakdown, Instrument, Leg, LegQuote, OptionStyle, Side, StrategyPayoff};
use crate::strategy::Strategy;

#[cfg(test)]
mod tests;

/// Stateless payoff calculator over a [`Contract`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffEngine {
    contract: Contract,
}

impl PayoffEngine {
    /// Creates a new engine for a contract.
    #[must_use]
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    /// The contract this engine evaluates.
    #[must_use]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// True iff the contract has expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.contract.expired()
    }

    /// Contract strike and premium as a quote.
    #[must_use]
    pub fn default_quote(&self) -> LegQuote {
        LegQuote::new(self.contract.strike(), self.contract.premium())
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    /// Long call at the contract strike and premium.
    #[must_use]
    pub fn long_call(&self, spot: f64) -> f64 {
        self.long_call_with(spot, self.default_quote())
    }

    /// Long put at the contract strike and premium.
    #[must_use]
    pub fn long_put(&self, spot: f64) -> f64 {
        self.long_put_with(spot, self.default_quote())
    }

    /// Short call at the contract strike and premium.
    #[must_use]
    pub fn short_call(&self, spot: f64) -> f64 {
        self.short_call_with(spot, self.default_quote())
    }

    /// Short put at the contract strike and premium.
    #[must_use]
    pub fn short_put(&self, spot: f64) -> f64 {
        self.short_put_with(spot, self.default_quote())
    }

    /// `max(S - K, 0) - p`, or `-p` once expired.
    #[must_use]
    pub fn long_call_with(&self, spot: f64, quote: LegQuote) -> f64 {
        if self.expired() {
            return -quote.premium;
        }
        intrinsic(spot - quote.strike) - quote.premium
    }

    /// `max(K - S, 0) - p`, or `-p` once expired.
    #[must_use]
    pub fn long_put_with(&self, spot: f64, quote: LegQuote) -> f64 {
        if self.expired() {
            return -quote.premium;
        }
        intrinsic(quote.strike - spot) - quote.premium
    }

    /// `p - max(S - K, 0)`, never above `p`; `p` once expired.
    #[must_use]
    pub fn short_call_with(&self, spot: f64, quote: LegQuote) -> f64 {
        if self.expired() {
            return quote.premium;
        }
        capped(quote.premium - intrinsic(spot - quote.strike), quote.premium)
    }

    /// `p - max(K - S, 0)`, never above `p`; `p` once expired.
    #[must_use]
    pub fn short_put_with(&self, spot: f64, quote: LegQuote) -> f64 {
        if self.expired() {
            return quote.premium;
        }
        capped(quote.premium - intrinsic(quote.strike - spot), quote.premium)
    }

    /// Ownership P&L against a cost basis; zero once expired.
    #[must_use]
    pub fn underlying_with(&self, spot: f64, side: Side, basis: f64) -> f64 {
        if self.expired() {
            return 0.0;
        }
        match side {
            Side::Long => spot - basis,
            Side::Short => basis - spot,
        }
    }

    /// Payoff of an arbitrary leg, ratio included.
    #[must_use]
    pub fn leg(&self, leg: &Leg, spot: f64) -> f64 {
        let quote = leg.quote();
        let unit = match (leg.instrument, leg.side) {
            (Instrument::Option(OptionStyle::Call), Side::Long) => self.long_call_with(spot, quote),
            (Instrument::Option(OptionStyle::Call), Side::Short) => {
                self.short_call_with(spot, quote)
            }
            (Instrument::Option(OptionStyle::Put), Side::Long) => self.long_put_with(spot, quote),
            (Instrument::Option(OptionStyle::Put), Side::Short) => self.short_put_with(spot, quote),
            (Instrument::Underlying, side) => self.underlying_with(spot, side, leg.strike),
        };
        unit * f64::from(leg.ratio)
    }

    /// Evaluates any catalogued strategy from its leg data.
    #[must_use]
    pub fn evaluate(&self, strategy: &Strategy, spot: f64) -> StrategyPayoff {
        let legs: Vec<f64> = strategy.legs().iter().map(|leg| self.leg(leg, spot)).collect();
        let net = legs.iter().sum();
        StrategyPayoff { legs, net }
    }

    // ------------------------------------------------------------------------
    // Straddles, synthetics, strap and strip (single strike)
    // ------------------------------------------------------------------------

    /// Long call and long put at the same strike.
    #[must_use]
    pub fn long_straddle(
        &self,
        spot: f64,
        strike: f64,
        call_premium: f64,
        put_premium: f64,
    ) -> Breakdown<2> {
        Breakdown::from_legs([
            self.long_call_with(spot, LegQuote::new(strike, call_premium)),
            self.long_put_with(spot, LegQuote::new(strike, put_premium)),
        ])
    }

    /// Short call and short put at the same strike.
    #[must_use]
    pub fn short_straddle(
        &self,
        spot: f64,
        strike: f64,
        call_premium: f64,
        put_premium: f64,
    ) -> Breakdown<2> {
        Breakdown::from_legs([
            self.short_call_with(spot, LegQuote::new(strike, call_premium)),
            self.short_put_with(spot, LegQuote::new(strike, put_premium)),
        ])
    }

    /// Long call plus short put at the same strike: synthetic long underlying.
    #[must_use]
    pub fn long_synthetic(
        &self,
        spot: f64,
        strike: f64,
        call_premium: f64,
        put_premium: f64,
    ) -> Breakdown<2> {
        Breakdown::from_legs([
            self.long_call_with(spot, LegQuote::new(strike, call_premium)),
            self.short_put_with(spot, LegQuote::new(strike, put_premium)),
        ])
    }

    /// Short call plus long put at the same strike: synthetic short underlying.
    #[must_use]
    pub fn short_synthetic(
        &self,
        spot: f64,
        strike: f64,
        call_premium: f64,
        put_premium: f64,
    ) -> Breakdown<2> {
        Breakdown::from_legs([
            self.short_call_with(spot, LegQuote::new(strike, call_premium)),
            self.long_put_with(spot, LegQuote::new(strike, put_premium)),
        ])
    }

    /// Two long calls for every long put, same strike.
    #[must_use]
    pub fn strap(&self, spot: f64, strike: f64, call_premium: f64, put_premium: f64) -> Breakdown<2> {
        Breakdown::from_legs([
            2.0 * self.long_call_with(spot, LegQuote::new(strike, call_premium)),
            self.long_put_with(spot, LegQuote::new(strike, put_premium)),
        ])
    }

    /// One long call for every two long puts, same strike.
    #[must_use]
    pub fn strip(&self, spot: f64, strike: f64, call_premium: f64, put_premium: f64) -> Breakdown<2> {
        Breakdown::from_legs([
            self.long_call_with(spot, LegQuote::new(strike, call_premium)),
            2.0 * self.long_put_with(spot, LegQuote::new(strike, put_premium)),
        ])
    }

    // ------------------------------------------------------------------------
    // Vertical spreads and backspreads (lower strike first)
    // ------------------------------------------------------------------------

    /// Long the lower call, short the upper call.
    #[must_use]
    pub fn bull_call_spread(&self, spot: f64, lower: LegQuote, upper: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            self.long_call_with(spot, lower),
            self.short_call_with(spot, upper),
        ])
    }

    /// Short the lower call, long the upper call.
    #[must_use]
    pub fn bear_call_spread(&self, spot: f64, lower: LegQuote, upper: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            self.short_call_with(spot, lower),
            self.long_call_with(spot, upper),
        ])
    }

    /// Long the lower put, short the upper put (net credit).
    #[must_use]
    pub fn bull_put_spread(&self, spot: f64, lower: LegQuote, upper: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            self.long_put_with(spot, lower),
            self.short_put_with(spot, upper),
        ])
    }

    /// Short the lower put, long the upper put (net debit).
    #[must_use]
    pub fn bear_put_spread(&self, spot: f64, lower: LegQuote, upper: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            self.short_put_with(spot, lower),
            self.long_put_with(spot, upper),
        ])
    }

    /// Two short calls at the lower strike, three long calls at the upper.
    #[must_use]
    pub fn call_backspread(&self, spot: f64, lower: LegQuote, upper: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            2.0 * self.short_call_with(spot, lower),
            3.0 * self.long_call_with(spot, upper),
        ])
    }

    /// Three long puts at the lower strike, two short puts at the upper.
    #[must_use]
    pub fn put_backspread(&self, spot: f64, lower: LegQuote, upper: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            3.0 * self.long_put_with(spot, lower),
            2.0 * self.short_put_with(spot, upper),
        ])
    }

    // ------------------------------------------------------------------------
    // Two-strike call/put combinations (put strike below call strike)
    // ------------------------------------------------------------------------

    /// Short put at the lower strike, long call at the upper strike.
    #[must_use]
    pub fn long_combo(&self, spot: f64, put: LegQuote, call: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([self.short_put_with(spot, put), self.long_call_with(spot, call)])
    }

    /// Long put at the lower strike, long call at the upper strike.
    #[must_use]
    pub fn long_strangle(&self, spot: f64, put: LegQuote, call: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([self.long_put_with(spot, put), self.long_call_with(spot, call)])
    }

    /// Short put at the lower strike, short call at the upper strike.
    #[must_use]
    pub fn short_strangle(&self, spot: f64, put: LegQuote, call: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([self.short_put_with(spot, put), self.short_call_with(spot, call)])
    }

    // ------------------------------------------------------------------------
    // Ladders (strikes ascending)
    // ------------------------------------------------------------------------

    /// Long the lowest call, short the two higher calls.
    #[must_use]
    pub fn long_call_ladder(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, mid, high] = quotes;
        Breakdown::from_legs([
            self.long_call_with(spot, low),
            self.short_call_with(spot, mid),
            self.short_call_with(spot, high),
        ])
    }

    /// Short the lowest call, long the two higher calls.
    #[must_use]
    pub fn short_call_ladder(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, mid, high] = quotes;
        Breakdown::from_legs([
            self.short_call_with(spot, low),
            self.long_call_with(spot, mid),
            self.long_call_with(spot, high),
        ])
    }

    /// Short the two lower puts, long the highest put.
    #[must_use]
    pub fn long_put_ladder(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, mid, high] = quotes;
        Breakdown::from_legs([
            self.short_put_with(spot, low),
            self.short_put_with(spot, mid),
            self.long_put_with(spot, high),
        ])
    }

    /// Long the two lower puts, short the highest put.
    #[must_use]
    pub fn short_put_ladder(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, mid, high] = quotes;
        Breakdown::from_legs([
            self.long_put_with(spot, low),
            self.long_put_with(spot, mid),
            self.short_put_with(spot, high),
        ])
    }

    // ------------------------------------------------------------------------
    // Butterflies and condors (strikes ascending)
    // ------------------------------------------------------------------------

    /// Long wings, two short calls at the body.
    #[must_use]
    pub fn long_call_butterfly(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, body, high] = quotes;
        Breakdown::from_legs([
            self.long_call_with(spot, low),
            2.0 * self.short_call_with(spot, body),
            self.long_call_with(spot, high),
        ])
    }

    /// Short wings, two long calls at the body.
    #[must_use]
    pub fn short_call_butterfly(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, body, high] = quotes;
        Breakdown::from_legs([
            self.short_call_with(spot, low),
            2.0 * self.long_call_with(spot, body),
            self.short_call_with(spot, high),
        ])
    }

    /// Long wings, two short puts at the body.
    #[must_use]
    pub fn long_put_butterfly(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, body, high] = quotes;
        Breakdown::from_legs([
            self.long_put_with(spot, low),
            2.0 * self.short_put_with(spot, body),
            self.long_put_with(spot, high),
        ])
    }

    /// Short wings, two long puts at the body.
    #[must_use]
    pub fn short_put_butterfly(&self, spot: f64, quotes: [LegQuote; 3]) -> Breakdown<3> {
        let [low, body, high] = quotes;
        Breakdown::from_legs([
            self.short_put_with(spot, low),
            2.0 * self.long_put_with(spot, body),
            self.short_put_with(spot, high),
        ])
    }

    /// Long outer calls, short inner calls.
    #[must_use]
    pub fn long_call_condor(&self, spot: f64, quotes: [LegQuote; 4]) -> Breakdown<4> {
        let [k1, k2, k3, k4] = quotes;
        Breakdown::from_legs([
            self.long_call_with(spot, k1),
            self.short_call_with(spot, k2),
            self.short_call_with(spot, k3),
            self.long_call_with(spot, k4),
        ])
    }

    /// Short outer calls, long inner calls.
    #[must_use]
    pub fn short_call_condor(&self, spot: f64, quotes: [LegQuote; 4]) -> Breakdown<4> {
        let [k1, k2, k3, k4] = quotes;
        Breakdown::from_legs([
            self.short_call_with(spot, k1),
            self.long_call_with(spot, k2),
            self.long_call_with(spot, k3),
            self.short_call_with(spot, k4),
        ])
    }

    // ------------------------------------------------------------------------
    // Positions against the underlying
    // ------------------------------------------------------------------------

    /// Owned underlying plus a short call.
    #[must_use]
    pub fn covered_call(&self, spot: f64, basis: f64, call: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            self.underlying_with(spot, Side::Long, basis),
            self.short_call_with(spot, call),
        ])
    }

    /// Shorted underlying plus a short put.
    #[must_use]
    pub fn covered_put(&self, spot: f64, basis: f64, put: LegQuote) -> Breakdown<2> {
        Breakdown::from_legs([
            self.underlying_with(spot, Side::Short, basis),
            self.short_put_with(spot, put),
        ])
    }

    /// Owned underlying, protective long put, financing short call.
    #[must_use]
    pub fn collar(&self, spot: f64, basis: f64, put: LegQuote, call: LegQuote) -> Breakdown<3> {
        Breakdown::from_legs([
            self.underlying_with(spot, Side::Long, basis),
            self.long_put_with(spot, put),
            self.short_call_with(spot, call),
        ])
    }
}

/// `max(x, 0)` that keeps NaN.
fn intrinsic(x: f64) -> f64 {
    if x < 0.0 { 0.0 } else { x }
}

/// `min(value, cap)` that keeps NaN.
fn capped(value: f64, cap: f64) -> f64 {
    if value > cap { cap } else { value }
}
