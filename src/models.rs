//! Leg and payoff value types shared by the engine, strategies and curves.

use serde::{Deserialize, Serialize};

/// Option style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionStyle {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl std::fmt::Display for OptionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Bought (premium paid).
    Long,
    /// Sold or written (premium received).
    Short,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

/// What a leg holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    /// An option contract.
    Option(OptionStyle),
    /// Ownership of the underlying (covered and collar positions).
    Underlying,
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Option(style) => write!(f, "{}", style),
            Self::Underlying => write!(f, "underlying"),
        }
    }
}

/// Strike and premium of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegQuote {
    /// Strike price (cost basis for an underlying leg).
    pub strike: f64,
    /// Premium paid or received per unit.
    pub premium: f64,
}

impl LegQuote {
    /// Creates a new leg quote.
    #[must_use]
    pub const fn new(strike: f64, premium: f64) -> Self {
        Self { strike, premium }
    }
}

/// A fully specified position within a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Option style or underlying.
    pub instrument: Instrument,
    /// Long or short.
    pub side: Side,
    /// Integer multiple of this leg (2 for a butterfly body).
    pub ratio: u32,
    /// Strike price, or cost basis for the underlying.
    pub strike: f64,
    /// Premium per unit. Ignored for the underlying.
    pub premium: f64,
}

impl Leg {
    /// Creates a single-ratio option leg.
    #[must_use]
    pub const fn option(style: OptionStyle, side: Side, quote: LegQuote) -> Self {
        Self {
            instrument: Instrument::Option(style),
            side,
            ratio: 1,
            strike: quote.strike,
            premium: quote.premium,
        }
    }

    /// Creates an ownership leg with the given cost basis.
    #[must_use]
    pub const fn underlying(side: Side, basis: f64) -> Self {
        Self {
            instrument: Instrument::Underlying,
            side,
            ratio: 1,
            strike: basis,
            premium: 0.0,
        }
    }

    /// Returns this leg with a different ratio.
    #[must_use]
    pub const fn with_ratio(mut self, ratio: u32) -> Self {
        self.ratio = ratio;
        self
    }

    /// Strike and premium as a quote.
    #[must_use]
    pub const fn quote(&self) -> LegQuote {
        LegQuote::new(self.strike, self.premium)
    }
}

/// Per-leg payoffs plus their net, for a strategy with `N` legs.
///
/// Leg values already include the leg's ratio, so `net` is their plain sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown<const N: usize> {
    /// Payoff of each leg in composition order.
    #[serde(with = "serde_arrays")]
    pub legs: [f64; N],
    /// Net payoff of the whole position.
    pub net: f64,
}

impl<const N: usize> Breakdown<N> {
    /// Builds a breakdown, summing the legs into the net.
    #[must_use]
    pub fn from_legs(legs: [f64; N]) -> Self {
        let net = legs.iter().sum();
        Self { legs, net }
    }
}

impl<const N: usize> From<Breakdown<N>> for StrategyPayoff {
    fn from(breakdown: Breakdown<N>) -> Self {
        StrategyPayoff {
            legs: breakdown.legs.to_vec(),
            net: breakdown.net,
        }
    }
}

/// Per-leg payoffs plus their net for a strategy of any size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPayoff {
    /// Payoff of each leg in composition order.
    pub legs: Vec<f64>,
    /// Net payoff of the whole position.
    pub net: f64,
}

/// Serde has no blanket impl for const-generic arrays; go through a slice.
mod serde_arrays {
    use serde::Serializer;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer, const N: usize>(
        values: &[f64; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(N))?;
        for value in values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
