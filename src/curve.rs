//! Payoff curves over a range of spot prices.
//!
//! Every sample is evaluated independently, so batches are mapped with rayon
//! and collected back in input order.

use crate::engine::PayoffEngine;
use crate::error::{PayoffError, PayoffResult};
use crate::strategy::Strategy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `samples` evenly spaced values from `start` to `end`, both inclusive.
#[must_use]
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Spot price sampling range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotRange {
    /// Lowest spot sampled.
    pub lower: f64,
    /// Highest spot sampled.
    pub upper: f64,
    /// Number of samples.
    pub samples: usize,
}

impl SpotRange {
    /// Creates a validated range.
    ///
    /// # Errors
    /// Returns [`PayoffError::InvalidParameter`] if a bound is not finite or
    /// `lower > upper`.
    pub fn new(lower: f64, upper: f64, samples: usize) -> PayoffResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(PayoffError::InvalidParameter(format!(
                "spot range bounds must be finite, got {}..{}",
                lower, upper
            )));
        }
        if lower > upper {
            return Err(PayoffError::InvalidParameter(format!(
                "spot range lower bound {} exceeds upper bound {}",
                lower, upper
            )));
        }
        Ok(Self {
            lower,
            upper,
            samples,
        })
    }

    /// `strike ± strike × factor`, floored at zero.
    ///
    /// # Errors
    /// Returns [`PayoffError::InvalidParameter`] for a negative or non-finite factor.
    pub fn around_strike(strike: f64, factor: f64, samples: usize) -> PayoffResult<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(PayoffError::InvalidParameter(format!(
                "range factor must be a non-negative number, got {}",
                factor
            )));
        }
        let half_width = strike.abs() * factor;
        Self::new((strike - half_width).max(0.0), strike + half_width, samples)
    }

    /// `spot ± half_width`.
    ///
    /// # Errors
    /// Returns [`PayoffError::InvalidParameter`] for a negative or non-finite width.
    pub fn centered(spot: f64, half_width: f64, samples: usize) -> PayoffResult<Self> {
        if !half_width.is_finite() || half_width < 0.0 {
            return Err(PayoffError::InvalidParameter(format!(
                "half width must be a non-negative number, got {}",
                half_width
            )));
        }
        Self::new(spot - half_width, spot + half_width, samples)
    }

    /// Ordered spot samples.
    #[must_use]
    pub fn spots(&self) -> Vec<f64> {
        linspace(self.lower, self.upper, self.samples)
    }
}

/// Position size applied to per-unit payoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Units of underlying per contract.
    pub multiplier: u32,
    /// Number of contracts.
    pub contracts: u32,
}

impl Position {
    /// Total scaling factor.
    #[must_use]
    pub fn factor(&self) -> f64 {
        f64::from(self.multiplier) * f64::from(self.contracts)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            multiplier: 100,
            contracts: 1,
        }
    }
}

/// Per-leg and net payoff series over a set of spot prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffCurve {
    /// Spot prices, in input order.
    pub spots: Vec<f64>,
    /// One series per leg, each the same length as `spots`.
    pub legs: Vec<Vec<f64>>,
    /// Net payoff series.
    pub net: Vec<f64>,
}

impl PayoffCurve {
    /// Multiplies every series by the position size.
    #[must_use]
    pub fn scaled(mut self, position: Position) -> Self {
        let factor = position.factor();
        for series in self.legs.iter_mut().chain(std::iter::once(&mut self.net)) {
            series.iter_mut().for_each(|v| *v *= factor);
        }
        self
    }

    /// Spots where the net series crosses zero, linearly interpolated.
    ///
    /// A sample landing exactly on zero is reported once; flat stretches at
    /// zero report only their first sample.
    #[must_use]
    pub fn breakevens(&self) -> Vec<f64> {
        let mut points = Vec::new();
        for i in 0..self.net.len() {
            let y = self.net[i];
            if y == 0.0 {
                if i == 0 || self.net[i - 1] != 0.0 {
                    points.push(self.spots[i]);
                }
                continue;
            }
            if i + 1 < self.net.len() {
                let next = self.net[i + 1];
                if next != 0.0 && (y < 0.0) != (next < 0.0) {
                    let (x0, x1) = (self.spots[i], self.spots[i + 1]);
                    points.push(x0 + (x1 - x0) * (-y) / (next - y));
                }
            }
        }
        points
    }

    /// Largest sampled net payoff.
    #[must_use]
    pub fn max_profit(&self) -> Option<f64> {
        self.net.iter().copied().reduce(f64::max)
    }

    /// Smallest sampled net payoff.
    #[must_use]
    pub fn max_loss(&self) -> Option<f64> {
        self.net.iter().copied().reduce(f64::min)
    }
}

impl PayoffEngine {
    /// Applies `f` to every spot in parallel, preserving order.
    ///
    /// `f` is any per-spot evaluation, e.g.
    /// `|s| engine.long_call_butterfly(s, quotes)`.
    pub fn map_spots<T, F>(&self, spots: &[f64], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(f64) -> T + Sync + Send,
    {
        spots.par_iter().map(|&spot| f(spot)).collect()
    }

    /// Evaluates a strategy at every spot.
    #[must_use]
    pub fn curve(&self, strategy: &Strategy, spots: &[f64]) -> PayoffCurve {
        debug!(
            strategy = %strategy.kind(),
            samples = spots.len(),
            expired = self.expired(),
            "building payoff curve"
        );

        let samples = self.map_spots(spots, |spot| self.evaluate(strategy, spot));

        let mut legs = vec![Vec::with_capacity(spots.len()); strategy.legs().len()];
        let mut net = Vec::with_capacity(spots.len());
        for sample in samples {
            for (series, value) in legs.iter_mut().zip(sample.legs) {
                series.push(value);
            }
            net.push(sample.net);
        }

        PayoffCurve {
            spots: spots.to_vec(),
            legs,
            net,
        }
    }
}
