//! # Option Payoff Engine
//!
//! Profit and loss at expiration for single-leg option positions and the
//! standard multi-leg strategies built from them, evaluated over a range of
//! spot prices for charting.
//!
//! ## Key Features
//!
//! - **Four Primitives**: long call, long put, short call and short put. Short
//!   legs never pay more than the premium received.
//!
//! - **Explicit Legs**: every composite strategy takes each leg's strike and
//!   premium as arguments. The [`contract::Contract`] only supplies defaults and
//!   is never modified during evaluation.
//!
//! - **Per-Leg Breakdown**: composites return a [`models::Breakdown`] holding each
//!   leg's payoff and the net, so callers can plot legs individually or just the
//!   total.
//!
//! - **Closed Catalogue**: [`strategy::StrategyKind`] enumerates every strategy and
//!   carries its leg composition as data.
//!
//! - **Parallel Curves**: spot samples are independent and are evaluated with
//!   rayon, in input order.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`contract`] | Contract parameters and the expiration check |
//! | [`engine`] | Primitive legs and composite strategies |
//! | [`strategy`] | Strategy catalogue and leg templates |
//! | [`curve`] | Spot sampling, batch evaluation and curve statistics |
//! | [`models`] | Leg and payoff value types |
//! | [`config`] | TOML configuration for the `payoff-curve` binary |
//! | [`error`] | Error types |
//!
//! ## Strategies
//!
//! | Group | Strategies |
//! |-------|------------|
//! | Single leg | long/short call, long/short put |
//! | Single strike | long/short straddle, long/short synthetic, strap, strip |
//! | Verticals | bull/bear call spread, bull/bear put spread |
//! | Ratio | call backspread, put backspread |
//! | Two strike | long combo, long/short strangle |
//! | Three strike | long/short call and put ladders, long/short call and put butterflies |
//! | Four strike | long/short call condor |
//! | With underlying | covered call, covered put, collar |
//!
//! After expiration every option leg is worth only its premium and ownership
//! legs are closed, so every payoff curve is flat.
//!
//! ## Example Usage
//!
//! ```rust
//! use option_payoff_engine::contract::Contract;
//! use option_payoff_engine::curve::SpotRange;
//! use option_payoff_engine::engine::PayoffEngine;
//! use option_payoff_engine::models::LegQuote;
//! use option_payoff_engine::strategy::{Strategy, StrategyKind};
//!
//! let contract = Contract::new(100.0, Some(10.0), "2099-12-31", None).unwrap();
//! let engine = PayoffEngine::new(contract);
//!
//! assert_eq!(engine.long_call(120.0), 10.0);
//!
//! let spread = engine.bull_call_spread(100.0, LegQuote::new(90.0, 8.0), LegQuote::new(110.0, 3.0));
//! assert_eq!(spread.net, 5.0);
//!
//! let strategy = Strategy::from_contract(StrategyKind::LongStraddle, &contract, 10.0).unwrap();
//! let spots = SpotRange::around_strike(100.0, 0.5, 300).unwrap().spots();
//! let curve = engine.curve(&strategy, &spots);
//! assert_eq!(curve.net.len(), 300);
//! ```
//!
//! ## Curve Export
//!
//! ```bash
//! # Defaults: long call, strike 100, premium 10
//! cargo run --bin payoff-curve
//!
//! # From a configuration file
//! PAYOFF_CONFIG=config/payoff.toml cargo run --bin payoff-curve
//! ```
//!
//! ## Dependencies
//!
//! - **chrono** (0.4): Expiration dates and evaluation time
//! - **rayon** (1.10): Parallel evaluation over spot samples
//! - **serde** (1.0): Serialization/deserialization
//! - **thiserror** (2.0): Error types
//! - **toml** (0.9): Configuration files
//! - **tracing** (0.1): Structured logging

pub mod config;
pub mod contract;
pub mod curve;
pub mod engine;
pub mod error;
pub mod models;
pub mod strategy;
