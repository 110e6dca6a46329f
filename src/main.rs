//! Payoff curve export.
//!
//! Loads a configuration, evaluates the selected strategy over the configured
//! spot range and prints the scaled curve as JSON.

use option_payoff_engine::config::Config;
use option_payoff_engine::engine::PayoffEngine;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use option_payoff_engine::curve::PayoffCurve;
use option_payoff_engine::strategy::StrategyKind;

/// JSON document written to stdout.
#[derive(Debug, Serialize)]
struct CurveReport {
    strategy: StrategyKind,
    label: String,
    expired: bool,
    breakevens: Vec<f64>,
    max_profit: Option<f64>,
    max_loss: Option<f64>,
    curve: PayoffCurve,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match std::env::var("PAYOFF_CONFIG") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path)?
        }
        Err(_) => {
            warn!("PAYOFF_CONFIG not set, using default configuration");
            Config::default()
        }
    };

    let contract = config.contract()?;
    let strategy = config.strategy(&contract)?;
    let range = config.spot_range()?;
    let engine = PayoffEngine::new(contract);

    info!(
        "Evaluating {} over {}..{} ({} samples)",
        strategy.kind().label(),
        range.lower,
        range.upper,
        range.samples
    );

    let curve = engine
        .curve(&strategy, &range.spots())
        .scaled(config.position());

    let report = CurveReport {
        strategy: strategy.kind(),
        label: strategy.kind().label(),
        expired: engine.expired(),
        breakevens: curve.breakevens(),
        max_profit: curve.max_profit(),
        max_loss: curve.max_loss(),
        curve,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
