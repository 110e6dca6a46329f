//! Configuration module for loading and parsing TOML configuration files.

use crate::contract::Contract;
use crate::curve::{Position, SpotRange};
use crate::error::PayoffError;
use crate::strategy::{DEFAULT_STRIKE_WIDTH, Strategy, StrategyKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

impl From<PayoffError> for ConfigError {
    fn from(err: PayoffError) -> Self {
        ConfigError::InvalidValue(err.to_string())
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default contract parameters.
    pub contract: ContractConfig,
    /// Strategy selection.
    pub strategy: StrategyConfig,
    /// Spot sampling.
    pub curve: CurveConfig,
    /// Position size.
    pub position: PositionConfig,
}

/// Contract configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Strike price.
    pub strike: f64,
    /// Premium per unit.
    pub premium: Option<f64>,
    /// Expiration date in YYYY-MM-DD format.
    pub expiration: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            strike: 100.0,
            premium: Some(10.0),
            expiration: "2099-12-31".to_string(),
        }
    }
}

/// Strategy configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Strategy name, e.g. "bull_call_spread" or "Bull Call Spread".
    pub name: String,
    /// Spacing between strikes of multi-strike strategies.
    pub strike_width: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: StrategyKind::LongCall.name().to_string(),
            strike_width: DEFAULT_STRIKE_WIDTH,
        }
    }
}

/// Spot sampling configuration.
///
/// Explicit `lower`/`upper` bounds take precedence over `range_factor`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Lowest spot sampled.
    pub lower: Option<f64>,
    /// Highest spot sampled.
    pub upper: Option<f64>,
    /// Half-width of the range as a fraction of the strike.
    pub range_factor: f64,
    /// Number of samples.
    pub samples: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            lower: None,
            upper: None,
            range_factor: 0.5,
            samples: 300,
        }
    }
}

/// Position size configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Units of underlying per contract.
    pub multiplier: u32,
    /// Number of contracts.
    pub contracts: u32,
}

impl Default for PositionConfig {
    fn default() -> Self {
        let position = Position::default();
        Self {
            multiplier: position.multiplier,
            contracts: position.contracts,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        self.contract()?;
        self.strategy_kind()?;

        if !self.strategy.strike_width.is_finite() || self.strategy.strike_width < 0.0 {
            return Err(ConfigError::InvalidValue(
                "strategy strike_width must be a non-negative number".to_string(),
            ));
        }
        if self.curve.samples == 0 {
            return Err(ConfigError::InvalidValue(
                "curve samples must be positive".to_string(),
            ));
        }
        if self.curve.lower.is_some() != self.curve.upper.is_some() {
            return Err(ConfigError::InvalidValue(
                "curve lower and upper must be set together".to_string(),
            ));
        }
        if self.position.multiplier == 0 || self.position.contracts == 0 {
            return Err(ConfigError::InvalidValue(
                "position multiplier and contracts must be positive".to_string(),
            ));
        }

        self.spot_range()?;
        Ok(())
    }

    /// Selected strategy kind.
    ///
    /// # Errors
    /// Returns error if the name is not in the catalogue.
    pub fn strategy_kind(&self) -> Result<StrategyKind, ConfigError> {
        Ok(self.strategy.name.parse()?)
    }

    /// Builds the configured contract, evaluated now.
    ///
    /// # Errors
    /// Returns error if the strike, premium or expiration is invalid.
    pub fn contract(&self) -> Result<Contract, ConfigError> {
        Ok(Contract::new(
            self.contract.strike,
            self.contract.premium,
            self.contract.expiration.as_str(),
            None,
        )?)
    }

    /// Builds the configured strategy with default legs around the contract strike.
    ///
    /// # Errors
    /// Returns error if the strategy or contract is invalid.
    pub fn strategy(&self, contract: &Contract) -> Result<Strategy, ConfigError> {
        Ok(Strategy::from_contract(
            self.strategy_kind()?,
            contract,
            self.strategy.strike_width,
        )?)
    }

    /// Configured spot sampling range.
    ///
    /// # Errors
    /// Returns error if the bounds are inconsistent.
    pub fn spot_range(&self) -> Result<SpotRange, ConfigError> {
        let range = match (self.curve.lower, self.curve.upper) {
            (Some(lower), Some(upper)) => SpotRange::new(lower, upper, self.curve.samples)?,
            _ => SpotRange::around_strike(
                self.contract.strike,
                self.curve.range_factor,
                self.curve.samples,
            )?,
        };
        Ok(range)
    }

    /// Configured position size.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            multiplier: self.position.multiplier,
            contracts: self.position.contracts,
        }
    }
}
