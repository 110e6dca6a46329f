//! Contract parameters held by the payoff engine.
//!
//! A [`Contract`] carries the default strike and premium used by the single-leg
//! primitives together with the expiration instant and the time at which the
//! position is evaluated. Multi-leg strategies never modify it; they pass every
//! leg's strike and premium explicitly.

use crate::error::{PayoffError, PayoffResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Expected format of textual expiration dates.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d";

/// Expiration as supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Expiration {
    /// `YYYY-MM-DD` text, parsed at construction.
    Text(String),
    /// Calendar date, taken as UTC midnight.
    Date(NaiveDate),
    /// Exact instant.
    Instant(DateTime<Utc>),
}

impl Expiration {
    /// Resolves to an instant in UTC.
    ///
    /// # Errors
    /// Returns [`PayoffError::InvalidDateFormat`] if text does not parse as `YYYY-MM-DD`.
    pub fn resolve(&self) -> PayoffResult<DateTime<Utc>> {
        match self {
            Expiration::Text(text) => {
                let invalid = || PayoffError::InvalidDateFormat(text.clone());
                if text.trim() != text.as_str() {
                    return Err(invalid());
                }
                let date =
                    NaiveDate::parse_from_str(text, EXPIRATION_FORMAT).map_err(|_| invalid())?;
                Ok(utc_midnight(date))
            }
            Expiration::Date(date) => Ok(utc_midnight(*date)),
            Expiration::Instant(instant) => Ok(*instant),
        }
    }
}

impl From<&str> for Expiration {
    fn from(text: &str) -> Self {
        Expiration::Text(text.to_string())
    }
}

impl From<String> for Expiration {
    fn from(text: String) -> Self {
        Expiration::Text(text)
    }
}

impl From<NaiveDate> for Expiration {
    fn from(date: NaiveDate) -> Self {
        Expiration::Date(date)
    }
}

impl From<DateTime<Utc>> for Expiration {
    fn from(instant: DateTime<Utc>) -> Self {
        Expiration::Instant(instant)
    }
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Default contract parameters plus the expiration check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contract {
    strike: f64,
    premium: f64,
    expiration: DateTime<Utc>,
    current_time: DateTime<Utc>,
}

impl Contract {
    /// Creates a contract.
    ///
    /// # Arguments
    /// * `strike` - Default strike price
    /// * `premium` - Default premium; zero when `None`
    /// * `expiration` - `YYYY-MM-DD` text, a date or an instant
    /// * `current_time` - Evaluation time; the wall clock (UTC) when `None`
    ///
    /// # Errors
    /// Returns [`PayoffError::InvalidParameter`] for a non-finite strike or premium
    /// and [`PayoffError::InvalidDateFormat`] for unparseable expiration text.
    pub fn new(
        strike: f64,
        premium: Option<f64>,
        expiration: impl Into<Expiration>,
        current_time: Option<DateTime<Utc>>,
    ) -> PayoffResult<Self> {
        if !strike.is_finite() {
            warn!(strike, "rejecting contract with non-numeric strike");
            return Err(PayoffError::InvalidParameter(format!(
                "strike must be a finite number, got {}",
                strike
            )));
        }
        let premium = match premium {
            Some(p) if !p.is_finite() => {
                warn!(premium = p, "rejecting contract with non-numeric premium");
                return Err(PayoffError::InvalidParameter(format!(
                    "premium must be a finite number, got {}",
                    p
                )));
            }
            Some(p) => p,
            None => 0.0,
        };

        let expiration = expiration.into().resolve()?;
        let current_time = current_time.unwrap_or_else(Utc::now);

        debug!(
            strike,
            premium,
            %expiration,
            %current_time,
            "contract created"
        );

        Ok(Self {
            strike,
            premium,
            expiration,
            current_time,
        })
    }

    /// Default strike price.
    #[must_use]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Default premium.
    #[must_use]
    pub fn premium(&self) -> f64 {
        self.premium
    }

    /// Expiration instant (UTC).
    #[must_use]
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Evaluation instant (UTC).
    #[must_use]
    pub fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    /// True iff the evaluation time is strictly after expiration.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.current_time > self.expiration
    }

    /// Same contract evaluated at another instant.
    #[must_use]
    pub fn at(self, current_time: DateTime<Utc>) -> Self {
        Self {
            current_time,
            ..self
        }
    }
}
