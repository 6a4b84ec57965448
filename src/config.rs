use serde::{Deserialize, Serialize};

use crate::calendar::MonthStepping;
use crate::decimal::MONEY_DP;
use crate::errors::{AmortizationError, Result};

/// default cap on the number of periods a schedule may contain
pub const DEFAULT_MAX_PERIODS: u32 = 10_000;

/// schedule calculation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// decimal places for the round-up convention
    pub decimal_places: u32,
    /// upper bound on scheduled and generated periods
    pub max_periods: u32,
    /// how payment dates advance month to month
    pub month_stepping: MonthStepping,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            decimal_places: MONEY_DP,
            max_periods: DEFAULT_MAX_PERIODS,
            month_stepping: MonthStepping::Overflow,
        }
    }
}

impl ScheduleConfig {
    /// parse from json, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScheduleConfig =
            serde_json::from_str(json).map_err(|e| AmortizationError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.decimal_places > 28 {
            return Err(AmortizationError::InvalidConfiguration {
                message: format!("decimal places must be at most 28, got {}", self.decimal_places),
            });
        }
        if self.max_periods == 0 {
            return Err(AmortizationError::InvalidConfiguration {
                message: "max periods must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    pub fn with_max_periods(mut self, max_periods: u32) -> Self {
        self.max_periods = max_periods;
        self
    }

    pub fn with_month_stepping(mut self, stepping: MonthStepping) -> Self {
        self.month_stepping = stepping;
        self
    }
}
