use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ScheduleConfig;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};
use crate::loan::LoanParameters;
use crate::payments::{PaymentRecord, ScheduleBuilder, ScheduleResult};

/// loan summary figures with optional payment rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub scheduled_payment: Money,
    pub scheduled_number_of_payments: u32,
    pub actual_number_of_payments: u32,
    pub total_early_payments: Money,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<PaymentRecord>>,
}

impl LoanSummary {
    pub fn from_schedule(schedule: ScheduleResult, include_payments: bool) -> Self {
        Self {
            scheduled_payment: schedule.scheduled_payment,
            scheduled_number_of_payments: schedule.scheduled_number_of_payments,
            actual_number_of_payments: schedule.actual_number_of_payments,
            total_early_payments: schedule.total_early_payments,
            total_interest: schedule.total_interest,
            payments: include_payments.then_some(schedule.periods),
        }
    }
}

/// Runs the payment formula and the schedule builder for a set of loan parameters.
#[derive(Debug, Clone, Default)]
pub struct AmortizationCalculator {
    config: ScheduleConfig,
}

impl AmortizationCalculator {
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// full amortization table for `params`
    pub fn calculate(&self, params: &LoanParameters) -> Result<ScheduleResult> {
        params.validate()?;

        let rate = params.periodic_rate()?;
        let scheduled_periods = params.scheduled_periods()?;
        if scheduled_periods > self.config.max_periods {
            return Err(AmortizationError::TooManyPeriods {
                requested: u64::from(scheduled_periods),
                limit: self.config.max_periods,
            });
        }

        let builder = ScheduleBuilder::new(self.config.clone()).nominal_periods(scheduled_periods);
        let scheduled_payment = builder.scheduled_payment(&rate, scheduled_periods, params.principal);
        let schedule = builder.build(
            params.principal,
            scheduled_payment,
            params.extra_payment,
            params.start_date,
            &rate,
        )?;

        info!(
            loan_amount = %params.principal,
            %scheduled_payment,
            payments = schedule.actual_number_of_payments,
            "calculated loan schedule"
        );

        Ok(schedule)
    }

    /// summary figures, with the payment rows only when `include_payments` is set
    pub fn summarize(&self, params: &LoanParameters, include_payments: bool) -> Result<LoanSummary> {
        let schedule = self.calculate(params)?;
        Ok(LoanSummary::from_schedule(schedule, include_payments))
    }
}
