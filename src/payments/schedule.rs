use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::calendar::PaymentDates;
use crate::config::ScheduleConfig;
use crate::decimal::{Money, PeriodicRate};
use crate::errors::{AmortizationError, Result};

use super::formula::annuity_payment;

/// one period of an amortization table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub sequence_number: u32,
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub scheduled_payment: Money,
    /// extra amount actually applied, can be below the nominal extra on the last period
    pub extra_payment: Money,
    pub total_payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
}

impl PaymentRecord {
    /// the period that retires the loan
    pub fn is_final(&self) -> bool {
        self.ending_balance.is_zero()
    }
}

/// complete amortization table with totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub periods: Vec<PaymentRecord>,
    pub scheduled_payment: Money,
    pub scheduled_number_of_payments: u32,
    pub actual_number_of_payments: u32,
    pub total_early_payments: Money,
    pub total_interest: Money,
}

impl ScheduleResult {
    /// get payment for specific period, 1-based
    pub fn get_payment(&self, sequence_number: u32) -> Option<&PaymentRecord> {
        let index = sequence_number.checked_sub(1)?;
        self.periods.get(index as usize)
    }

    pub fn last_payment(&self) -> Option<&PaymentRecord> {
        self.periods.last()
    }

    /// remaining balance after a payment; period 0 is the original principal
    pub fn balance_after_payment(&self, sequence_number: u32) -> Option<Money> {
        if sequence_number == 0 {
            return self.periods.first().map(|p| p.beginning_balance);
        }
        self.get_payment(sequence_number).map(|p| p.ending_balance)
    }

    pub fn total_principal(&self) -> Money {
        self.periods.iter().map(|p| p.principal_portion).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.periods.iter().map(|p| p.total_payment).sum()
    }

    /// fewer payments than the nominal term
    pub fn paid_off_early(&self) -> bool {
        self.actual_number_of_payments < self.scheduled_number_of_payments
    }
}

/// Builds amortization tables one period at a time until the balance is zero.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    config: ScheduleConfig,
    nominal_periods: Option<u32>,
}

impl ScheduleBuilder {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            nominal_periods: None,
        }
    }

    /// nominal payment count reported as `scheduled_number_of_payments`;
    /// defaults to the number of periods generated
    pub fn nominal_periods(mut self, periods: u32) -> Self {
        self.nominal_periods = Some(periods);
        self
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// periodic payment rounded up at the configured places
    pub fn scheduled_payment(&self, rate: &PeriodicRate, period_count: u32, principal: Money) -> Money {
        annuity_payment(rate, period_count, principal).round_up(self.config.decimal_places)
    }

    /// generate the full table
    pub fn build(
        &self,
        principal: Money,
        scheduled_payment: Money,
        extra_payment: Money,
        start_date: NaiveDate,
        rate: &PeriodicRate,
    ) -> Result<ScheduleResult> {
        validate_inputs(principal, scheduled_payment, extra_payment, rate)?;

        let places = self.config.decimal_places;
        let limit = self.config.max_periods;
        let mut dates = PaymentDates::new(start_date, self.config.month_stepping);

        let mut periods = Vec::new();
        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;
        let mut total_early_payments = Money::ZERO;
        let combined_payment = scheduled_payment
            .checked_add(extra_payment)
            .ok_or_else(|| AmortizationError::overflow("scheduled plus extra payment"))?;

        for sequence_number in 1.. {
            if sequence_number > limit {
                warn!(limit, %balance, "amortization schedule hit the period limit");
                return Err(AmortizationError::IterationLimitExceeded { limit });
            }

            let payment_date = dates.next_date()?;
            let interest_portion = rate.interest_on(balance)?.round_up(places);
            cumulative_interest = accumulate(cumulative_interest, interest_portion, "cumulative interest")?;

            let record = if combined_payment >= balance {
                // final period pays the remaining balance exactly
                let total_payment = balance;
                let applied_extra = (balance - scheduled_payment).max(Money::ZERO);

                PaymentRecord {
                    sequence_number,
                    payment_date,
                    beginning_balance: balance,
                    scheduled_payment,
                    extra_payment: applied_extra,
                    total_payment,
                    principal_portion: total_payment - interest_portion,
                    interest_portion,
                    ending_balance: Money::ZERO,
                    cumulative_interest,
                }
            } else {
                let principal_portion = (combined_payment - interest_portion).round_up(places);
                if !principal_portion.is_positive() {
                    warn!(sequence_number, %balance, %interest_portion, "payment does not cover interest");
                    return Err(AmortizationError::NonTerminatingSchedule {
                        period: sequence_number,
                        payment: combined_payment,
                        balance,
                    });
                }

                PaymentRecord {
                    sequence_number,
                    payment_date,
                    beginning_balance: balance,
                    scheduled_payment,
                    extra_payment,
                    total_payment: combined_payment,
                    principal_portion,
                    interest_portion,
                    ending_balance: (balance - principal_portion).round_up(places),
                    cumulative_interest,
                }
            };

            trace!(
                period = record.sequence_number,
                date = %record.payment_date,
                ending_balance = %record.ending_balance,
                "amortization period"
            );

            total_early_payments =
                accumulate(total_early_payments, record.extra_payment, "total early payments")?;
            balance = record.ending_balance;
            let finished = record.is_final();
            periods.push(record);

            if finished {
                break;
            }
        }

        let actual_number_of_payments = periods.len() as u32;
        debug!(
            periods = actual_number_of_payments,
            %total_early_payments,
            %cumulative_interest,
            "amortization schedule complete"
        );

        Ok(ScheduleResult {
            periods,
            scheduled_payment,
            scheduled_number_of_payments: self.nominal_periods.unwrap_or(actual_number_of_payments),
            actual_number_of_payments,
            total_early_payments,
            total_interest: cumulative_interest,
        })
    }
}

/// build a schedule with the default configuration
pub fn build_schedule(
    principal: Money,
    scheduled_payment: Money,
    extra_payment: Money,
    start_date: NaiveDate,
    rate: &PeriodicRate,
) -> Result<ScheduleResult> {
    ScheduleBuilder::default().build(principal, scheduled_payment, extra_payment, start_date, rate)
}

fn accumulate(total: Money, amount: Money, what: &str) -> Result<Money> {
    total.checked_add(amount).ok_or_else(|| AmortizationError::overflow(what))
}

fn validate_inputs(
    principal: Money,
    scheduled_payment: Money,
    extra_payment: Money,
    rate: &PeriodicRate,
) -> Result<()> {
    if !principal.is_positive() {
        return Err(AmortizationError::invalid_input(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if extra_payment.is_negative() {
        return Err(AmortizationError::invalid_input(format!(
            "extra payment can't be negative, got {}",
            extra_payment
        )));
    }
    if rate.is_negative() {
        return Err(AmortizationError::invalid_input(format!(
            "periodic rate can't be negative, got {}",
            rate
        )));
    }
    if !scheduled_payment.is_positive() {
        warn!(%scheduled_payment, "non-positive scheduled payment");
        return Err(AmortizationError::NonTerminatingSchedule {
            period: 1,
            payment: scheduled_payment,
            balance: principal,
        });
    }
    Ok(())
}
