use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::parse_start_date;
use crate::decimal::{Money, PeriodicRate, MONEY_DP};
use crate::errors::{AmortizationError, Result};

/// largest accepted loan amount or extra payment, in major units
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// largest accepted annual interest rate, in percent
pub const MAX_ANNUAL_RATE: i64 = 1_000;

/// validated inputs of a fixed-rate amortizing loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    /// annual rate in percent, 20 means 20%
    pub annual_interest_rate: Decimal,
    pub term_years: u32,
    pub payments_per_year: u32,
    pub start_date: NaiveDate,
    /// constant amount paid on top of every scheduled payment
    pub extra_payment: Money,
}

impl LoanParameters {
    pub fn new(
        principal: Money,
        annual_interest_rate: Decimal,
        term_years: u32,
        payments_per_year: u32,
        start_date: NaiveDate,
        extra_payment: Money,
    ) -> Result<Self> {
        let params = Self {
            principal,
            annual_interest_rate,
            term_years,
            payments_per_year,
            start_date,
            extra_payment,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(AmortizationError::invalid_parameters(format!(
                "loan amount can't be 0 or less than 0, got {}",
                self.principal
            )));
        }
        if self.principal > Money::from_major(MAX_AMOUNT) {
            return Err(AmortizationError::invalid_parameters(format!(
                "loan amount can't exceed {}, got {}",
                MAX_AMOUNT, self.principal
            )));
        }
        if self.annual_interest_rate.is_sign_negative() && !self.annual_interest_rate.is_zero() {
            return Err(AmortizationError::invalid_parameters(format!(
                "annual interest rate can't be negative, got {}",
                self.annual_interest_rate
            )));
        }
        if self.annual_interest_rate > Decimal::from(MAX_ANNUAL_RATE) {
            return Err(AmortizationError::invalid_parameters(format!(
                "annual interest rate can't exceed {}%, got {}",
                MAX_ANNUAL_RATE, self.annual_interest_rate
            )));
        }
        if self.term_years == 0 {
            return Err(AmortizationError::invalid_parameters(
                "loan period in years must be positive",
            ));
        }
        if self.payments_per_year == 0 {
            return Err(AmortizationError::invalid_parameters(
                "number of payments per year must be positive",
            ));
        }
        if self.extra_payment.is_negative() {
            return Err(AmortizationError::invalid_parameters(format!(
                "extra payment can't be negative, got {}",
                self.extra_payment
            )));
        }
        if self.extra_payment > Money::from_major(MAX_AMOUNT) {
            return Err(AmortizationError::invalid_parameters(format!(
                "extra payment can't exceed {}, got {}",
                MAX_AMOUNT, self.extra_payment
            )));
        }
        Ok(())
    }

    pub fn periodic_rate(&self) -> Result<PeriodicRate> {
        PeriodicRate::new(self.annual_interest_rate, self.payments_per_year)
    }

    /// `term_years * payments_per_year`
    pub fn scheduled_periods(&self) -> Result<u32> {
        self.term_years
            .checked_mul(self.payments_per_year)
            .ok_or(AmortizationError::TooManyPeriods {
                requested: u64::from(self.term_years) * u64::from(self.payments_per_year),
                limit: u32::MAX,
            })
    }
}

/// builder for loan parameters
///
/// Amounts are rounded half away from zero to cents, payments per year default
/// to 12, the extra payment to zero and the start date to today.
#[derive(Debug, Clone, Default)]
pub struct LoanBuilder {
    amount: Option<Money>,
    annual_rate: Option<Decimal>,
    term_years: Option<u32>,
    payments_per_year: Option<u32>,
    start_date: Option<NaiveDate>,
    start_date_text: Option<String>,
    extra_payment: Option<Money>,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// annual rate in percent
    pub fn annual_rate(mut self, rate: Decimal) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn payments_per_year(mut self, payments: u32) -> Self {
        self.payments_per_year = Some(payments);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self.start_date_text = None;
        self
    }

    /// start date as `d/m/Y` or `Y-m-d`, parsed on build
    pub fn start_date_str(mut self, date: impl Into<String>) -> Self {
        self.start_date_text = Some(date.into());
        self.start_date = None;
        self
    }

    pub fn extra_payment(mut self, amount: Money) -> Self {
        self.extra_payment = Some(amount);
        self
    }

    /// build, taking today's date from the system clock if no start date was set
    pub fn build(self) -> Result<LoanParameters> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    /// build with an explicit time provider for the default start date
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<LoanParameters> {
        let amount = self
            .amount
            .ok_or_else(|| AmortizationError::invalid_parameters("loan amount is not set"))?;

        let annual_rate = self
            .annual_rate
            .ok_or_else(|| AmortizationError::invalid_parameters("annual interest rate is not set"))?;

        let term_years = self
            .term_years
            .ok_or_else(|| AmortizationError::invalid_parameters("loan period in years is not set"))?;

        let start_date = match (self.start_date, self.start_date_text) {
            (Some(date), _) => date,
            (None, Some(text)) => parse_start_date(&text)?,
            (None, None) => time_provider.now().date_naive(),
        };

        LoanParameters::new(
            amount.round_half_up(MONEY_DP),
            annual_rate,
            term_years,
            self.payments_per_year.unwrap_or(12),
            start_date,
            self.extra_payment.unwrap_or(Money::ZERO).round_half_up(MONEY_DP),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 22).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let params = LoanBuilder::new()
            .amount(Money::from_major(65_000))
            .annual_rate(dec!(20))
            .term_years(30)
            .start_date(start())
            .build()
            .unwrap();

        assert_eq!(params.payments_per_year, 12);
        assert_eq!(params.extra_payment, Money::ZERO);
        assert_eq!(params.scheduled_periods().unwrap(), 360);
        assert_eq!(params.periodic_rate().unwrap().as_decimal(), dec!(20) / dec!(12) / dec!(100));
    }

    #[test]
    fn test_builder_rounds_amounts_to_cents() {
        let params = LoanParameters::builder()
            .amount(Money::from_decimal(dec!(1000.005)))
            .annual_rate(dec!(5))
            .term_years(1)
            .extra_payment(Money::from_decimal(dec!(99.994)))
            .start_date(start())
            .build()
            .unwrap();

        assert_eq!(params.principal, Money::from_decimal(dec!(1000.01)));
        assert_eq!(params.extra_payment, Money::from_decimal(dec!(99.99)));
    }

    #[test]
    fn test_builder_parses_start_date() {
        let params = LoanBuilder::new()
            .amount(Money::from_major(1_000))
            .annual_rate(dec!(12))
            .term_years(1)
            .start_date_str("22/01/2019")
            .build()
            .unwrap();
        assert_eq!(params.start_date, start());

        let result = LoanBuilder::new()
            .amount(Money::from_major(1_000))
            .annual_rate(dec!(12))
            .term_years(1)
            .start_date_str("2019/22/01")
            .build();
        assert!(matches!(result, Err(AmortizationError::InvalidDate { .. })));
    }

    #[test]
    fn test_builder_defaults_start_date_to_today() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let time = SafeTimeProvider::new(TimeSource::Test(now));

        let params = LoanBuilder::new()
            .amount(Money::from_major(1_000))
            .annual_rate(dec!(12))
            .term_years(1)
            .build_with_time(&time)
            .unwrap();

        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let result = LoanBuilder::new().annual_rate(dec!(5)).term_years(1).build();
        assert!(matches!(result, Err(AmortizationError::InvalidLoanParameters { .. })));

        let result = LoanBuilder::new().amount(Money::from_major(1)).term_years(1).build();
        assert!(result.is_err());

        let result = LoanBuilder::new().amount(Money::from_major(1)).annual_rate(dec!(5)).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let valid = |principal: i64, rate: Decimal, years: u32, per_year: u32, extra: i64| {
            LoanParameters::new(
                Money::from_major(principal),
                rate,
                years,
                per_year,
                start(),
                Money::from_major(extra),
            )
        };

        assert!(valid(65_000, dec!(20), 30, 12, 100).is_ok());
        assert!(valid(1_000, dec!(0), 1, 12, 0).is_ok());
        assert!(valid(0, dec!(20), 30, 12, 0).is_err());
        assert!(valid(-10, dec!(20), 30, 12, 0).is_err());
        assert!(valid(1_000, dec!(-1), 30, 12, 0).is_err());
        assert!(valid(1_000, dec!(5), 0, 12, 0).is_err());
        assert!(valid(1_000, dec!(5), 30, 0, 0).is_err());
        assert!(valid(1_000, dec!(5), 30, 12, -1).is_err());
        assert!(valid(MAX_AMOUNT, dec!(1000), 1, 12, MAX_AMOUNT).is_ok());
        assert!(valid(MAX_AMOUNT + 1, dec!(5), 1, 12, 0).is_err());
        assert!(valid(1_000, dec!(1000.01), 1, 12, 0).is_err());
        assert!(valid(1_000, dec!(5), 1, 12, MAX_AMOUNT + 1).is_err());
    }

    #[test]
    fn test_amounts_beyond_decimal_range_rejected() {
        let result = LoanParameters::new(
            Money::from_decimal(Decimal::from_i128_with_scale(10_i128.pow(28), 0)),
            dec!(100),
            1,
            1,
            start(),
            Money::ZERO,
        );
        assert!(matches!(result, Err(AmortizationError::InvalidLoanParameters { .. })));
    }

    #[test]
    fn test_scheduled_periods_overflow() {
        let params = LoanParameters {
            principal: Money::from_major(1_000),
            annual_interest_rate: dec!(5),
            term_years: u32::MAX,
            payments_per_year: 12,
            start_date: start(),
            extra_payment: Money::ZERO,
        };
        assert!(matches!(
            params.scheduled_periods(),
            Err(AmortizationError::TooManyPeriods { .. })
        ));
    }
}
