use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{AmortizationError, Result};

/// display and query-string date format, e.g. `22/01/2019`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// html date input format, e.g. `2019-01-22`
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// how a payment date advances by one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthStepping {
    /// a day past the end of the next month rolls into the month after
    /// (31 Jan -> 3 Mar outside leap years)
    #[default]
    Overflow,
    /// a day past the end of the next month is clamped to its last day
    /// (31 Jan -> 28 Feb)
    Clamp,
}

/// advance `previous` by one calendar month
pub fn next_payment_date(previous: NaiveDate, stepping: MonthStepping) -> Result<NaiveDate> {
    let next = match stepping {
        MonthStepping::Overflow => add_month_overflowing(previous),
        MonthStepping::Clamp => previous.checked_add_months(Months::new(1)),
    };

    next.ok_or_else(|| AmortizationError::InvalidDate {
        message: format!("cannot advance {} by one month", previous),
    })
}

/// same day of the next month, counted on from its first day so that
/// days past the month end spill into the month after
fn add_month_overflowing(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = next_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(date.day0())))
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Successive monthly payment dates.
///
/// Each date is computed from the previous one, so an overflowed or clamped
/// day carries forward instead of being recomputed from the start date.
#[derive(Debug, Clone)]
pub struct PaymentDates {
    current: NaiveDate,
    stepping: MonthStepping,
}

impl PaymentDates {
    /// dates following `start_date`; the first item is one month after it
    pub fn new(start_date: NaiveDate, stepping: MonthStepping) -> Self {
        Self {
            current: start_date,
            stepping,
        }
    }

    pub fn next_date(&mut self) -> Result<NaiveDate> {
        self.current = next_payment_date(self.current, self.stepping)?;
        Ok(self.current)
    }
}

impl Iterator for PaymentDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        self.next_date().ok()
    }
}

/// parse a loan start date given as `d/m/Y` or `Y-m-d`
pub fn parse_start_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, ISO_DATE_FORMAT))
        .map_err(|e| AmortizationError::InvalidDate {
            message: format!("'{}': {}", input, e),
        })
}
