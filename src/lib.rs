pub mod calculator;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod payments;
pub mod serialization;

// re-export key types
pub use calculator::{AmortizationCalculator, LoanSummary};
pub use calendar::{parse_start_date, MonthStepping, PaymentDates};
pub use config::ScheduleConfig;
pub use decimal::{format_number, round_up, Money, PeriodicRate, MONEY_DP};
pub use errors::{AmortizationError, Result};
pub use loan::{LoanBuilder, LoanParameters};
pub use payments::{
    build_schedule, compute_scheduled_payment, PaymentRecord, ScheduleBuilder, ScheduleResult,
};
pub use serialization::{LoanSummaryView, PaymentRowView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
