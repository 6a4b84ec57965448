use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmortizationError {
    #[error("invalid loan parameters: {message}")]
    InvalidLoanParameters {
        message: String,
    },

    #[error("invalid schedule input: {message}")]
    InvalidScheduleInput {
        message: String,
    },

    #[error("schedule cannot terminate: payment {payment} does not retire balance {balance} at period {period}")]
    NonTerminatingSchedule {
        period: u32,
        payment: Money,
        balance: Money,
    },

    #[error("iteration limit of {limit} periods exceeded")]
    IterationLimitExceeded {
        limit: u32,
    },

    #[error("too many periods: requested {requested}, limit {limit}")]
    TooManyPeriods {
        requested: u64,
        limit: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("arithmetic overflow computing {operation}")]
    ArithmeticOverflow {
        operation: String,
    },
}

impl AmortizationError {
    pub(crate) fn invalid_parameters(message: impl Into<String>) -> Self {
        AmortizationError::InvalidLoanParameters {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        AmortizationError::InvalidScheduleInput {
            message: message.into(),
        }
    }

    pub(crate) fn overflow(operation: impl Into<String>) -> Self {
        AmortizationError::ArithmeticOverflow {
            operation: operation.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AmortizationError>;
