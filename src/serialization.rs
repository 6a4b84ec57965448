//! display payload for loan summaries and payment tables
use serde::{Deserialize, Serialize};

use crate::calculator::LoanSummary;
use crate::calendar::DATE_FORMAT;
use crate::decimal::{Money, MONEY_DP};
use crate::payments::{PaymentRecord, ScheduleResult};

/// summary figures formatted for display, amounts as `1,086.17`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub scheduled_payment: String,
    pub scheduled_number_of_payments: u32,
    pub actual_number_of_payments: u32,
    pub total_early_payments: String,
    pub total_interest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<PaymentRowView>>,
}

/// one table row, dates as `d/m/Y`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRowView {
    pub no: u32,
    pub payment_date: String,
    pub beginning_balance: String,
    pub scheduled_payment: String,
    pub extra_payment: String,
    pub total_payment: String,
    pub principal: String,
    pub interest: String,
    pub ending_balance: String,
    pub cumulative_interest: String,
}

fn amount(value: Money) -> String {
    value.format(MONEY_DP)
}

impl PaymentRowView {
    pub fn from_record(record: &PaymentRecord) -> Self {
        PaymentRowView {
            no: record.sequence_number,
            payment_date: record.payment_date.format(DATE_FORMAT).to_string(),
            beginning_balance: amount(record.beginning_balance),
            scheduled_payment: amount(record.scheduled_payment),
            extra_payment: amount(record.extra_payment),
            total_payment: amount(record.total_payment),
            principal: amount(record.principal_portion),
            interest: amount(record.interest_portion),
            ending_balance: amount(record.ending_balance),
            cumulative_interest: amount(record.cumulative_interest),
        }
    }
}

impl LoanSummaryView {
    pub fn from_summary(summary: &LoanSummary) -> Self {
        LoanSummaryView {
            scheduled_payment: amount(summary.scheduled_payment),
            scheduled_number_of_payments: summary.scheduled_number_of_payments,
            actual_number_of_payments: summary.actual_number_of_payments,
            total_early_payments: amount(summary.total_early_payments),
            total_interest: amount(summary.total_interest),
            payments: summary
                .payments
                .as_ref()
                .map(|rows| rows.iter().map(PaymentRowView::from_record).collect()),
        }
    }

    pub fn from_schedule(schedule: &ScheduleResult, include_payments: bool) -> Self {
        LoanSummaryView {
            scheduled_payment: amount(schedule.scheduled_payment),
            scheduled_number_of_payments: schedule.scheduled_number_of_payments,
            actual_number_of_payments: schedule.actual_number_of_payments,
            total_early_payments: amount(schedule.total_early_payments),
            total_interest: amount(schedule.total_interest),
            payments: include_payments
                .then(|| schedule.periods.iter().map(PaymentRowView::from_record).collect()),
        }
    }

    /// get json representation
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}
