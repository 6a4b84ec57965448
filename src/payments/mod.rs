pub mod formula;
pub mod schedule;

pub use formula::{annuity_payment, compute_scheduled_payment};
pub use schedule::{build_schedule, PaymentRecord, ScheduleBuilder, ScheduleResult};
