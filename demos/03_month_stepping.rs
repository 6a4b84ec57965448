/// month stepping - payment dates for a loan starting on the 31st
use loan_amortization_rs::calendar::DATE_FORMAT;
use loan_amortization_rs::{AmortizationCalculator, LoanBuilder, MonthStepping, Money, ScheduleConfig};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loan = LoanBuilder::new()
        .amount(Money::from_major(10_000))
        .annual_rate(dec!(6))
        .term_years(1)
        .start_date_str("31/01/2019")
        .build()?;

    for stepping in [MonthStepping::Overflow, MonthStepping::Clamp] {
        let config = ScheduleConfig::default().with_month_stepping(stepping);
        let schedule = AmortizationCalculator::new(config)?.calculate(&loan)?;

        println!("{:?}:", stepping);
        for payment in &schedule.periods {
            println!(
                "  {:>3}  {}  {:>10}",
                payment.sequence_number,
                payment.payment_date.format(DATE_FORMAT),
                payment.ending_balance,
            );
        }
        println!();
    }

    Ok(())
}
