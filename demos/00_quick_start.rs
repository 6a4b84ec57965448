/// quick start - minimal example to get started
use loan_amortization_rs::{AmortizationCalculator, LoanBuilder, LoanSummaryView, Money};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a $65,000 loan at 20% over 30 years, paid monthly
    let loan = LoanBuilder::new()
        .amount(Money::from_major(65_000))
        .annual_rate(dec!(20))
        .term_years(30)
        .start_date_str("22/01/2019")
        .build()?;

    let summary = AmortizationCalculator::default().summarize(&loan, false)?;

    println!("{}", LoanSummaryView::from_summary(&summary).json());

    Ok(())
}
