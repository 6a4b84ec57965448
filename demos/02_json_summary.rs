/// json summary - full payment table as json, the way an api would return it
use loan_amortization_rs::{AmortizationCalculator, LoanBuilder, LoanSummaryView, Money};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loan = LoanBuilder::new()
        .amount(Money::from_major(1_000))
        .annual_rate(dec!(12))
        .term_years(10)
        .payments_per_year(12)
        .start_date_str("22/01/2019")
        .extra_payment(Money::from_major(500))
        .build()?;

    let calculator = AmortizationCalculator::default();

    println!("summary only:");
    println!("-------------");
    println!("{}\n", LoanSummaryView::from_summary(&calculator.summarize(&loan, false)?).json());

    println!("with payments:");
    println!("--------------");
    println!("{}", LoanSummaryView::from_summary(&calculator.summarize(&loan, true)?).json());

    Ok(())
}
