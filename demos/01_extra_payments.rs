/// extra payments - how a constant extra amount shortens the loan
use loan_amortization_rs::{AmortizationCalculator, LoanBuilder, Money, MONEY_DP};
use rust_decimal_macros::dec;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let calculator = AmortizationCalculator::default();

    println!("=== extra payments ===\n");
    println!("{:>8} {:>10} {:>14} {:>14}", "extra", "payments", "early paid", "interest");

    for extra in [0, 50, 100, 250, 500] {
        let loan = LoanBuilder::new()
            .amount(Money::from_major(65_000))
            .annual_rate(dec!(20))
            .term_years(30)
            .start_date_str("2019-01-22")
            .extra_payment(Money::from_major(extra))
            .build()?;

        let schedule = calculator.calculate(&loan)?;
        println!(
            "{:>8} {:>10} {:>14} {:>14}",
            extra,
            schedule.actual_number_of_payments,
            schedule.total_early_payments.format(MONEY_DP),
            schedule.total_interest.format(MONEY_DP),
        );
    }

    Ok(())
}
