use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::decimal::{Money, PeriodicRate, MONEY_DP};

/// Fixed payment that retires `principal` over `period_count` periods,
/// rounded up to cents.
///
/// A zero rate falls back to straight division. Inputs are not validated;
/// a zero period count returns the principal.
pub fn compute_scheduled_payment(rate: &PeriodicRate, period_count: u32, principal: Money) -> Money {
    annuity_payment(rate, period_count, principal).round_up(MONEY_DP)
}

/// Unrounded annuity payment `P * r * (1 + r)^n / ((1 + r)^n - 1)`.
///
/// Never panics: a payment too large for a `Decimal` saturates at
/// `Decimal::MAX`, which callers validating their inputs never reach.
pub fn annuity_payment(rate: &PeriodicRate, period_count: u32, principal: Money) -> Money {
    if period_count == 0 {
        return principal;
    }

    let p = principal.as_decimal();
    let periods = Decimal::from(period_count);
    let payment = if rate.is_zero() {
        p.checked_div(periods)
    } else {
        let r = rate.as_decimal();
        match compound_factor(r, period_count) {
            Some(compound) if compound != Decimal::ONE => level_payment(p, r, compound),
            Some(_) => p.checked_div(periods),
            None => {
                // c / (c - 1) is 1 at decimal precision once (1 + r)^n overflows
                debug!(%rate, period_count, "compound factor overflowed, using interest-only limit");
                p.checked_mul(r)
            }
        }
    };

    match payment {
        Some(payment) => Money::from_decimal(payment),
        None => {
            warn!(%rate, period_count, %principal, "payment exceeds decimal range");
            Money::from_decimal(Decimal::MAX)
        }
    }
}

/// `P * r * c / (c - 1)`, regrouped as `P * r + P * r / (c - 1)` when the
/// numerator does not fit
fn level_payment(principal: Decimal, r: Decimal, compound: Decimal) -> Option<Decimal> {
    let interest = principal.checked_mul(r)?;
    let denominator = compound - Decimal::ONE;
    match interest.checked_mul(compound) {
        Some(numerator) => numerator.checked_div(denominator).or(Some(interest)),
        None => interest.checked_add(interest.checked_div(denominator)?),
    }
}

/// `(1 + r)^n`, or `None` on overflow
fn compound_factor(r: Decimal, periods: u32) -> Option<Decimal> {
    let base = Decimal::ONE.checked_add(r)?;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound.checked_mul(base)?;
    }
    Some(compound)
}
