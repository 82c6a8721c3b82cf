//! Gratuity distribution among employees.
//!
//! Two methods are supported:
//!
//! - **percentage**: each row receives `points / total_points` of the pool,
//!   rounded to cents per share. Rounding each share independently means the
//!   shares may not add back to the pool exactly; the residual is at most
//!   half a cent per row.
//! - **equal**: every row naming an employee receives the same share. Shares
//!   are left unrounded.
//!
//! Arithmetic saturates at the `Decimal` bounds instead of overflowing.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DistributionMethod, SalesRow, TipDistributionEntry};

use super::compute_sales_totals;

/// Rounds to cents, with halves going up (towards positive infinity).
///
/// # Examples
///
/// ```
/// use gratuity_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// assert_eq!(round_to_cents(dec("90.909")), dec("90.91"));
/// assert_eq!(round_to_cents(dec("1.005")), dec("1.01"));
/// assert_eq!(round_to_cents(dec("-1.005")), dec("-1.00"));
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    // floor(x * 100 + 0.5) / 100 without scaling past Decimal::MAX.
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(2, strategy)
}

/// Splits the event's gratuity pool across the sales rows.
///
/// Returns one entry per input row, in the same order. Every entry carries
/// the row's employee, position and points. Both methods guard their
/// divisions: with no named rows (equal) or no points (percentage) every
/// share is zero.
///
/// # Examples
///
/// ```
/// use gratuity_engine::calculation::distribute_gratuity;
/// use gratuity_engine::models::{DistributionMethod, SalesRow};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// let mut ana = SalesRow::new("Ana", "RUNNER");
/// ana.cc_gratuity = dec("80");
/// ana.cash_gratuity = dec("20");
/// ana.points = dec("10");
///
/// let mut juan = SalesRow::new("Juan", "SERVER");
/// juan.cc_gratuity = dec("100");
/// juan.cash_gratuity = dec("50");
/// juan.points = dec("17.5");
///
/// let shares = distribute_gratuity(&[ana, juan], DistributionMethod::Percentage);
/// assert_eq!(shares[0].tips, dec("90.91"));
/// assert_eq!(shares[1].tips, dec("159.09"));
/// ```
pub fn distribute_gratuity(
    rows: &[SalesRow],
    method: DistributionMethod,
) -> Vec<TipDistributionEntry> {
    match method {
        DistributionMethod::Equal => distribute_equally(rows),
        DistributionMethod::Percentage => distribute_by_points(rows),
    }
}

fn entry_for(row: &SalesRow) -> TipDistributionEntry {
    TipDistributionEntry {
        employee: row.employee.clone(),
        position: row.position.clone(),
        points: row.points,
        ..TipDistributionEntry::default()
    }
}

fn distribute_equally(rows: &[SalesRow]) -> Vec<TipDistributionEntry> {
    let totals = compute_sales_totals(rows);
    let employee_count = rows.iter().filter(|row| row.is_named()).count();

    let (tips, cc_gratuity, cash_gratuity) = if employee_count > 0 {
        let count = Decimal::from(employee_count);
        (
            totals.total_gratuity / count,
            totals.total_cc_gratuity / count,
            totals.total_cash_gratuity / count,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    };

    rows.iter()
        .map(|row| {
            if row.is_named() {
                TipDistributionEntry {
                    tips,
                    cc_gratuity,
                    cash_gratuity,
                    ..entry_for(row)
                }
            } else {
                entry_for(row)
            }
        })
        .collect()
}

fn distribute_by_points(rows: &[SalesRow]) -> Vec<TipDistributionEntry> {
    let totals = compute_sales_totals(rows);
    let total_points = totals.total_points;

    rows.iter()
        .map(|row| {
            let percentage = if total_points > Decimal::ZERO {
                share_of(row.points, total_points)
            } else {
                Decimal::ZERO
            };

            TipDistributionEntry {
                tips: round_to_cents(percentage.saturating_mul(totals.total_gratuity)),
                cc_gratuity: round_to_cents(percentage.saturating_mul(totals.total_cc_gratuity)),
                cash_gratuity: round_to_cents(
                    percentage.saturating_mul(totals.total_cash_gratuity),
                ),
                ..entry_for(row)
            }
        })
        .collect()
}

/// `part / whole` for a positive `whole`, saturating when the quotient is out of range.
fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole).unwrap_or(if part.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}
