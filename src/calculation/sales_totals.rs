//! Sales and gratuity totals.
//!
//! Totals include every row, named or not; only the distribution skips
//! rows without an employee.

use rust_decimal::Decimal;

use crate::models::{GratuityTotals, SalesRow, SalesTotals};

/// Sums every field of the sales rows.
///
/// Always succeeds; an empty slice yields all-zero totals.
///
/// # Examples
///
/// ```
/// use gratuity_engine::calculation::compute_sales_totals;
/// use gratuity_engine::models::SalesRow;
/// use rust_decimal::Decimal;
///
/// let mut ana = SalesRow::new("Ana", "RUNNER");
/// ana.cc_gratuity = Decimal::new(80, 0);
/// ana.cash_gratuity = Decimal::new(20, 0);
///
/// let totals = compute_sales_totals(&[ana]);
/// assert_eq!(totals.total_gratuity, Decimal::new(100, 0));
/// ```
pub fn compute_sales_totals(rows: &[SalesRow]) -> SalesTotals {
    let mut totals = rows.iter().fold(SalesTotals::default(), |mut acc, row| {
        acc.total_net_sales = acc.total_net_sales.saturating_add(row.net_sales);
        acc.total_cash_sales = acc.total_cash_sales.saturating_add(row.cash_sales);
        acc.total_cc_sales = acc.total_cc_sales.saturating_add(row.cc_sales);
        acc.total_cc_gratuity = acc.total_cc_gratuity.saturating_add(row.cc_gratuity);
        acc.total_cash_gratuity = acc.total_cash_gratuity.saturating_add(row.cash_gratuity);
        acc.total_points = acc.total_points.saturating_add(row.points);
        acc
    });
    totals.total_gratuity = totals
        .total_cc_gratuity
        .saturating_add(totals.total_cash_gratuity);
    totals
}

/// Sums only the gratuity fields of the sales rows.
///
/// Produces the same values as the gratuity fields of
/// [`compute_sales_totals`].
pub fn compute_gratuity_totals(rows: &[SalesRow]) -> GratuityTotals {
    let total_cc_gratuity = saturating_sum(rows.iter().map(|row| row.cc_gratuity));
    let total_cash_gratuity = saturating_sum(rows.iter().map(|row| row.cash_gratuity));

    GratuityTotals {
        total_cc_gratuity,
        total_cash_gratuity,
        total_gratuity: total_cc_gratuity.saturating_add(total_cash_gratuity),
    }
}

/// Sums the values, clamping at the `Decimal` bounds.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}
