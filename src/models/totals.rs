//! Aggregate totals derived from sales and expense rows.
//!
//! These are never edited directly; they are recomputed from the rows by the
//! functions in [`crate::calculation`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Sums of every [`SalesRow`](super::SalesRow) field for one event.
///
/// # Example
///
/// ```
/// use gratuity_engine::models::SalesTotals;
/// use rust_decimal::Decimal;
///
/// let totals = SalesTotals::default();
/// assert_eq!(totals.total_gratuity, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTotals {
    /// Sum of net sales.
    #[serde(alias = "totalNetSales", default, deserialize_with = "lenient::decimal")]
    pub total_net_sales: Decimal,
    /// Sum of cash sales.
    #[serde(alias = "totalCashSales", default, deserialize_with = "lenient::decimal")]
    pub total_cash_sales: Decimal,
    /// Sum of credit card sales.
    #[serde(alias = "totalCcSales", default, deserialize_with = "lenient::decimal")]
    pub total_cc_sales: Decimal,
    /// Sum of credit card gratuity.
    #[serde(alias = "totalCcGratuity", default, deserialize_with = "lenient::decimal")]
    pub total_cc_gratuity: Decimal,
    /// Sum of cash gratuity.
    #[serde(alias = "totalCashGratuity", default, deserialize_with = "lenient::decimal")]
    pub total_cash_gratuity: Decimal,
    /// Sum of distribution points.
    #[serde(alias = "totalPoints", default, deserialize_with = "lenient::decimal")]
    pub total_points: Decimal,
    /// `total_cc_gratuity + total_cash_gratuity`.
    #[serde(alias = "totalGratuity", default, deserialize_with = "lenient::decimal")]
    pub total_gratuity: Decimal,
}

impl SalesTotals {
    /// The gratuity-only view of these totals.
    pub fn gratuity(&self) -> GratuityTotals {
        GratuityTotals {
            total_cc_gratuity: self.total_cc_gratuity,
            total_cash_gratuity: self.total_cash_gratuity,
            total_gratuity: self.total_gratuity,
        }
    }
}

/// Sums of [`ExpenseRow`](super::ExpenseRow) amounts, broken down by payment
/// method and payer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTotals {
    /// Sum of every expense amount.
    #[serde(alias = "totalExpenses", default, deserialize_with = "lenient::decimal")]
    pub total_expenses: Decimal,
    /// Expenses paid by check.
    #[serde(alias = "totalCheck", default, deserialize_with = "lenient::decimal")]
    pub total_check: Decimal,
    /// Expenses paid in cash.
    #[serde(alias = "totalCash", default, deserialize_with = "lenient::decimal")]
    pub total_cash: Decimal,
    /// Expenses paid by the business.
    #[serde(alias = "totalBusiness", default, deserialize_with = "lenient::decimal")]
    pub total_business: Decimal,
    /// Expenses paid by employees.
    #[serde(alias = "totalEmployee", default, deserialize_with = "lenient::decimal")]
    pub total_employee: Decimal,
    /// Employee-paid expenses that have been refunded.
    #[serde(alias = "totalRefunded", default, deserialize_with = "lenient::decimal")]
    pub total_refunded: Decimal,
}

/// The gratuity part of the sales totals, as reported alongside a tip
/// distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityTotals {
    /// Sum of credit card gratuity.
    #[serde(alias = "totalCcGratuity", default, deserialize_with = "lenient::decimal")]
    pub total_cc_gratuity: Decimal,
    /// Sum of cash gratuity.
    #[serde(alias = "totalCashGratuity", default, deserialize_with = "lenient::decimal")]
    pub total_cash_gratuity: Decimal,
    /// `total_cc_gratuity + total_cash_gratuity`.
    #[serde(alias = "totalGratuity", default, deserialize_with = "lenient::decimal")]
    pub total_gratuity: Decimal,
}
