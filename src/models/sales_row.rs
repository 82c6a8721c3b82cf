//! Per-employee sales rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// One employee's contribution to an event being closed out.
///
/// Rows are created empty when a line is added to the sales sheet and filled
/// in field by field. Numeric fields that are missing or not numbers read as
/// zero, and both the snake_case and the older camelCase field names are
/// accepted.
///
/// # Example
///
/// ```
/// use gratuity_engine::models::SalesRow;
///
/// let row: SalesRow = serde_json::from_str(
///     r#"{"employee": "Ana", "ccGratuity": 80, "cash_gratuity": "20", "points": 10}"#,
/// )
/// .unwrap();
/// assert!(row.is_named());
/// assert_eq!(row.cc_gratuity.to_string(), "80");
/// assert_eq!(row.cash_gratuity.to_string(), "20");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRow {
    /// The employee's name; blank rows take no share of the gratuity.
    #[serde(default, deserialize_with = "lenient::string")]
    pub employee: String,
    /// The employee's position for this event (e.g. "SERVER").
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    /// Net sales rung in by this employee.
    #[serde(alias = "netSales", default, deserialize_with = "lenient::decimal")]
    pub net_sales: Decimal,
    /// Sales settled in cash.
    #[serde(alias = "cashSales", default, deserialize_with = "lenient::decimal")]
    pub cash_sales: Decimal,
    /// Sales settled by credit card.
    #[serde(alias = "ccSales", default, deserialize_with = "lenient::decimal")]
    pub cc_sales: Decimal,
    /// Gratuity collected on credit cards.
    #[serde(alias = "ccGratuity", default, deserialize_with = "lenient::decimal")]
    pub cc_gratuity: Decimal,
    /// Gratuity collected in cash.
    #[serde(alias = "cashGratuity", default, deserialize_with = "lenient::decimal")]
    pub cash_gratuity: Decimal,
    /// Weight used by the percentage distribution.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub points: Decimal,
}

impl SalesRow {
    /// Creates an empty row for the given employee and position.
    pub fn new(employee: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            employee: employee.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    /// Returns true when the row names an employee (ignoring whitespace).
    pub fn is_named(&self) -> bool {
        !self.employee.trim().is_empty()
    }

    /// Total gratuity collected on this row.
    pub fn gratuity(&self) -> Decimal {
        self.cc_gratuity.saturating_add(self.cash_gratuity)
    }
}
