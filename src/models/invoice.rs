//! Vendor invoices entered for cost allocation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// One line of a vendor invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Product name as read from the scanned bill.
    #[serde(
        alias = "product_ai",
        alias = "product_service",
        default,
        deserialize_with = "lenient::string"
    )]
    pub product: String,
    /// Item code or description.
    #[serde(default, deserialize_with = "lenient::string")]
    pub item: String,
    /// Quantity delivered.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub quantity: Decimal,
    /// Unit of measure (e.g. "CS", "LB").
    #[serde(default, deserialize_with = "lenient::string")]
    pub units: String,
    /// Price per unit.
    #[serde(alias = "rate", default, deserialize_with = "lenient::decimal")]
    pub unit_price: Decimal,
    /// Line amount as billed; this is what gets allocated.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    /// Cost category (e.g. "food", "beverage").
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,
    /// Free-text note when the delivery did not match the bill.
    #[serde(default, deserialize_with = "lenient::string")]
    pub discrepancy: String,
}

impl InvoiceItem {
    /// Returns true when a discrepancy was noted on the line.
    pub fn has_discrepancy(&self) -> bool {
        !self.discrepancy.trim().is_empty()
    }
}

/// A vendor invoice with its line items.
///
/// # Example
///
/// ```
/// use gratuity_engine::models::Invoice;
///
/// let invoice: Invoice = serde_json::from_str(
///     r#"{"vendor": "Sysco", "payment_terms": "NET 30", "tax": "4.50",
///         "items": [{"product_service": "LIMES", "rate": 2, "amount": 30}]}"#,
/// )
/// .unwrap();
/// assert_eq!(invoice.terms, "NET 30");
/// assert_eq!(invoice.category, "food");
/// assert_eq!(invoice.items[0].product, "LIMES");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Vendor name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub vendor: String,
    /// The vendor's bill number.
    #[serde(alias = "billNumber", default, deserialize_with = "lenient::string")]
    pub bill_number: String,
    /// Bill date.
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date: Option<NaiveDate>,
    /// Payment due date.
    #[serde(alias = "dueDate", default, deserialize_with = "lenient::optional_date")]
    pub due_date: Option<NaiveDate>,
    /// Payment terms (e.g. "NET 30").
    #[serde(alias = "payment_terms", default, deserialize_with = "lenient::string")]
    pub terms: String,
    /// Category the whole invoice is filed under; defaults to "food".
    #[serde(default = "default_category", deserialize_with = "lenient::string")]
    pub category: String,
    /// Free-form memo.
    #[serde(alias = "notes", default, deserialize_with = "lenient::string")]
    pub memo: String,
    /// Sales tax billed.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tax: Decimal,
    /// Shipping billed.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub shipping: Decimal,
    /// Credit taken off the invoice total after review.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub correction: Decimal,
    /// Line items.
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

fn default_category() -> String {
    "food".to_string()
}

impl Default for Invoice {
    fn default() -> Self {
        Self {
            vendor: String::new(),
            bill_number: String::new(),
            date: None,
            due_date: None,
            terms: String::new(),
            category: default_category(),
            memo: String::new(),
            tax: Decimal::ZERO,
            shipping: Decimal::ZERO,
            correction: Decimal::ZERO,
            items: Vec::new(),
        }
    }
}
