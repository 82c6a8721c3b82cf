//! Invoice allocation: subtotals and category breakdowns for vendor bills.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::sales_totals::saturating_sum;
use crate::models::{Invoice, InvoiceItem};

/// Category label for items filed without one.
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// One category's slice of an invoice subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Upper-cased category name.
    pub category: String,
    /// Sum of the category's item amounts.
    pub amount: Decimal,
    /// Share of the subtotal in percent, to one decimal place.
    pub percentage: Decimal,
}

/// Derived figures for a single invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Sum of the item amounts.
    pub subtotal: Decimal,
    /// Tax as billed.
    pub tax: Decimal,
    /// Shipping as billed.
    pub shipping: Decimal,
    /// Subtotal plus tax and shipping.
    pub invoice_total: Decimal,
    /// Correction as entered.
    pub correction: Decimal,
    /// Invoice total less the correction.
    pub after_correction: Decimal,
    /// Per-category amounts, in order of first appearance.
    pub categories: Vec<CategoryShare>,
    /// Items with a discrepancy noted.
    pub discrepancies: Vec<InvoiceItem>,
}

/// Invoice amounts across a set of invoices, by invoice category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLedgerTotals {
    /// All invoices.
    pub total: Decimal,
    /// Invoices filed under `food`.
    pub food: Decimal,
    /// Invoices filed under `beverage`.
    pub beverage: Decimal,
    /// Invoices filed under `equipment`.
    pub equipment: Decimal,
    /// Invoices filed under `other`.
    pub other: Decimal,
}

/// Sums the item amounts of an invoice.
pub fn invoice_subtotal(invoice: &Invoice) -> Decimal {
    saturating_sum(invoice.items.iter().map(|item| item.amount))
}

/// Computes the subtotal, total and category distribution of an invoice.
///
/// Percentages are zero when the subtotal is not positive.
///
/// # Examples
///
/// ```
/// use gratuity_engine::calculation::summarize_invoice;
/// use gratuity_engine::models::{Invoice, InvoiceItem};
/// use rust_decimal::Decimal;
///
/// let item = |category: &str, amount: i64| InvoiceItem {
///     category: category.to_string(),
///     amount: Decimal::from(amount),
///     ..InvoiceItem::default()
/// };
/// let invoice = Invoice {
///     tax: Decimal::from(5),
///     items: vec![item("food", 75), item("beverage", 25)],
///     ..Invoice::default()
/// };
///
/// let summary = summarize_invoice(&invoice);
/// assert_eq!(summary.invoice_total, Decimal::from(105));
/// assert_eq!(summary.categories[0].category, "FOOD");
/// assert_eq!(summary.categories[0].percentage, Decimal::from(75));
/// ```
pub fn summarize_invoice(invoice: &Invoice) -> InvoiceSummary {
    let subtotal = invoice_subtotal(invoice);
    let invoice_total = subtotal
        .saturating_add(invoice.tax)
        .saturating_add(invoice.shipping);

    let mut categories: Vec<CategoryShare> = Vec::new();
    for item in &invoice.items {
        let category = category_label(&item.category);
        match categories.iter_mut().find(|share| share.category == category) {
            Some(share) => share.amount = share.amount.saturating_add(item.amount),
            None => categories.push(CategoryShare {
                category,
                amount: item.amount,
                percentage: Decimal::ZERO,
            }),
        }
    }
    for share in &mut categories {
        share.percentage = percentage_of(share.amount, subtotal);
    }

    InvoiceSummary {
        subtotal,
        tax: invoice.tax,
        shipping: invoice.shipping,
        invoice_total,
        correction: invoice.correction,
        after_correction: invoice_total.saturating_sub(invoice.correction),
        categories,
        discrepancies: invoice
            .items
            .iter()
            .filter(|item| item.has_discrepancy())
            .cloned()
            .collect(),
    }
}

/// Totals invoice amounts (item subtotals) overall and per invoice category.
///
/// Invoices filed under a category other than food, beverage, equipment or
/// other count toward the overall total only.
pub fn summarize_invoices(invoices: &[Invoice]) -> InvoiceLedgerTotals {
    invoices.iter().fold(InvoiceLedgerTotals::default(), |mut acc, invoice| {
        let amount = invoice_subtotal(invoice);
        acc.total = acc.total.saturating_add(amount);
        match invoice.category.as_str() {
            "food" => acc.food = acc.food.saturating_add(amount),
            "beverage" => acc.beverage = acc.beverage.saturating_add(amount),
            "equipment" => acc.equipment = acc.equipment.saturating_add(amount),
            "other" => acc.other = acc.other.saturating_add(amount),
            _ => {}
        }
        acc
    })
}

fn category_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

fn percentage_of(amount: Decimal, subtotal: Decimal) -> Decimal {
    if subtotal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    amount
        .checked_div(subtotal)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
