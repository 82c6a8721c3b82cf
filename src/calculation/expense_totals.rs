//! Expense totals.

use crate::models::{ExpenseRow, ExpenseTotals, PaidBy, PaymentMethod};

/// Sums expense amounts overall and by payment method and payer.
///
/// Refunds only count for expenses an employee paid.
///
/// # Examples
///
/// ```
/// use gratuity_engine::calculation::compute_expense_totals;
/// use gratuity_engine::models::{ExpenseRow, PaymentMethod};
/// use rust_decimal::Decimal;
///
/// let ice = ExpenseRow::new("ICE", Decimal::new(1500, 2), PaymentMethod::Cash);
/// let totals = compute_expense_totals(&[ice]);
/// assert_eq!(totals.total_cash, Decimal::new(1500, 2));
/// assert_eq!(totals.total_check, Decimal::ZERO);
/// ```
pub fn compute_expense_totals(rows: &[ExpenseRow]) -> ExpenseTotals {
    rows.iter().fold(ExpenseTotals::default(), |mut acc, row| {
        let amount = row.amount;
        acc.total_expenses = acc.total_expenses.saturating_add(amount);
        match row.payment_method {
            PaymentMethod::Check => acc.total_check = acc.total_check.saturating_add(amount),
            PaymentMethod::Cash => acc.total_cash = acc.total_cash.saturating_add(amount),
            PaymentMethod::Other(_) => {}
        }
        match row.paid_by {
            PaidBy::Business => acc.total_business = acc.total_business.saturating_add(amount),
            PaidBy::Employee => acc.total_employee = acc.total_employee.saturating_add(amount),
            PaidBy::Unset => {}
        }
        if row.is_refunded_to_employee() {
            acc.total_refunded = acc.total_refunded.saturating_add(amount);
        }
        acc
    })
}
