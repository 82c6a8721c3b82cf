//! Miscellaneous expenses paid out during an event.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lenient;

/// How an expense was paid.
///
/// Only `CHECK` and `CASH` feed their own totals; anything else (including
/// an empty selection) is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Paid by check.
    Check,
    /// Paid in cash.
    Cash,
    /// Any other or unselected method.
    Other(String),
}

impl PaymentMethod {
    /// Returns the stored representation of the method.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Check => "CHECK",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Other(value) => value,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Other(String::new())
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("CHECK") {
            PaymentMethod::Check
        } else if trimmed.eq_ignore_ascii_case("CASH") {
            PaymentMethod::Cash
        } else {
            PaymentMethod::Other(trimmed.to_string())
        }
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::string(deserializer).map(|value| PaymentMethod::from(value.as_str()))
    }
}

/// Who paid for an expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PaidBy {
    /// Paid by the business.
    Business,
    /// Paid out of pocket by an employee.
    Employee,
    /// Not selected yet.
    #[default]
    Unset,
}

impl PaidBy {
    /// Returns the stored representation of the payer.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidBy::Business => "BUSINESS",
            PaidBy::Employee => "EMPLOYEE",
            PaidBy::Unset => "",
        }
    }
}

impl From<&str> for PaidBy {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("BUSINESS") {
            PaidBy::Business
        } else if trimmed.eq_ignore_ascii_case("EMPLOYEE") {
            PaidBy::Employee
        } else {
            PaidBy::Unset
        }
    }
}

impl Serialize for PaidBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaidBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::string(deserializer).map(|value| PaidBy::from(value.as_str()))
    }
}

/// One cash or check expense tied to an event.
///
/// `employee_name` and `refunded` only mean something when the expense was
/// paid by an employee; use [`ExpenseRow::set_paid_by`] or
/// [`ExpenseRow::normalized`] to keep them cleared for business expenses.
///
/// # Example
///
/// ```
/// use gratuity_engine::models::{ExpenseRow, PaidBy, PaymentMethod};
/// use rust_decimal::Decimal;
///
/// let mut row = ExpenseRow::new("ICE", Decimal::new(1500, 2), PaymentMethod::Cash);
/// row.set_paid_by(PaidBy::Employee);
/// row.employee_name = "ANA".to_string();
/// row.refunded = true;
///
/// row.set_paid_by(PaidBy::Business);
/// assert_eq!(row.employee_name, "");
/// assert!(!row.refunded);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// What the money was spent on.
    #[serde(alias = "expenseName", default, deserialize_with = "lenient::string")]
    pub expense_name: String,
    /// The amount spent.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    /// How it was paid.
    #[serde(alias = "paymentMethod", default)]
    pub payment_method: PaymentMethod,
    /// Who paid.
    #[serde(alias = "paidBy", default)]
    pub paid_by: PaidBy,
    /// The employee who paid, when paid by an employee.
    #[serde(alias = "employeeName", default, deserialize_with = "lenient::string")]
    pub employee_name: String,
    /// Whether the employee has been paid back.
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub refunded: bool,
}

impl ExpenseRow {
    /// Creates an expense with no payer selected.
    pub fn new(
        expense_name: impl Into<String>,
        amount: Decimal,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            expense_name: expense_name.into(),
            amount,
            payment_method,
            ..Self::default()
        }
    }

    /// Sets the payer, clearing employee details when the business paid.
    pub fn set_paid_by(&mut self, paid_by: PaidBy) {
        self.paid_by = paid_by;
        if paid_by == PaidBy::Business {
            self.employee_name.clear();
            self.refunded = false;
        }
    }

    /// Returns the row with the business-payer invariant applied.
    pub fn normalized(mut self) -> Self {
        let paid_by = self.paid_by;
        self.set_paid_by(paid_by);
        self
    }

    /// True when an employee paid and has been refunded.
    pub fn is_refunded_to_employee(&self) -> bool {
        self.refunded && self.paid_by == PaidBy::Employee
    }
}
