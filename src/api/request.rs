//! Request types for the Gratuity Engine API.
//!
//! Row fields are parsed leniently (see [`crate::models::lenient`]); only the
//! top-level collections and the event info are required.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::EventCloseout;
use crate::models::{
    ClosedEventFilter, DistributionMethod, EventInfo, ExpenseRow, Invoice, OtherFeeRow,
    PerformanceRow, SalesRow, lenient,
};

/// Request body for `POST /totals/sales`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTotalsRequest {
    /// The event's sales rows.
    pub sales: Vec<SalesRow>,
}

/// Request body for `POST /totals/expenses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseTotalsRequest {
    /// The event's expense rows.
    pub expenses: Vec<ExpenseRow>,
}

/// Request body for `POST /tip-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipReportRequest {
    /// The event's sales rows.
    pub sales: Vec<SalesRow>,
    /// Distribution method; the restaurant default when omitted.
    #[serde(default)]
    pub method: Option<DistributionMethod>,
}

/// Request body for `POST /events/close`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseEventRequest {
    /// Event metadata.
    #[serde(alias = "eventInfo")]
    pub event_info: EventInfo,
    /// Sales rows.
    pub sales: Vec<SalesRow>,
    /// Expense rows.
    #[serde(default)]
    pub expenses: Vec<ExpenseRow>,
    /// Staff sharing the other fee.
    #[serde(alias = "otherFees", default)]
    pub other_fees: Vec<OtherFeeRow>,
    /// Distribution method; the restaurant default when omitted.
    #[serde(default)]
    pub method: Option<DistributionMethod>,
    /// Performance notes on individual staff.
    #[serde(alias = "performanceReport", default)]
    pub performance_report: Vec<PerformanceRow>,
    /// Manager's summary of the night.
    #[serde(alias = "eventSummary", default)]
    pub event_summary: String,
}

impl CloseEventRequest {
    /// Converts the request into a close-out, filling in the method.
    pub fn into_closeout(self, default_method: DistributionMethod) -> EventCloseout {
        EventCloseout {
            event_info: self.event_info,
            sales: self.sales,
            expenses: self.expenses,
            other_fees: self.other_fees,
            method: self.method.unwrap_or(default_method),
            performance_report: self.performance_report,
            event_summary: self.event_summary,
        }
    }
}

/// Query string for `GET /gratuity-report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GratuityReportQuery {
    /// Earliest event date (inclusive).
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date_from: Option<NaiveDate>,
    /// Latest event date (inclusive).
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date_to: Option<NaiveDate>,
    /// Manager on duty.
    #[serde(default)]
    pub manager: Option<String>,
    /// Event name.
    #[serde(default)]
    pub event_name: Option<String>,
    /// Shift.
    #[serde(default)]
    pub shift: Option<String>,
    /// Weekday name.
    #[serde(default)]
    pub day: Option<String>,
    /// Only report this position.
    #[serde(default)]
    pub position: Option<String>,
}

impl GratuityReportQuery {
    /// Splits the query into the event filter and the position filter.
    pub fn into_parts(self) -> (ClosedEventFilter, Option<String>) {
        let filter = ClosedEventFilter {
            date_from: self.date_from,
            date_to: self.date_to,
            manager: self.manager,
            event_name: self.event_name,
            shift: self.shift,
            day: self.day,
        };
        (filter, self.position)
    }
}

/// Request body for `POST /invoices/totals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceTotalsRequest {
    /// The invoices to total.
    pub invoices: Vec<Invoice>,
}

/// Query string for `GET /employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeesQuery {
    /// Only list this department; `MANAGEMENT` lists managers.
    #[serde(default)]
    pub department: Option<String>,
    /// Also list inactive employees.
    #[serde(default)]
    pub include_inactive: bool,
}
