//! Closing an event into an immutable snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RestaurantContext;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CLOSED_EVENT_SCHEMA_VERSION, ClosedEvent, DistributionMethod, EventInfo, EventStatus,
    ExpenseRow, OtherFeeRow, PerformanceRow, SalesRow,
};

use super::{compute_expense_totals, compute_sales_totals, distribute_gratuity};

/// Everything entered for an event at close-out time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCloseout {
    /// Event metadata.
    #[serde(alias = "eventInfo")]
    pub event_info: EventInfo,
    /// Sales rows, one per employee.
    #[serde(default)]
    pub sales: Vec<SalesRow>,
    /// Expenses paid during the event.
    #[serde(default)]
    pub expenses: Vec<ExpenseRow>,
    /// Staff sharing the other fee.
    #[serde(alias = "otherFees", default)]
    pub other_fees: Vec<OtherFeeRow>,
    /// How to split the gratuity pool.
    #[serde(default)]
    pub method: DistributionMethod,
    /// Performance notes on individual staff.
    #[serde(alias = "performanceReport", default)]
    pub performance_report: Vec<PerformanceRow>,
    /// Manager's written summary.
    #[serde(alias = "eventSummary", default)]
    pub event_summary: String,
}

impl EventCloseout {
    /// Creates a close-out with only event info and sales rows.
    pub fn new(event_info: EventInfo, sales: Vec<SalesRow>, method: DistributionMethod) -> Self {
        Self {
            event_info,
            sales,
            expenses: Vec::new(),
            other_fees: Vec::new(),
            method,
            performance_report: Vec::new(),
            event_summary: String::new(),
        }
    }
}

/// Builds the report id for an event closed at `closed_at`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use gratuity_engine::calculation::report_id;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
/// let closed_at = Utc.timestamp_millis_opt(1_767_571_200_000).unwrap();
/// assert_eq!(
///     report_id(date, "EVENT 1", closed_at),
///     "2026-01-04_EVENT_1_1767571200000"
/// );
/// ```
pub fn report_id(date: chrono::NaiveDate, event_name: &str, closed_at: DateTime<Utc>) -> String {
    let name: String = event_name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!(
        "{}_{}_{}",
        date.format("%Y-%m-%d"),
        name,
        closed_at.timestamp_millis()
    )
}

/// Closes an event, producing its [`ClosedEvent`] snapshot.
///
/// The event info is normalized first (text trimmed and upper-cased, weekday
/// derived when blank) and expense rows paid by the business lose their
/// employee fields. Untouched performance rows are dropped. Totals, expense
/// totals and the tip distribution are computed from the rows as given.
///
/// # Errors
///
/// Returns `MissingEventField` when the event name is blank.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use gratuity_engine::calculation::{EventCloseout, close_event};
/// use gratuity_engine::config::RestaurantContext;
/// use gratuity_engine::models::{DistributionMethod, EventInfo, SalesRow};
///
/// let info = EventInfo::new(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(), "event 1");
/// let rows = vec![SalesRow::new("Ana", "RUNNER")];
/// let closeout = EventCloseout::new(info, rows, DistributionMethod::Equal);
/// let context = RestaurantContext::new("rest_1", "Harbor Grill", "APP_USER");
///
/// let event = close_event(closeout, &context, Utc::now())?;
/// assert_eq!(event.event_info.event_name, "EVENT 1");
/// assert_eq!(event.event_info.day, "SUNDAY");
/// # Ok::<(), gratuity_engine::error::EngineError>(())
/// ```
pub fn close_event(
    closeout: EventCloseout,
    context: &RestaurantContext,
    closed_at: DateTime<Utc>,
) -> EngineResult<ClosedEvent> {
    let event_info = closeout.event_info.normalized();
    if event_info.event_name.is_empty() {
        return Err(EngineError::MissingEventField {
            field: "event_name".to_string(),
        });
    }

    let expenses: Vec<ExpenseRow> = closeout
        .expenses
        .into_iter()
        .map(ExpenseRow::normalized)
        .collect();
    let performance_report: Vec<PerformanceRow> = closeout
        .performance_report
        .into_iter()
        .filter(|row| !row.is_blank())
        .map(PerformanceRow::normalized)
        .collect();

    let report_id = report_id(event_info.date, &event_info.event_name, closed_at);
    let totals = compute_sales_totals(&closeout.sales);
    let expense_totals = compute_expense_totals(&expenses);
    let tip_distribution = distribute_gratuity(&closeout.sales, closeout.method);

    info!(
        report_id = %report_id,
        rows = closeout.sales.len(),
        method = %closeout.method,
        total_gratuity = %totals.total_gratuity,
        "Closed event"
    );

    Ok(ClosedEvent {
        report_id,
        closed_at,
        closed_by: context.closed_by.clone(),
        restaurant_id: context.restaurant_id.clone(),
        restaurant_name: context.restaurant_name.clone(),
        event_info,
        sales: closeout.sales,
        expenses,
        other_fees: closeout.other_fees,
        totals,
        expense_totals,
        tip_distribution,
        distribution_method: closeout.method,
        performance_report,
        event_summary: closeout.event_summary.trim().to_string(),
        status: EventStatus::Closed,
        version: CLOSED_EVENT_SCHEMA_VERSION,
    })
}
