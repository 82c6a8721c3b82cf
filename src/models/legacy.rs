//! Normalization of stored closed-event records.
//!
//! Closed events have been written in two shapes over time: the flat
//! database row (`report_id`, `event_date`, `total_net_sales`,
//! `tip_distribution`, ...) and the camelCase snapshot kept by the browser
//! (`id`, `eventInfo`, `totals.totalNetSales`, `tipDistribution`, ...).
//! Version 1 records also lack `points` on their tip entries.
//!
//! [`normalize_legacy_record`] reads either shape once, at the boundary, and
//! produces a typed [`ClosedEvent`] at the current schema version. Nothing
//! past this point sees the alias names.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::calculation::{compute_expense_totals, compute_sales_totals};
use crate::error::{EngineError, EngineResult};

use super::lenient::Lenient;
use super::{
    CLOSED_EVENT_SCHEMA_VERSION, ClosedEvent, DistributionMethod, EventInfo, EventStatus,
    ExpenseRow, ExpenseTotals, OtherFeeRow, PerformanceRow, SalesRow, SalesTotals,
    TipDistributionEntry,
};

const REPORT_ID: &[&str] = &["/report_id", "/id"];
const CLOSED_AT: &[&str] = &["/closed_at", "/timestamp"];
const CLOSED_BY: &[&str] = &["/closed_by", "/closedBy"];
const RESTAURANT_ID: &[&str] = &["/restaurant_id", "/restaurantId"];
const RESTAURANT_NAME: &[&str] = &["/restaurant_name", "/restaurantName"];
const METHOD: &[&str] = &["/distribution_method", "/distributionMethod"];
const EVENT_SUMMARY: &[&str] = &["/event_summary", "/eventSummary"];
const VERSION: &[&str] = &["/version"];

const EVENT_DATE: &[&str] = &["/event_info/date", "/eventInfo/date", "/event_date"];
const EVENT_DAY: &[&str] = &["/event_info/day", "/eventInfo/day", "/event_day"];
const EVENT_NAME: &[&str] = &[
    "/event_info/event_name",
    "/event_info/eventName",
    "/eventInfo/eventName",
    "/event_name",
];
const SHIFT: &[&str] = &["/event_info/shift", "/eventInfo/shift", "/shift"];
const MANAGER: &[&str] = &["/event_info/manager", "/eventInfo/manager", "/manager"];
const NOTES: &[&str] = &["/event_info/notes", "/eventInfo/notes", "/event_notes"];
const OTHER_FEE: &[&str] = &[
    "/event_info/other_fee",
    "/event_info/otherFee",
    "/eventInfo/otherFee",
    "/other_fee",
];

const SALES_ROWS: &[&str] = &["/sales", "/sales_data", "/salesData"];
const EXPENSE_ROWS: &[&str] = &["/expenses", "/expense_data", "/expenseData"];
const OTHER_FEE_ROWS: &[&str] = &["/other_fees", "/other_fee_data", "/otherFeeData"];
const TIP_ROWS: &[&str] = &["/tip_distribution", "/tipDistribution"];
const PERFORMANCE_ROWS: &[&str] = &["/performance_report", "/performanceReport"];

const NET_SALES: &[&str] = &[
    "/totals/total_net_sales",
    "/totals/totalNetSales",
    "/totalNetSales",
    "/total_net_sales",
    "/net_sales",
];
const CASH_SALES: &[&str] = &[
    "/totals/total_cash_sales",
    "/totals/totalCashSales",
    "/totals/cashSales",
    "/totalCashSales",
    "/cashSales",
    "/total_cash_sales",
    "/cash_sales",
    "/event_info/cashSales",
];
const CC_SALES: &[&str] = &[
    "/totals/total_cc_sales",
    "/totals/totalCcSales",
    "/totals/totalCCSales",
    "/totals/ccSales",
    "/totalCCSales",
    "/ccSales",
    "/total_cc_sales",
    "/cc_sales",
    "/event_info/ccSales",
];
const CC_GRATUITY: &[&str] = &[
    "/totals/total_cc_gratuity",
    "/totals/totalCcGratuity",
    "/total_cc_gratuity",
];
const CASH_GRATUITY: &[&str] = &[
    "/totals/total_cash_gratuity",
    "/totals/totalCashGratuity",
    "/total_cash_gratuity",
];
const POINTS: &[&str] = &["/totals/total_points", "/totals/totalPoints", "/total_points"];
const GRATUITY: &[&str] = &[
    "/totals/total_gratuity",
    "/totals/totalGratuity",
    "/totalGratuity",
    "/total_gratuity",
    "/gratuity",
];

const EXPENSES: &[&str] = &[
    "/expense_totals/total_expenses",
    "/expenseTotals/totalExpenses",
    "/totalExpenses",
    "/total_expenses",
];
const CHECK: &[&str] = &[
    "/expense_totals/total_check",
    "/expenseTotals/totalCheck",
    "/total_check",
];
const CASH: &[&str] = &[
    "/expense_totals/total_cash",
    "/expenseTotals/totalCash",
    "/total_cash",
];
const BUSINESS: &[&str] = &[
    "/expense_totals/total_business",
    "/expenseTotals/totalBusiness",
    "/total_business",
];
const EMPLOYEE: &[&str] = &[
    "/expense_totals/total_employee",
    "/expenseTotals/totalEmployee",
    "/total_employee",
];
const REFUNDED: &[&str] = &[
    "/expense_totals/total_refunded",
    "/expenseTotals/totalRefunded",
    "/total_refunded",
];

/// Converts a stored closed-event record of any known shape into a
/// [`ClosedEvent`].
///
/// Stored totals win over recomputation, because old records may carry
/// totals without their rows; a total missing from the record is recomputed
/// from the rows instead. Tip entries without `points` get zero and entries
/// without `tips` get `cc_gratuity + cash_gratuity`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRecord`] when the record is not an object,
/// has no report id, has no parseable event date, or holds a row list that
/// is not a list of objects.
///
/// # Example
///
/// ```
/// use gratuity_engine::models::normalize_legacy_record;
/// use serde_json::json;
///
/// let record = json!({
///     "report_id": "example_20260104",
///     "event_date": "2026-01-04",
///     "event_name": "EVENTO EJEMPLO",
///     "total_gratuity": 250,
///     "tip_distribution": [
///         { "employee": "Juan", "cc_gratuity": 100, "cash_gratuity": 50 }
///     ]
/// });
///
/// let event = normalize_legacy_record(&record).unwrap();
/// assert_eq!(event.event_info.day, "SUNDAY");
/// assert_eq!(event.tip_distribution[0].tips.to_string(), "150");
/// ```
pub fn normalize_legacy_record(record: &Value) -> EngineResult<ClosedEvent> {
    if !record.is_object() {
        return Err(invalid("record is not a JSON object"));
    }

    let report_id = text_at(record, REPORT_ID);
    if report_id.trim().is_empty() {
        return Err(invalid("record has no report id"));
    }

    let event_info = event_info(record)?;
    let sales: Vec<SalesRow> = rows_at(record, SALES_ROWS)?;
    let expenses: Vec<ExpenseRow> = rows_at::<ExpenseRow>(record, EXPENSE_ROWS)?
        .into_iter()
        .map(ExpenseRow::normalized)
        .collect();
    let other_fees: Vec<OtherFeeRow> = rows_at(record, OTHER_FEE_ROWS)?;
    let performance_report: Vec<PerformanceRow> =
        rows_at::<PerformanceRow>(record, PERFORMANCE_ROWS)?
            .into_iter()
            .filter(|row| !row.is_blank())
            .map(PerformanceRow::normalized)
            .collect();
    let tip_distribution = tip_entries(record)?;

    let totals = sales_totals(record, &sales);
    let expense_totals = expense_totals(record, &expenses);

    let closed_at = text_at_opt(record, CLOSED_AT)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|stamp| stamp.with_timezone(&Utc))
        .unwrap_or_else(|| event_info.date.and_time(NaiveTime::MIN).and_utc());

    let distribution_method = text_at_opt(record, METHOD)
        .and_then(|raw| raw.parse::<DistributionMethod>().ok())
        .unwrap_or_default();

    let stored_version = value_at(record, VERSION)
        .and_then(Value::as_u64)
        .unwrap_or(1);
    if stored_version < u64::from(CLOSED_EVENT_SCHEMA_VERSION) {
        debug!(
            report_id = %report_id,
            stored_version,
            "Migrating closed event record to current schema"
        );
    }

    Ok(ClosedEvent {
        report_id,
        closed_at,
        closed_by: text_at(record, CLOSED_BY),
        restaurant_id: text_at(record, RESTAURANT_ID),
        restaurant_name: text_at(record, RESTAURANT_NAME),
        event_info,
        sales,
        expenses,
        other_fees,
        totals,
        expense_totals,
        tip_distribution,
        distribution_method,
        performance_report,
        event_summary: text_at(record, EVENT_SUMMARY),
        status: EventStatus::Closed,
        version: CLOSED_EVENT_SCHEMA_VERSION,
    })
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidRecord {
        message: message.into(),
    }
}

/// First non-null value along a fallback chain.
fn value_at<'a>(record: &'a Value, pointers: &[&str]) -> Option<&'a Value> {
    pointers
        .iter()
        .filter_map(|pointer| record.pointer(pointer))
        .find(|value| !value.is_null())
}

fn text_at_opt(record: &Value, pointers: &[&str]) -> Option<String> {
    value_at(record, pointers).and_then(|value| match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn text_at(record: &Value, pointers: &[&str]) -> String {
    text_at_opt(record, pointers).unwrap_or_default()
}

/// First numeric value along a fallback chain; lists and objects are skipped
/// so a row list never masquerades as a total.
fn decimal_at(record: &Value, pointers: &[&str]) -> Option<Decimal> {
    pointers
        .iter()
        .filter_map(|pointer| record.pointer(pointer))
        .find(|value| value.is_number() || value.is_string())
        .and_then(|value| Lenient::deserialize(value).ok())
        .map(|lenient| lenient.0)
}

fn rows_at<T: DeserializeOwned>(record: &Value, pointers: &[&str]) -> EngineResult<Vec<T>> {
    let Some(rows) = pointers
        .iter()
        .filter_map(|pointer| record.pointer(pointer))
        .find(|value| value.is_array())
    else {
        return Ok(Vec::new());
    };

    serde_json::from_value(rows.clone()).map_err(|e| invalid(format!("bad row list: {}", e)))
}

fn event_info(record: &Value) -> EngineResult<EventInfo> {
    let raw_date =
        text_at_opt(record, EVENT_DATE).ok_or_else(|| invalid("record has no event date"))?;
    let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
        .map_err(|e| invalid(format!("unparseable event date '{}': {}", raw_date, e)))?;

    Ok(EventInfo {
        date,
        day: text_at(record, EVENT_DAY),
        event_name: text_at(record, EVENT_NAME),
        shift: text_at(record, SHIFT),
        manager: text_at(record, MANAGER),
        notes: text_at(record, NOTES),
        other_fee: decimal_at(record, OTHER_FEE).unwrap_or(Decimal::ZERO),
    }
    .normalized())
}

fn tip_entries(record: &Value) -> EngineResult<Vec<TipDistributionEntry>> {
    let Some(Value::Array(items)) = TIP_ROWS
        .iter()
        .filter_map(|pointer| record.pointer(pointer))
        .find(|value| value.is_array())
    else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .map(|item| {
            let mut entry: TipDistributionEntry = serde_json::from_value(item.clone())
                .map_err(|e| invalid(format!("bad tip distribution entry: {}", e)))?;
            if item.get("tips").is_none_or(Value::is_null) {
                entry.tips = entry.cc_gratuity.saturating_add(entry.cash_gratuity);
            }
            Ok(entry)
        })
        .collect()
}

fn sales_totals(record: &Value, sales: &[SalesRow]) -> SalesTotals {
    let computed = compute_sales_totals(sales);
    let total_cc_gratuity = decimal_at(record, CC_GRATUITY).unwrap_or(computed.total_cc_gratuity);
    let total_cash_gratuity =
        decimal_at(record, CASH_GRATUITY).unwrap_or(computed.total_cash_gratuity);

    SalesTotals {
        total_net_sales: decimal_at(record, NET_SALES).unwrap_or(computed.total_net_sales),
        total_cash_sales: decimal_at(record, CASH_SALES).unwrap_or(computed.total_cash_sales),
        total_cc_sales: decimal_at(record, CC_SALES).unwrap_or(computed.total_cc_sales),
        total_cc_gratuity,
        total_cash_gratuity,
        total_points: decimal_at(record, POINTS).unwrap_or(computed.total_points),
        total_gratuity: decimal_at(record, GRATUITY)
            .unwrap_or(total_cc_gratuity.saturating_add(total_cash_gratuity)),
    }
}

fn expense_totals(record: &Value, expenses: &[ExpenseRow]) -> ExpenseTotals {
    let computed = compute_expense_totals(expenses);

    ExpenseTotals {
        total_expenses: decimal_at(record, EXPENSES).unwrap_or(computed.total_expenses),
        total_check: decimal_at(record, CHECK).unwrap_or(computed.total_check),
        total_cash: decimal_at(record, CASH).unwrap_or(computed.total_cash),
        total_business: decimal_at(record, BUSINESS).unwrap_or(computed.total_business),
        total_employee: decimal_at(record, EMPLOYEE).unwrap_or(computed.total_employee),
        total_refunded: decimal_at(record, REFUNDED).unwrap_or(computed.total_refunded),
    }
}
