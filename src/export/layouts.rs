//! Table layouts for the exported reports.

use chrono::NaiveDate;

use crate::calculation::{GratuityReport, summarize_invoice};
use crate::models::{ClosedEvent, EventInfo, Invoice, SalesRow, SalesTotals, TipDistributionEntry};

use super::table::{Table, format_amount, format_currency, format_points};

/// Column headers of the employee tip report.
pub const EMPLOYEE_REPORT_HEADERS: [&str; 6] = [
    "EMPLOYEE",
    "POSITION",
    "CC GRATUITY",
    "CASH GRATUITY",
    "TOTAL GRATUITY",
    "POINTS",
];

/// Column headers of the closed-events directory.
pub const CLOSED_EVENTS_HEADERS: [&str; 11] = [
    "Date",
    "Day",
    "Event",
    "Shift",
    "Manager",
    "Net Sales",
    "CC Sales",
    "Cash Sales",
    "Expenses",
    "Gratuity",
    "Status",
];

/// Column headers of the gratuity report.
pub const GRATUITY_REPORT_HEADERS: [&str; 5] =
    ["Employee", "Position", "CC GRAT", "CASH GRAT", "Points"];

/// Column headers of the invoice item list.
pub const INVOICE_ITEM_HEADERS: [&str; 8] = [
    "PRODUCT (AI)",
    "ITEM",
    "QTY",
    "UNITS",
    "UNIT PRICE",
    "AMOUNT",
    "CATEGORY",
    "DISCREPANCY",
];

/// Lays out the per-employee tip report handed to staff after an event.
///
/// Position and points come from the sales row with the same employee name;
/// a distribution entry without a matching row shows a blank position and
/// zero points.
pub fn employee_tip_report_table(
    event_info: &EventInfo,
    distribution: &[TipDistributionEntry],
    totals: &SalesTotals,
    sales: &[SalesRow],
) -> Table {
    let mut table = Table::new("Employee Report");
    table.push_row(["EMPLOYEE GRATUITY REPORT"]);
    table.push_blank();
    table.push_row(["Event:".to_string(), event_info.event_name.clone()]);
    table.push_row(["Date:".to_string(), event_info.date.format("%Y-%m-%d").to_string()]);
    table.push_row(["Shift:".to_string(), event_info.shift.clone()]);
    table.push_blank();
    table.push_row(EMPLOYEE_REPORT_HEADERS);

    for entry in distribution {
        let row = sales.iter().find(|row| row.employee == entry.employee);
        table.push_row([
            entry.employee.clone(),
            row.map(|r| r.position.clone()).unwrap_or_default(),
            format_currency(entry.cc_gratuity),
            format_currency(entry.cash_gratuity),
            format_currency(entry.tips),
            format_points(row.map(|r| r.points).unwrap_or_default()),
        ]);
    }

    table.push_blank();
    table.push_row([
        "TOTAL".to_string(),
        String::new(),
        format_currency(totals.total_cc_gratuity),
        format_currency(totals.total_cash_gratuity),
        format_currency(totals.total_gratuity),
        format_points(totals.total_points),
    ]);
    table
}

/// Lays out the employee tip report of a closed event.
pub fn closed_event_tip_report_table(event: &ClosedEvent) -> Table {
    employee_tip_report_table(
        &event.event_info,
        &event.tip_distribution,
        &event.totals,
        &event.sales,
    )
}

/// Lays out the closed-events directory, one row per event.
pub fn closed_events_table<'a, I>(events: I) -> Table
where
    I: IntoIterator<Item = &'a ClosedEvent>,
{
    let mut table = Table::new("Closed Events");
    table.push_row(CLOSED_EVENTS_HEADERS);

    for event in events {
        let info = &event.event_info;
        table.push_row([
            info.date.format("%Y-%m-%d").to_string(),
            info.day.clone(),
            info.event_name.clone(),
            info.shift.clone(),
            info.manager.clone(),
            format_amount(event.totals.total_net_sales),
            format_amount(event.totals.total_cc_sales),
            format_amount(event.totals.total_cash_sales),
            format_amount(event.expense_totals.total_expenses),
            format_amount(event.totals.total_gratuity),
            "CLOSED".to_string(),
        ]);
    }
    table
}

/// Lays out the gratuity report with a trailing TOTAL row.
pub fn gratuity_report_table(report: &GratuityReport) -> Table {
    let mut table = Table::new("Gratuity Report");
    table.push_row(GRATUITY_REPORT_HEADERS);

    for row in &report.rows {
        table.push_row([
            row.employee.clone(),
            row.position.clone(),
            format_amount(row.cc_gratuity),
            format_amount(row.cash_gratuity),
            format_points(row.points),
        ]);
    }

    table.push_row([
        "TOTAL".to_string(),
        String::new(),
        format_amount(report.totals.cc_gratuity),
        format_amount(report.totals.cash_gratuity),
        format_points(report.totals.points),
    ]);
    table
}

/// Lays out a vendor invoice: the header block, then one row per item.
///
/// `Amount` is the invoice total (items plus tax and shipping).
pub fn invoice_table(invoice: &Invoice) -> Table {
    let date = |value: Option<NaiveDate>| {
        value
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let summary = summarize_invoice(invoice);

    let mut table = Table::new("Invoice");
    table.push_row(["INVOICE INFORMATION"]);
    table.push_blank();
    table.push_row(["Vendor".to_string(), invoice.vendor.clone()]);
    table.push_row(["Bill Number".to_string(), invoice.bill_number.clone()]);
    table.push_row(["Date".to_string(), date(invoice.date)]);
    table.push_row(["Due Date".to_string(), date(invoice.due_date)]);
    table.push_row(["Terms".to_string(), invoice.terms.clone()]);
    table.push_row(["Category".to_string(), invoice.category.clone()]);
    table.push_row(["Memo".to_string(), invoice.memo.clone()]);
    table.push_row(["Tax".to_string(), format_amount(invoice.tax)]);
    table.push_row(["Shipping".to_string(), format_amount(invoice.shipping)]);
    table.push_row(["Correction".to_string(), format_amount(invoice.correction)]);
    table.push_row(["Amount".to_string(), format_amount(summary.invoice_total)]);
    table.push_blank();
    table.push_row(INVOICE_ITEM_HEADERS);

    for item in &invoice.items {
        table.push_row([
            item.product.clone(),
            item.item.clone(),
            format_points(item.quantity),
            item.units.clone(),
            format_amount(item.unit_price),
            format_amount(item.amount),
            item.category.clone(),
            item.discrepancy.clone(),
        ]);
    }
    table
}

/// File name for an exported invoice.
///
/// A blank vendor falls back to `Vendor`.
pub fn invoice_file_name(invoice: &Invoice) -> String {
    let vendor = invoice.vendor.trim();
    let vendor = if vendor.is_empty() { "Vendor" } else { vendor };
    format!("Invoice_{}_{}.csv", vendor, invoice.bill_number.trim())
}

/// File name for an event's employee tip report.
///
/// A blank event name falls back to `EVENT`.
pub fn employee_report_file_name(event_info: &EventInfo) -> String {
    let name = event_info.event_name.trim();
    let name = if name.is_empty() { "EVENT" } else { name };
    format!("{}_{}_EmployeeReport.csv", name, event_info.date.format("%Y-%m-%d"))
}

/// File name for the closed-events directory exported on `today`.
pub fn closed_events_file_name(today: NaiveDate) -> String {
    format!("closed-events-{}.csv", today.format("%Y-%m-%d"))
}

/// File name for the gratuity report.
pub const GRATUITY_REPORT_FILE_NAME: &str = "gratuity-report.csv";
