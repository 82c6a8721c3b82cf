//! Cross-event gratuity report.
//!
//! Aggregates the tip distributions of many closed events into one row per
//! employee and position.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EmployeeDirectory;
use crate::models::{ClosedEvent, ClosedEventFilter};

/// Position used when neither the directory nor the entry names one.
pub const UNKNOWN_POSITION: &str = "UNKNOWN";

/// One employee's accumulated gratuity in one position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityReportRow {
    /// The employee's name.
    pub employee: String,
    /// The position the gratuity was earned in.
    pub position: String,
    /// Credit card gratuity across the matched events.
    pub cc_gratuity: Decimal,
    /// Cash gratuity across the matched events.
    pub cash_gratuity: Decimal,
    /// Points across the matched events.
    pub points: Decimal,
}

/// Column totals of a [`GratuityReport`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityReportTotals {
    /// Sum of `cc_gratuity`.
    pub cc_gratuity: Decimal,
    /// Sum of `cash_gratuity`.
    pub cash_gratuity: Decimal,
    /// Sum of `points`.
    pub points: Decimal,
}

/// Gratuity per employee and position over a set of closed events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityReport {
    /// Rows in order of first appearance.
    pub rows: Vec<GratuityReportRow>,
    /// Column totals.
    pub totals: GratuityReportTotals,
}

/// Returns the events matching `filter`, in their original order.
pub fn filter_closed_events<'a>(
    events: &'a [ClosedEvent],
    filter: &ClosedEventFilter,
) -> Vec<&'a ClosedEvent> {
    events.iter().filter(|event| filter.matches(event)).collect()
}

/// Builds the gratuity report for the events matching `filter`.
///
/// Each tip entry's position comes from the employee directory, falling back
/// to the position stored on the entry and then to [`UNKNOWN_POSITION`].
/// Entries without an employee name are skipped. When `position` is given,
/// only rows in exactly that position are kept.
///
/// # Examples
///
/// ```
/// use gratuity_engine::calculation::build_gratuity_report;
/// use gratuity_engine::config::EmployeeDirectory;
/// use gratuity_engine::models::ClosedEventFilter;
///
/// let filter = ClosedEventFilter::default();
/// let report = build_gratuity_report(&[], &filter, None, &EmployeeDirectory::default());
/// assert!(report.rows.is_empty());
/// ```
pub fn build_gratuity_report(
    events: &[ClosedEvent],
    filter: &ClosedEventFilter,
    position: Option<&str>,
    directory: &EmployeeDirectory,
) -> GratuityReport {
    let wanted_position = position.map(str::trim).filter(|p| !p.is_empty());
    let mut report = GratuityReport::default();

    for event in filter_closed_events(events, filter) {
        for entry in &event.tip_distribution {
            let employee = entry.employee.trim();
            if employee.is_empty() {
                continue;
            }

            let entry_position = entry.position.trim();
            let resolved = directory
                .position_of(employee)
                .or((!entry_position.is_empty()).then_some(entry_position))
                .unwrap_or(UNKNOWN_POSITION);

            if wanted_position.is_some_and(|wanted| wanted != resolved) {
                continue;
            }

            let index = match report
                .rows
                .iter()
                .position(|row| row.employee == employee && row.position == resolved)
            {
                Some(index) => index,
                None => {
                    report.rows.push(GratuityReportRow {
                        employee: employee.to_string(),
                        position: resolved.to_string(),
                        ..GratuityReportRow::default()
                    });
                    report.rows.len() - 1
                }
            };

            let row = &mut report.rows[index];
            row.cc_gratuity = row.cc_gratuity.saturating_add(entry.cc_gratuity);
            row.cash_gratuity = row.cash_gratuity.saturating_add(entry.cash_gratuity);
            row.points = row.points.saturating_add(entry.points);

            let totals = &mut report.totals;
            totals.cc_gratuity = totals.cc_gratuity.saturating_add(entry.cc_gratuity);
            totals.cash_gratuity = totals.cash_gratuity.saturating_add(entry.cash_gratuity);
            totals.points = totals.points.saturating_add(entry.points);
        }
    }

    report
}
