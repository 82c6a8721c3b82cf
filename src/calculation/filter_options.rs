//! Distinct values offered by the closed-event filters.

use serde::{Deserialize, Serialize};

use crate::config::EmployeeDirectory;
use crate::models::ClosedEvent;

/// Choices for each closed-event filter, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Managers on duty.
    pub managers: Vec<String>,
    /// Event names.
    pub event_names: Vec<String>,
    /// Shifts.
    pub shifts: Vec<String>,
    /// Weekday names.
    pub days: Vec<String>,
    /// Positions seen on tip entries, resolved like the gratuity report.
    pub positions: Vec<String>,
}

/// Collects the non-blank, distinct filter values present in `events`.
///
/// A tip entry's position is the one stored on the entry, falling back to
/// the employee directory when the entry has none.
pub fn filter_options(events: &[ClosedEvent], directory: &EmployeeDirectory) -> FilterOptions {
    let mut options = FilterOptions::default();

    for event in events {
        let info = &event.event_info;
        push_distinct(&mut options.managers, &info.manager);
        push_distinct(&mut options.event_names, &info.event_name);
        push_distinct(&mut options.shifts, &info.shift);
        push_distinct(&mut options.days, &info.day);

        for entry in &event.tip_distribution {
            let stored = entry.position.trim();
            let position = if stored.is_empty() {
                directory.position_of(entry.employee.trim()).unwrap_or_default()
            } else {
                stored
            };
            push_distinct(&mut options.positions, position);
        }
    }

    options
}

fn push_distinct(values: &mut Vec<String>, candidate: &str) {
    let candidate = candidate.trim();
    if !candidate.is_empty() && !values.iter().any(|value| value == candidate) {
        values.push(candidate.to_string());
    }
}
