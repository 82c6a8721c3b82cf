//! Closed event snapshots and the filters used to query them.
//!
//! A [`ClosedEvent`] is written once, when a manager closes out a service,
//! and is the only source for every later report.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::{
    DistributionMethod, ExpenseRow, ExpenseTotals, SalesRow, SalesTotals, TipDistributionEntry,
};

/// Schema version written into new snapshots.
///
/// Version 1 records predate the `points` field on tip entries.
pub const CLOSED_EVENT_SCHEMA_VERSION: u32 = 2;

/// Returns the upper-case English weekday name for a date (e.g. "MONDAY").
///
/// # Example
///
/// ```
/// use gratuity_engine::models::weekday_name;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
/// assert_eq!(weekday_name(date), "SUNDAY");
/// ```
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Descriptive metadata for the event being closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The service date.
    pub date: NaiveDate,
    /// Upper-case weekday; derived from `date` when left blank.
    #[serde(default, deserialize_with = "lenient::string")]
    pub day: String,
    /// The event name (e.g. "EVENT 1").
    #[serde(alias = "eventName", default, deserialize_with = "lenient::string")]
    pub event_name: String,
    /// The shift (e.g. "DINNER").
    #[serde(default, deserialize_with = "lenient::string")]
    pub shift: String,
    /// The manager on duty.
    #[serde(default, deserialize_with = "lenient::string")]
    pub manager: String,
    /// Free-form notes.
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: String,
    /// Amount of the other fee collected for the event.
    #[serde(alias = "otherFee", default, deserialize_with = "lenient::decimal")]
    pub other_fee: Decimal,
}

impl EventInfo {
    /// Creates event info for a date, deriving the weekday.
    pub fn new(date: NaiveDate, event_name: impl Into<String>) -> Self {
        Self {
            date,
            day: weekday_name(date).to_string(),
            event_name: event_name.into(),
            shift: String::new(),
            manager: String::new(),
            notes: String::new(),
            other_fee: Decimal::ZERO,
        }
    }

    /// Trims the text fields and upper-cases the ones used as filters.
    ///
    /// A blank `day` is filled in from `date`.
    pub fn normalized(mut self) -> Self {
        self.event_name = self.event_name.trim().to_uppercase();
        self.shift = self.shift.trim().to_uppercase();
        self.manager = self.manager.trim().to_uppercase();
        self.notes = self.notes.trim().to_string();
        self.day = self.day.trim().to_uppercase();
        if self.day.is_empty() {
            self.day = weekday_name(self.date).to_string();
        }
        self
    }
}

/// A staff member entitled to part of the event's other fee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherFeeRow {
    /// The employee's name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub employee: String,
    /// The employee's position.
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
}

/// A manager's note on one staff member's performance during the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRow {
    /// Department the employee was picked from (e.g. "FOH", "MANAGEMENT").
    #[serde(default, deserialize_with = "lenient::string")]
    pub department: String,
    /// The employee's name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub employee: String,
    /// The employee's position.
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    /// What was observed.
    #[serde(default, deserialize_with = "lenient::string")]
    pub report: String,
    /// Whether the report should go on the employee's file.
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub note: bool,
}

impl PerformanceRow {
    /// Returns true for an untouched row: no text and no note flag.
    pub fn is_blank(&self) -> bool {
        !self.note
            && [&self.department, &self.employee, &self.position, &self.report]
                .iter()
                .all(|field| field.trim().is_empty())
    }

    /// Trims the text fields and upper-cases all but the report.
    pub fn normalized(self) -> Self {
        Self {
            department: self.department.trim().to_uppercase(),
            employee: self.employee.trim().to_string(),
            position: self.position.trim().to_uppercase(),
            report: self.report.trim().to_string(),
            note: self.note,
        }
    }
}

/// Lifecycle status of a stored event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// The event has been closed and is read-only.
    #[default]
    Closed,
}

/// The immutable record of a closed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedEvent {
    /// Identifier derived from date, event name and close time.
    pub report_id: String,
    /// When the event was closed.
    pub closed_at: DateTime<Utc>,
    /// Who closed it.
    pub closed_by: String,
    /// The restaurant the event belongs to.
    pub restaurant_id: String,
    /// Display name of the restaurant.
    pub restaurant_name: String,
    /// Event metadata.
    pub event_info: EventInfo,
    /// Sales rows as entered.
    pub sales: Vec<SalesRow>,
    /// Expense rows as entered.
    pub expenses: Vec<ExpenseRow>,
    /// Staff sharing the other fee.
    #[serde(default)]
    pub other_fees: Vec<OtherFeeRow>,
    /// Sales totals.
    pub totals: SalesTotals,
    /// Expense totals.
    pub expense_totals: ExpenseTotals,
    /// Per-employee gratuity shares.
    pub tip_distribution: Vec<TipDistributionEntry>,
    /// The method used for `tip_distribution`.
    pub distribution_method: DistributionMethod,
    /// Performance notes taken at close-out.
    #[serde(default)]
    pub performance_report: Vec<PerformanceRow>,
    /// Manager's written summary of the night.
    #[serde(default)]
    pub event_summary: String,
    /// Always `CLOSED` for stored events.
    #[serde(default)]
    pub status: EventStatus,
    /// Schema version of the record.
    pub version: u32,
}

/// Criteria for selecting closed events; unset or blank criteria match
/// everything.
///
/// Dates are inclusive. Text criteria compare exactly against the stored
/// (upper-cased) values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedEventFilter {
    /// Earliest event date.
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date_from: Option<NaiveDate>,
    /// Latest event date.
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
}

impl ClosedEventFilter {
    /// Returns true when the event satisfies every set criterion.
    pub fn matches(&self, event: &ClosedEvent) -> bool {
        let info = &event.event_info;
        if self.date_from.is_some_and(|from| info.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| info.date > to) {
            return false;
        }
        text_matches(self.manager.as_deref(), &info.manager)
            && text_matches(self.event_name.as_deref(), &info.event_name)
            && text_matches(self.shift.as_deref(), &info.shift)
            && text_matches(self.day.as_deref(), &info.day)
    }
}

fn text_matches(criterion: Option<&str>, value: &str) -> bool {
    match criterion.map(str::trim) {
        Some(wanted) if !wanted.is_empty() => wanted == value,
        _ => true,
    }
}
