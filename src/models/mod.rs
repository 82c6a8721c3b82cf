//! Core data models for the Gratuity Engine.
//!
//! This module contains the rows entered while closing out an event, the
//! totals and tip shares derived from them, the closed-event snapshot, and
//! vendor invoices.

mod closed_event;
mod expense_row;
mod invoice;
pub mod legacy;
pub mod lenient;
mod sales_row;
mod tip_distribution;
mod totals;

pub use closed_event::{
    CLOSED_EVENT_SCHEMA_VERSION, ClosedEvent, ClosedEventFilter, EventInfo, EventStatus,
    OtherFeeRow, PerformanceRow, weekday_name,
};
pub use expense_row::{ExpenseRow, PaidBy, PaymentMethod};
pub use invoice::{Invoice, InvoiceItem};
pub use legacy::normalize_legacy_record;
pub use sales_row::SalesRow;
pub use tip_distribution::{DistributionMethod, TipDistributionEntry, TipReport};
pub use totals::{ExpenseTotals, GratuityTotals, SalesTotals};
