//! Calculation logic for the Gratuity Engine.
//!
//! This module contains the allocation engine (sales totals, expense totals,
//! gratuity distribution and the tip report), closing an event into its
//! snapshot, the cross-event gratuity report and its filter options, and
//! vendor invoice allocation.

mod close_event;
mod distribution;
mod expense_totals;
mod filter_options;
mod gratuity_report;
mod invoice;
mod sales_totals;
mod tip_report;

pub use close_event::{EventCloseout, close_event, report_id};
pub use distribution::{distribute_gratuity, round_to_cents};
pub use expense_totals::compute_expense_totals;
pub use filter_options::{FilterOptions, filter_options};
pub use gratuity_report::{
    GratuityReport, GratuityReportRow, GratuityReportTotals, UNKNOWN_POSITION,
    build_gratuity_report, filter_closed_events,
};
pub use invoice::{
    CategoryShare, InvoiceLedgerTotals, InvoiceSummary, UNCATEGORIZED, invoice_subtotal,
    summarize_invoice, summarize_invoices,
};
pub use sales_totals::{compute_gratuity_totals, compute_sales_totals};
pub use tip_report::generate_tip_report;
