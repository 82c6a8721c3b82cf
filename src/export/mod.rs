//! Report export.
//!
//! Reports are laid out as [`Table`]s of text cells and can be rendered as
//! CSV with [`write_csv`].

mod layouts;
mod table;

pub use layouts::{
    CLOSED_EVENTS_HEADERS, EMPLOYEE_REPORT_HEADERS, GRATUITY_REPORT_FILE_NAME,
    GRATUITY_REPORT_HEADERS, INVOICE_ITEM_HEADERS, closed_event_tip_report_table,
    closed_events_file_name, closed_events_table, employee_report_file_name,
    employee_tip_report_table, gratuity_report_table, invoice_file_name, invoice_table,
};
pub use table::{Table, format_amount, format_currency, format_points, to_csv_string, write_csv};
