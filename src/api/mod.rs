//! HTTP API module for the Gratuity Engine.
//!
//! This module provides the REST API endpoints for computing totals and tip
//! reports, closing and importing events, and reporting over closed events.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CloseEventRequest, EmployeesQuery, ExpenseTotalsRequest, GratuityReportQuery,
    InvoiceTotalsRequest, SalesTotalsRequest, TipReportRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
