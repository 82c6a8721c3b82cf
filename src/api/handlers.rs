//! HTTP request handlers for the Gratuity Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    GratuityReport, build_gratuity_report, close_event, compute_expense_totals,
    compute_sales_totals, filter_options, generate_tip_report, summarize_invoice,
    summarize_invoices,
};
use crate::config::EmployeeRecord;
use crate::export::{
    GRATUITY_REPORT_FILE_NAME, closed_event_tip_report_table, closed_events_file_name,
    closed_events_table, employee_report_file_name, gratuity_report_table, invoice_file_name,
    invoice_table, to_csv_string,
};
use crate::models::{ClosedEvent, ClosedEventFilter, Invoice, normalize_legacy_record};

use super::request::{
    CloseEventRequest, EmployeesQuery, ExpenseTotalsRequest, GratuityReportQuery,
    InvoiceTotalsRequest, SalesTotalsRequest, TipReportRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/totals/sales", post(sales_totals_handler))
        .route("/totals/expenses", post(expense_totals_handler))
        .route("/tip-report", post(tip_report_handler))
        .route("/events", get(list_events_handler))
        .route("/events/close", post(close_event_handler))
        .route("/events/import", post(import_event_handler))
        .route("/events/export", get(export_events_handler))
        .route("/events/filter-options", get(filter_options_handler))
        .route("/events/:report_id", get(get_event_handler))
        .route(
            "/events/:report_id/employee-report",
            get(employee_report_handler),
        )
        .route("/gratuity-report", get(gratuity_report_handler))
        .route("/gratuity-report/export", get(export_gratuity_report_handler))
        .route("/employees", get(employees_handler))
        .route("/invoices/summary", post(invoice_summary_handler))
        .route("/invoices/totals", post(invoice_totals_handler))
        .route("/invoices/export", post(export_invoice_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Returns `csv` as a downloadable attachment named `file_name`.
fn csv_attachment(file_name: &str, csv: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    )
        .into_response()
}

/// Maps a JSON body rejection to a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    ApiErrorResponse::bad_request(ApiError::invalid_query(body_text))
}

/// Handler for POST /totals/sales.
async fn sales_totals_handler(
    payload: Result<Json<SalesTotalsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let totals = compute_sales_totals(&request.sales);
    info!(
        correlation_id = %correlation_id,
        rows = request.sales.len(),
        total_gratuity = %totals.total_gratuity,
        "Computed sales totals"
    );
    json_response(StatusCode::OK, totals)
}

/// Handler for POST /totals/expenses.
async fn expense_totals_handler(
    payload: Result<Json<ExpenseTotalsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let totals = compute_expense_totals(&request.expenses);
    info!(
        correlation_id = %correlation_id,
        rows = request.expenses.len(),
        total_expenses = %totals.total_expenses,
        "Computed expense totals"
    );
    json_response(StatusCode::OK, totals)
}

/// Handler for POST /tip-report.
///
/// Uses the restaurant's default method when the request names none.
async fn tip_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<TipReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tip report request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let method = request
        .method
        .unwrap_or_else(|| state.config().default_method());
    let start_time = Instant::now();
    let report = generate_tip_report(&request.sales, method);

    info!(
        correlation_id = %correlation_id,
        rows = request.sales.len(),
        method = %method,
        total_gratuity = %report.totals.total_gratuity,
        duration_us = start_time.elapsed().as_micros(),
        "Tip report generated"
    );
    json_response(StatusCode::OK, report)
}

/// Adds a closed event to the registry, answering 201 with the event.
async fn record_event(state: &AppState, correlation_id: Uuid, event: ClosedEvent) -> Response {
    match state.record(event.clone()).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %event.report_id,
                "Event recorded"
            );
            json_response(StatusCode::CREATED, event)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Event rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /events/close.
async fn close_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<CloseEventRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing close event request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let config = state.config();
    let closeout = request.into_closeout(config.default_method());
    match close_event(closeout, &config.context(), Utc::now()) {
        Ok(event) => record_event(&state, correlation_id, event).await,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Closing event failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /events/import.
///
/// Accepts a stored closed-event record in any of its historical shapes.
/// A record whose report id is already registered is rejected with 409.
async fn import_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    match normalize_legacy_record(&record) {
        Ok(event) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %event.report_id,
                version = event.version,
                "Normalized imported record"
            );
            record_event(&state, correlation_id, event).await
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Import failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /events.
async fn list_events_handler(
    State(state): State<AppState>,
    query: Result<Query<ClosedEventFilter>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let filter = match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => return query_rejection(correlation_id, rejection).into_response(),
    };

    let events = state.events(&filter).await;
    info!(
        correlation_id = %correlation_id,
        matched = events.len(),
        "Listed closed events"
    );
    json_response(StatusCode::OK, events)
}

/// Handler for GET /events/export.
///
/// Returns the closed-events directory matching the query as CSV.
async fn export_events_handler(
    State(state): State<AppState>,
    query: Result<Query<ClosedEventFilter>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let filter = match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => return query_rejection(correlation_id, rejection).into_response(),
    };

    let events = state.events(&filter).await;
    let file_name = closed_events_file_name(Utc::now().date_naive());
    match to_csv_string(&closed_events_table(&events)) {
        Ok(csv) => {
            info!(
                correlation_id = %correlation_id,
                rows = events.len(),
                file_name = %file_name,
                "Exported closed events"
            );
            csv_attachment(&file_name, csv)
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /events/filter-options.
async fn filter_options_handler(State(state): State<AppState>) -> Response {
    let events = state.events(&ClosedEventFilter::default()).await;
    let options = filter_options(&events, state.config().employees());
    json_response(StatusCode::OK, options)
}

/// Handler for GET /events/:report_id.
async fn get_event_handler(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Response {
    match state.find(&report_id).await {
        Ok(event) => json_response(StatusCode::OK, event),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /events/:report_id/employee-report.
///
/// Returns the event's employee tip report as a CSV attachment.
async fn employee_report_handler(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let rendered = state.find(&report_id).await.and_then(|event| {
        let csv = to_csv_string(&closed_event_tip_report_table(&event))?;
        Ok((employee_report_file_name(&event.event_info), csv))
    });

    match rendered {
        Ok((file_name, csv)) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %report_id,
                file_name = %file_name,
                "Exported employee report"
            );
            csv_attachment(&file_name, csv)
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Builds the gratuity report for a query over every recorded event.
async fn gratuity_report_for(
    state: &AppState,
    query: GratuityReportQuery,
) -> GratuityReport {
    let (filter, position) = query.into_parts();
    let events = state.events(&ClosedEventFilter::default()).await;
    build_gratuity_report(
        &events,
        &filter,
        position.as_deref(),
        state.config().employees(),
    )
}

/// Handler for GET /gratuity-report.
async fn gratuity_report_handler(
    State(state): State<AppState>,
    query: Result<Query<GratuityReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection).into_response(),
    };

    let report = gratuity_report_for(&state, query).await;
    info!(
        correlation_id = %correlation_id,
        rows = report.rows.len(),
        "Gratuity report generated"
    );
    json_response(StatusCode::OK, report)
}

/// Handler for GET /gratuity-report/export.
async fn export_gratuity_report_handler(
    State(state): State<AppState>,
    query: Result<Query<GratuityReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection).into_response(),
    };

    let report = gratuity_report_for(&state, query).await;
    match to_csv_string(&gratuity_report_table(&report)) {
        Ok(csv) => {
            info!(
                correlation_id = %correlation_id,
                rows = report.rows.len(),
                "Exported gratuity report"
            );
            csv_attachment(GRATUITY_REPORT_FILE_NAME, csv)
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /employees.
///
/// Lists active employees, optionally narrowed to one department.
async fn employees_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeesQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection).into_response(),
    };

    let directory = state.config().employees();
    let department = query
        .department
        .as_deref()
        .map(str::trim)
        .filter(|department| !department.is_empty());
    let employees: Vec<&EmployeeRecord> = match department {
        Some(department) => directory
            .department(department)
            .filter(|e| query.include_inactive || e.is_active())
            .collect(),
        None if query.include_inactive => directory.employees().iter().collect(),
        None => directory.active().collect(),
    };
    json_response(StatusCode::OK, employees)
}

/// Handler for POST /invoices/summary.
async fn invoice_summary_handler(payload: Result<Json<Invoice>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let invoice = match payload {
        Ok(Json(invoice)) => invoice,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let summary = summarize_invoice(&invoice);
    info!(
        correlation_id = %correlation_id,
        vendor = %invoice.vendor,
        items = invoice.items.len(),
        invoice_total = %summary.invoice_total,
        "Summarized invoice"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /invoices/totals.
async fn invoice_totals_handler(
    payload: Result<Json<InvoiceTotalsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let totals = summarize_invoices(&request.invoices);
    info!(
        correlation_id = %correlation_id,
        invoices = request.invoices.len(),
        total = %totals.total,
        "Computed invoice totals"
    );
    json_response(StatusCode::OK, totals)
}

/// Handler for POST /invoices/export.
///
/// Returns the invoice laid out as CSV.
async fn export_invoice_handler(payload: Result<Json<Invoice>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let invoice = match payload {
        Ok(Json(invoice)) => invoice,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    match to_csv_string(&invoice_table(&invoice)) {
        Ok(csv) => {
            let file_name = invoice_file_name(&invoice);
            info!(
                correlation_id = %correlation_id,
                file_name = %file_name,
                "Exported invoice"
            );
            csv_attachment(&file_name, csv)
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
