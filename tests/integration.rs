//! Integration tests for the Gratuity Engine API.
//!
//! This test suite drives the router end to end:
//! - Sales and expense totals
//! - Tip reports for both distribution methods
//! - Closing, importing, listing and fetching events
//! - The cross-event gratuity report and its filter options
//! - CSV exports
//! - The employee list
//! - Invoice allocation
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use gratuity_engine::api::{AppState, create_router};
use gratuity_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal that was serialized as a JSON string or number.
fn decimal_at(value: &Value, pointer: &str) -> Decimal {
    match value.pointer(pointer) {
        Some(Value::String(text)) => decimal(text),
        Some(Value::Number(number)) => decimal(&number.to_string()),
        other => panic!("no decimal at {}: {:?}", pointer, other),
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

/// Sends a request expected to return a CSV attachment.
///
/// Returns the status, the Content-Disposition header and the body text.
async fn download(router: Router, request: Request<Body>) -> (StatusCode, String, String) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    assert_eq!(response.headers().get("content-type").unwrap(), "text/csv");
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, disposition, String::from_utf8(body_bytes.to_vec()).unwrap())
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn sales_row(employee: &str, position: &str, cc: f64, cash: f64, points: f64) -> Value {
    json!({
        "employee": employee,
        "position": position,
        "net_sales": 500,
        "cash_sales": 200,
        "cc_sales": 300,
        "cc_gratuity": cc,
        "cash_gratuity": cash,
        "points": points
    })
}

fn scenario_sales() -> Value {
    json!([
        sales_row("Ana", "RUNNER", 80.0, 20.0, 10.0),
        sales_row("Juan", "SERVER", 100.0, 50.0, 17.5)
    ])
}

fn close_request(date: &str, event_name: &str, manager: &str, sales: Value) -> Value {
    json!({
        "event_info": {
            "date": date,
            "event_name": event_name,
            "shift": "dinner",
            "manager": manager
        },
        "sales": sales,
        "expenses": [
            {
                "expense_name": "ICE",
                "amount": 15,
                "payment_method": "CASH",
                "paid_by": "BUSINESS",
                "employee_name": "ANA",
                "refunded": true
            },
            {
                "expense_name": "LIMES",
                "amount": "8.50",
                "payment_method": "CASH",
                "paid_by": "EMPLOYEE",
                "employee_name": "JUAN",
                "refunded": true
            }
        ],
        "method": "percentage"
    })
}

// =============================================================================
// SECTION 1: Totals
// =============================================================================

#[tokio::test]
async fn test_sales_totals() {
    let (status, body) = post(
        create_router_for_test(),
        "/totals/sales",
        json!({ "sales": scenario_sales() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&body, "/total_net_sales"), decimal("1000"));
    assert_eq!(decimal_at(&body, "/total_cc_gratuity"), decimal("180"));
    assert_eq!(decimal_at(&body, "/total_cash_gratuity"), decimal("70"));
    assert_eq!(decimal_at(&body, "/total_points"), decimal("27.5"));
    assert_eq!(decimal_at(&body, "/total_gratuity"), decimal("250"));
}

#[tokio::test]
async fn test_sales_totals_tolerate_bad_numbers() {
    let sales = json!([
        { "employee": "Ana", "cc_gratuity": "abc", "cash_gratuity": null, "points": "" },
        { "employee": "", "cc_gratuity": "12.5" }
    ]);

    let (status, body) = post(
        create_router_for_test(),
        "/totals/sales",
        json!({ "sales": sales }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&body, "/total_cc_gratuity"), decimal("12.5"));
    assert_eq!(decimal_at(&body, "/total_gratuity"), decimal("12.5"));
}

#[tokio::test]
async fn test_expense_totals() {
    let expenses = json!([
        {
            "expense_name": "SUPPLIES",
            "amount": 100,
            "payment_method": "CHECK",
            "paid_by": "BUSINESS"
        },
        {
            "expense_name": "ICE",
            "amount": 25.5,
            "payment_method": "cash",
            "paid_by": "employee",
            "refunded": true
        },
        { "expense_name": "TAXI", "amount": 7, "payment_method": "ZELLE" }
    ]);

    let (status, body) = post(
        create_router_for_test(),
        "/totals/expenses",
        json!({ "expenses": expenses }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&body, "/total_expenses"), decimal("132.5"));
    assert_eq!(decimal_at(&body, "/total_check"), decimal("100"));
    assert_eq!(decimal_at(&body, "/total_cash"), decimal("25.5"));
    assert_eq!(decimal_at(&body, "/total_business"), decimal("100"));
    assert_eq!(decimal_at(&body, "/total_employee"), decimal("25.5"));
    assert_eq!(decimal_at(&body, "/total_refunded"), decimal("25.5"));
}

// =============================================================================
// SECTION 2: Tip Reports
// =============================================================================

#[tokio::test]
async fn test_tip_report_percentage() {
    let (status, body) = post(
        create_router_for_test(),
        "/tip-report",
        json!({ "sales": scenario_sales(), "method": "percentage" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "percentage");
    assert_eq!(decimal_at(&body, "/distribution/0/tips"), decimal("90.91"));
    assert_eq!(decimal_at(&body, "/distribution/0/cc_gratuity"), decimal("65.45"));
    assert_eq!(decimal_at(&body, "/distribution/0/cash_gratuity"), decimal("25.45"));
    assert_eq!(decimal_at(&body, "/distribution/1/tips"), decimal("159.09"));
    assert_eq!(decimal_at(&body, "/distribution/1/cc_gratuity"), decimal("114.55"));
    assert_eq!(decimal_at(&body, "/distribution/1/cash_gratuity"), decimal("44.55"));
    assert_eq!(decimal_at(&body, "/totals/total_gratuity"), decimal("250"));
}

#[tokio::test]
async fn test_tip_report_equal() {
    let (status, body) = post(
        create_router_for_test(),
        "/tip-report",
        json!({ "sales": scenario_sales(), "method": "equal" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    for index in 0..2 {
        let entry = |field: &str| decimal_at(&body, &format!("/distribution/{}/{}", index, field));
        assert_eq!(entry("tips"), decimal("125"));
        assert_eq!(entry("cc_gratuity"), decimal("90"));
        assert_eq!(entry("cash_gratuity"), decimal("35"));
    }
}

#[tokio::test]
async fn test_tip_report_equal_skips_unnamed_row() {
    let sales = json!([
        sales_row("", "SERVER", 40.0, 10.0, 5.0),
        sales_row("Bob", "BARTENDER", 30.0, 20.0, 5.0)
    ]);

    let (status, body) = post(
        create_router_for_test(),
        "/tip-report",
        json!({ "sales": sales, "method": "equal" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&body, "/distribution/0/tips"), Decimal::ZERO);
    assert_eq!(decimal_at(&body, "/distribution/1/tips"), decimal("100"));
}

#[tokio::test]
async fn test_tip_report_empty_sales() {
    let (status, body) = post(
        create_router_for_test(),
        "/tip-report",
        json!({ "sales": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distribution"], json!([]));
    assert_eq!(body["method"], "percentage");
    assert_eq!(decimal_at(&body, "/totals/total_gratuity"), Decimal::ZERO);
}

// =============================================================================
// SECTION 3: Events
// =============================================================================

#[tokio::test]
async fn test_close_event_snapshot() {
    let (status, body) = post(
        create_router_for_test(),
        "/events/close",
        close_request("2026-01-04", "event 1", "maria", scenario_sales()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["report_id"].as_str().unwrap().starts_with("2026-01-04_EVENT_1_"));
    assert_eq!(body["restaurant_id"], "rest_harbor");
    assert_eq!(body["restaurant_name"], "Harbor Grill");
    assert_eq!(body["closed_by"], "APP_USER");
    assert_eq!(body["event_info"]["day"], "SUNDAY");
    assert_eq!(body["event_info"]["shift"], "DINNER");
    assert_eq!(body["event_info"]["manager"], "MARIA");
    assert_eq!(body["status"], "CLOSED");
    assert_eq!(body["version"], 2);
    assert_eq!(body["expenses"][0]["employee_name"], "");
    assert_eq!(body["expenses"][0]["refunded"], false);
    assert_eq!(decimal_at(&body, "/expense_totals/total_refunded"), decimal("8.50"));
    assert_eq!(decimal_at(&body, "/tip_distribution/0/tips"), decimal("90.91"));
}

#[tokio::test]
async fn test_close_event_without_name_is_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/events/close",
        close_request("2026-01-04", "", "maria", scenario_sales()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_close_event_without_date_is_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/events/close",
        json!({ "event_info": { "event_name": "EVENT 1" }, "sales": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_closed_event_can_be_fetched() {
    let state = create_test_state();
    let (_, closed) = post(
        create_router(state.clone()),
        "/events/close",
        close_request("2026-01-04", "EVENT 1", "MARIA", scenario_sales()),
    )
    .await;
    let report_id = closed["report_id"].as_str().unwrap();

    let (status, body) = get(create_router(state), &format!("/events/{}", report_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, closed);
}

#[tokio::test]
async fn test_unknown_event_returns_404() {
    let (status, body) = get(create_router_for_test(), "/events/nothing-here").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn test_list_events_with_filters() {
    let state = create_test_state();
    for (date, name, manager) in [
        ("2026-01-03", "EVENT 1", "MARIA"),
        ("2026-01-04", "EVENT 2", "LUIS"),
        ("2026-01-10", "EVENT 3", "MARIA"),
    ] {
        let (status, _) = post(
            create_router(state.clone()),
            "/events/close",
            close_request(date, name, manager, scenario_sales()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = get(create_router(state.clone()), "/events").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, maria) = get(create_router(state.clone()), "/events?manager=MARIA").await;
    assert_eq!(maria.as_array().unwrap().len(), 2);

    let (_, range) = get(
        create_router(state.clone()),
        "/events?date_from=2026-01-04&date_to=2026-01-10",
    )
    .await;
    assert_eq!(range.as_array().unwrap().len(), 2);

    let (_, combined) = get(
        create_router(state),
        "/events?date_from=2026-01-04&manager=MARIA&day=SATURDAY",
    )
    .await;
    let combined = combined.as_array().unwrap();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0]["event_info"]["event_name"], "EVENT 3");
}

#[tokio::test]
async fn test_import_both_legacy_shapes() {
    let state = create_test_state();

    let database_row = json!({
        "report_id": "example_20260104",
        "closed_at": "2026-01-05T03:15:00Z",
        "restaurant_id": "rest_1",
        "event_date": "2026-01-04",
        "event_name": "EVENTO EJEMPLO",
        "total_net_sales": 1000,
        "total_cc_gratuity": 180,
        "total_cash_gratuity": 70,
        "total_gratuity": 250,
        "tip_distribution": [
            { "employee": "Juan", "position": "Mesero", "cc_grat": 100, "cash_grat": 50 }
        ],
        "version": 1
    });
    let browser_snapshot = json!({
        "id": "2026-01-04_EVENTO_EJEMPLO_1767582900000",
        "timestamp": "2026-01-05T03:15:00.000Z",
        "eventInfo": { "date": "2026-01-04", "eventName": "evento ejemplo" },
        "totals": {
            "totalNetSales": 1000,
            "totalCcGratuity": 180,
            "totalCashGratuity": 70,
            "totalGratuity": 250
        },
        "tipDistribution": [
            { "employee": "Juan", "tips": 150, "ccGratuity": 100, "cashGratuity": 50 }
        ]
    });

    let (status, first) = post(
        create_router(state.clone()),
        "/events/import",
        database_row,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = post(
        create_router(state.clone()),
        "/events/import",
        browser_snapshot,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(first["totals"], second["totals"]);
    assert_eq!(first["event_info"]["event_name"], second["event_info"]["event_name"]);
    assert_eq!(first["version"], 2);
    assert_eq!(decimal_at(&first, "/tip_distribution/0/points"), Decimal::ZERO);
    assert_eq!(decimal_at(&first, "/tip_distribution/0/tips"), decimal("150"));

    let (_, all) = get(create_router(state), "/events").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_without_date_is_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/events/import",
        json!({ "report_id": "r1", "event_name": "EVENT 1" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_RECORD");
}

#[tokio::test]
async fn test_importing_same_record_twice_is_rejected() {
    let state = create_test_state();
    let record = json!({
        "report_id": "example_20260104",
        "closed_at": "2026-01-05T03:15:00Z",
        "event_date": "2026-01-04",
        "event_name": "EVENTO EJEMPLO",
        "tip_distribution": [
            { "employee": "Juan", "position": "SERVER", "cc_grat": 100, "cash_grat": 50 }
        ],
        "version": 1
    });

    let (status, _) = post(create_router(state.clone()), "/events/import", record.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = post(create_router(state.clone()), "/events/import", record).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_EVENT");

    let (_, all) = get(create_router(state.clone()), "/events").await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (_, report) = get(create_router(state), "/gratuity-report").await;
    assert_eq!(decimal_at(&report, "/totals/cc_gratuity"), decimal("100"));
    assert_eq!(decimal_at(&report, "/totals/cash_gratuity"), decimal("50"));
}

#[tokio::test]
async fn test_close_event_keeps_performance_report() {
    let mut request = close_request("2026-01-04", "EVENT 1", "MARIA", scenario_sales());
    request["performanceReport"] = json!([
        { "department": "foh", "employee": "Ana", "position": "runner", "report": "Great night" },
        { "department": "", "employee": "", "position": "", "report": "", "note": false }
    ]);

    let (status, body) = post(create_router_for_test(), "/events/close", request).await;

    assert_eq!(status, StatusCode::CREATED);
    let rows = body["performance_report"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["department"], "FOH");
    assert_eq!(rows[0]["position"], "RUNNER");
    assert_eq!(rows[0]["report"], "Great night");
    assert_eq!(rows[0]["note"], false);
}

#[tokio::test]
async fn test_filter_options_lists_recorded_values() {
    let state = create_test_state();
    for (date, name, manager) in [
        ("2026-01-03", "EVENT 1", "MARIA"),
        ("2026-01-04", "EVENT 2", "LUIS"),
        ("2026-01-10", "EVENT 1", "MARIA"),
    ] {
        post(
            create_router(state.clone()),
            "/events/close",
            close_request(date, name, manager, scenario_sales()),
        )
        .await;
    }

    let (status, body) = get(create_router(state), "/events/filter-options").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["managers"], json!(["MARIA", "LUIS"]));
    assert_eq!(body["event_names"], json!(["EVENT 1", "EVENT 2"]));
    assert_eq!(body["shifts"], json!(["DINNER"]));
    assert_eq!(body["days"], json!(["SATURDAY", "SUNDAY"]));
    assert_eq!(body["positions"], json!(["RUNNER", "SERVER"]));
}

// =============================================================================
// SECTION 4: Gratuity Report and Export
// =============================================================================

#[tokio::test]
async fn test_gratuity_report_merges_events() {
    let state = create_test_state();
    for (date, name) in [("2026-01-03", "EVENT 1"), ("2026-01-04", "EVENT 2")] {
        post(
            create_router(state.clone()),
            "/events/close",
            close_request(date, name, "MARIA", scenario_sales()),
        )
        .await;
    }

    let (status, body) = get(create_router(state.clone()), "/gratuity-report").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["employee"], "Ana");
    assert_eq!(rows[0]["position"], "RUNNER");
    assert_eq!(decimal_at(&body, "/rows/0/cc_gratuity"), decimal("130.90"));
    assert_eq!(decimal_at(&body, "/rows/0/points"), decimal("20"));
    assert_eq!(decimal_at(&body, "/totals/cc_gratuity"), decimal("360"));
    assert_eq!(decimal_at(&body, "/totals/cash_gratuity"), decimal("140"));

    let (_, servers) = get(
        create_router(state.clone()),
        "/gratuity-report?position=SERVER",
    )
    .await;
    let rows = servers["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee"], "Juan");

    let (_, lower_case) = get(
        create_router(state.clone()),
        "/gratuity-report?position=server",
    )
    .await;
    assert!(lower_case["rows"].as_array().unwrap().is_empty());

    let (_, one_day) = get(
        create_router(state),
        "/gratuity-report?date_from=2026-01-04",
    )
    .await;
    assert_eq!(decimal_at(&one_day, "/rows/0/cc_gratuity"), decimal("65.45"));
}

#[tokio::test]
async fn test_employee_report_csv() {
    let state = create_test_state();
    let (_, closed) = post(
        create_router(state.clone()),
        "/events/close",
        close_request("2026-01-04", "EVENT 1", "MARIA", scenario_sales()),
    )
    .await;
    let report_id = closed["report_id"].as_str().unwrap();

    let uri = format!("/events/{}/employee-report", report_id);
    let (status, disposition, csv) = download(create_router(state), get_request(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(disposition.contains("EVENT 1_2026-01-04_EmployeeReport.csv"));
    assert!(csv.starts_with("EMPLOYEE GRATUITY REPORT\n"));
    assert!(csv.contains("Juan,SERVER,$114.55,$44.55,$159.09,17.5\n"));
    assert!(csv.contains("TOTAL,,$180.00,$70.00,$250.00,27.5\n"));
}

#[tokio::test]
async fn test_closed_events_csv() {
    let state = create_test_state();
    for (date, name, manager) in [
        ("2026-01-04", "EVENT 1", "MARIA"),
        ("2026-01-05", "EVENT 2", "LUIS"),
    ] {
        post(
            create_router(state.clone()),
            "/events/close",
            close_request(date, name, manager, scenario_sales()),
        )
        .await;
    }

    let (status, disposition, csv) = download(
        create_router(state),
        get_request("/events/export?manager=MARIA"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(disposition.starts_with("attachment; filename=\"closed-events-"));
    assert!(csv.starts_with(
        "Date,Day,Event,Shift,Manager,Net Sales,CC Sales,Cash Sales,Expenses,Gratuity,Status\n"
    ));
    assert!(csv.contains(
        "2026-01-04,SUNDAY,EVENT 1,DINNER,MARIA,1000.00,600.00,400.00,23.50,250.00,CLOSED\n"
    ));
    assert!(!csv.contains("EVENT 2"));
}

#[tokio::test]
async fn test_gratuity_report_csv() {
    let state = create_test_state();
    post(
        create_router(state.clone()),
        "/events/close",
        close_request("2026-01-04", "EVENT 1", "MARIA", scenario_sales()),
    )
    .await;

    let (status, disposition, csv) = download(
        create_router(state),
        get_request("/gratuity-report/export?position=RUNNER"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(disposition, "attachment; filename=\"gratuity-report.csv\"");
    assert_eq!(
        csv,
        "Employee,Position,CC GRAT,CASH GRAT,Points\n\
         Ana,RUNNER,65.45,25.45,10\n\
         TOTAL,,65.45,25.45,10\n"
    );
}

// =============================================================================
// SECTION 5: Employees
// =============================================================================

#[tokio::test]
async fn test_employees_by_department() {
    let state = create_test_state();

    let (status, active) = get(create_router(state.clone()), "/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active.as_array().unwrap().len(), 5);

    let (_, managers) = get(create_router(state.clone()), "/employees?department=management").await;
    let managers = managers.as_array().unwrap();
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0]["name"], "Maria");

    let (_, foh) = get(create_router(state.clone()), "/employees?department=FOH").await;
    assert_eq!(foh.as_array().unwrap().len(), 3);

    let (_, everyone) = get(
        create_router(state),
        "/employees?department=FOH&include_inactive=true",
    )
    .await;
    let names: Vec<&str> = everyone
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ana", "Juan", "Bob", "Pedro"]);
}

// =============================================================================
// SECTION 6: Invoices
// =============================================================================

fn sample_invoice() -> Value {
    json!({
        "vendor": "SYSCO",
        "bill_number": "B-17",
        "date": "2026-01-05",
        "terms": "NET 30",
        "tax": 4.5,
        "shipping": "10",
        "correction": 14.5,
        "items": [
            {
                "product_ai": "LIMES",
                "quantity": 3,
                "units": "CS",
                "unit_price": 25,
                "amount": 75,
                "category": "food",
                "discrepancy": "1 CS short"
            },
            { "product_ai": "TONIC", "quantity": 2, "amount": 25, "category": "beverage" }
        ]
    })
}

#[tokio::test]
async fn test_invoice_summary() {
    let (status, body) = post(
        create_router_for_test(),
        "/invoices/summary",
        sample_invoice(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&body, "/subtotal"), decimal("100"));
    assert_eq!(decimal_at(&body, "/invoice_total"), decimal("114.5"));
    assert_eq!(decimal_at(&body, "/after_correction"), decimal("100"));
    assert_eq!(body["categories"][0]["category"], "FOOD");
    assert_eq!(decimal_at(&body, "/categories/0/percentage"), decimal("75"));
    assert_eq!(body["categories"][1]["category"], "BEVERAGE");
    assert_eq!(body["discrepancies"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invoice_totals_by_category() {
    let mut beverage = sample_invoice();
    beverage["category"] = json!("beverage");

    let (status, body) = post(
        create_router_for_test(),
        "/invoices/totals",
        json!({ "invoices": [sample_invoice(), beverage] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&body, "/total"), decimal("200"));
    assert_eq!(decimal_at(&body, "/food"), decimal("100"));
    assert_eq!(decimal_at(&body, "/beverage"), decimal("100"));
    assert_eq!(decimal_at(&body, "/equipment"), Decimal::ZERO);
}

#[tokio::test]
async fn test_invoice_csv() {
    let request = Request::builder()
        .method("POST")
        .uri("/invoices/export")
        .header("Content-Type", "application/json")
        .body(Body::from(sample_invoice().to_string()))
        .unwrap();

    let (status, disposition, csv) = download(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(disposition, "attachment; filename=\"Invoice_SYSCO_B-17.csv\"");
    assert!(csv.starts_with("INVOICE INFORMATION\n"));
    assert!(csv.contains("Amount,114.50\n"));
    assert!(csv.contains("PRODUCT (AI),ITEM,QTY,UNITS,UNIT PRICE,AMOUNT,CATEGORY,DISCREPANCY\n"));
    assert!(csv.contains("LIMES,,3,CS,25.00,75.00,food,1 CS short\n"));
}

// =============================================================================
// SECTION 7: Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/events/close")
        .header("Content-Type", "application/json")
        .body(Body::from("{invalid json"))
        .unwrap();

    let (status, body) = send(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/tip-report")
        .body(Body::from(json!({ "sales": [] }).to_string()))
        .unwrap();

    let (status, body) = send(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
}

#[tokio::test]
async fn test_unknown_method_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/tip-report",
        json!({ "sales": [], "method": "seniority" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
