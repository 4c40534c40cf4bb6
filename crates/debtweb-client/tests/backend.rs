//! Runs the reqwest transport against an in-process axum backend that
//! answers the way the dashboard does.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
    Form, Json, Router,
};
use debtweb_client::{LedgerApi, ReqwestTransport};
use debtweb_core::{ClientError, Decimal, FormPayload, RecordType};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Backend {
    records: Arc<Mutex<Vec<Value>>>,
    password: Option<String>,
}

impl Backend {
    fn authorized(&self, headers: &HeaderMap) -> bool {
        if self.password.is_none() {
            return true;
        }
        headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|c| c.contains("session=ok"))
            .unwrap_or(false)
    }

    fn balance(&self) -> f64 {
        // payments are stored positive, transactions negative
        0.0 - self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r["amount"].as_f64().unwrap_or(0.0))
            .sum::<f64>()
    }
}

fn auth_required() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Authentication required"})),
    )
        .into_response()
}

async fn records(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if !backend.authorized(&headers) {
        return auth_required();
    }
    let records = backend.records.lock().unwrap().clone();
    Json(json!({"records": records, "balance": backend.balance()})).into_response()
}

async fn summary(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if !backend.authorized(&headers) {
        return auth_required();
    }
    Json(json!({"balance": backend.balance()})).into_response()
}

async fn add_payment(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    let amount = body["amount"].as_str().and_then(|a| a.parse::<f64>().ok());
    let amount = match amount {
        Some(a) if a > 0.0 => a,
        _ => return (StatusCode::BAD_REQUEST, "Amount must be positive").into_response(),
    };
    let mut records = backend.records.lock().unwrap();
    let id = records.len() as i64 + 1;
    records.push(json!({
        "id": id,
        "person_name": "Friend",
        "type": "payment",
        "description": "Payment",
        "amount": amount,
        "payment_method": body["payment_method"],
        "date": body["date"],
        "notes": null,
    }));
    (
        StatusCode::CREATED,
        Json(json!({"id": id, "message": "Payment recorded"})),
    )
        .into_response()
}

async fn delete_record(
    State(backend): State<Backend>,
    Path((record_type, id)): Path<(String, i64)>,
) -> Response {
    let mut records = backend.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| !(r["type"] == record_type.as_str() && r["id"] == id));
    if records.len() == before {
        return (StatusCode::NOT_FOUND, "Record not found.").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn login(State(backend): State<Backend>, Form(form): Form<HashMap<String, String>>) -> Response {
    if backend.password.as_deref() == form.get("password").map(String::as_str) {
        let mut response = Redirect::to("/app/").into_response();
        response
            .headers_mut()
            .insert(header::SET_COOKIE, "session=ok; Path=/".parse().unwrap());
        return response;
    }
    "<html>login</html>".into_response()
}

async fn start(backend: Backend) -> LedgerApi {
    let app = Router::new()
        .route("/app/", get(|| async { "<html>dashboard</html>" }))
        .route("/app/login", get(|| async { "<html>login</html>" }).post(login))
        .route("/app/api/records", get(records))
        .route("/app/api/summary", get(summary))
        .route("/app/api/payments", post(add_payment))
        .route("/app/api/records/:record_type/:id", delete(delete_record))
        .route("/app/api/broken", get(|| async { "not json" }))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let transport = ReqwestTransport::new(format!("http://{}", addr), None).unwrap();
    LedgerApi::from_transport(Arc::new(transport), "/app")
}

fn payment(amount: &str) -> FormPayload {
    vec![
        ("amount", amount),
        ("payment_method", "Cash"),
        ("date", "2024-03-01"),
        ("notes", ""),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_empty_ledger() {
    let api = start(Backend::default()).await;
    let snapshot = api.records().await.unwrap();
    assert!(snapshot.records.is_empty());
    assert_eq!(snapshot.balance, Decimal::ZERO);
}

#[tokio::test]
async fn test_submit_then_list_then_delete() {
    let api = start(Backend::default()).await;

    let created = api.submit_entry("/api/payments", &payment("12.5")).await.unwrap();
    let created = created.expect("backend replies with the new id");
    assert_eq!(created.id, Some(1));
    assert_eq!(created.message.as_deref(), Some("Payment recorded"));

    let snapshot = api.records().await.unwrap();
    assert_eq!(snapshot.records.len(), 1);
    assert_eq!(snapshot.records[0].record_type, RecordType::Payment);
    assert_eq!(snapshot.records[0].amount, Decimal::from_str("12.5").unwrap());
    assert_eq!(snapshot.balance, Decimal::from_str("-12.5").unwrap());

    let summary = api.summary().await.unwrap();
    assert_eq!(summary.balance, snapshot.balance);

    api.delete_record("payment", "1").await.unwrap();
    assert!(api.records().await.unwrap().records.is_empty());
}

#[tokio::test]
async fn test_validation_error_carries_body() {
    let api = start(Backend::default()).await;
    let err = api.submit_entry("/api/payments", &payment("-3")).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Request {
            status: 400,
            message: "Amount must be positive".to_string()
        }
    );
}

#[tokio::test]
async fn test_delete_missing_record() {
    let api = start(Backend::default()).await;
    let err = api.delete_record("transaction", "99").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Record not found.");
}

#[tokio::test]
async fn test_malformed_json() {
    let api = start(Backend::default()).await;
    let err = api
        .executor()
        .get_json::<serde_json::Value>("api/broken", "anything")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_login_keeps_session_cookie() {
    let backend = Backend {
        password: Some("secret".to_string()),
        ..Backend::default()
    };
    let api = start(backend).await;

    let err = api.records().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), r#"{"error":"Authentication required"}"#);
    assert_eq!(
        err.to_details().backend_error.as_deref(),
        Some("Authentication required")
    );

    assert_eq!(api.login("wrong").await.unwrap_err(), ClientError::Unauthorized);

    api.login("secret").await.unwrap();
    assert!(api.records().await.unwrap().records.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new(format!("http://{}", addr), None).unwrap();
    let api = LedgerApi::from_transport(Arc::new(transport), "/app");
    let err = api.summary().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
}
