use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use server::{InMemoryJobStore, JobRecord, JobStore, ServerState, router};
use uuid::Uuid;

fn app() -> Router {
    router(ServerState::new(Engine::builder().build()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

fn returns_request() -> Value {
    json!({
        "age": 30,
        "wage": 80000,
        "inflation": 0.05,
        "q": [{"fixed": 40, "start": "2023-01-01 00:00:00", "end": "2023-01-10 23:59:59"}],
        "k": [{"start": "2023-01-01 00:00:00", "end": "2023-01-31 23:59:59"}],
        "transactions": [
            {"date": "2023-01-05 10:00:00", "amount": 250, "ceiling": 300, "remanent": 50},
            {"date": "2023-01-06 10:00:00", "amount": 0, "ceiling": 0, "remanent": 0},
            {"date": "not a date", "amount": 10, "ceiling": 100, "remanent": 90}
        ]
    })
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn performance_reports_process_stats() {
    let (status, body) = send(&app(), "GET", "/performance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["time"].as_str().unwrap().contains(':'));
    assert!(body["memory"].as_str().unwrap().ends_with(" MB"));
    assert!(body["threads"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn parse_derives_ceiling_and_remanent() {
    let payload = json!([
        {"date": "2023-01-05 10:00:00", "amount": 250},
        {"date": "2023-01-06 10:00:00", "amount": 300},
        {"date": "2023-01-07 10:00:00", "amount": 0}
    ]);
    let (status, body) = send(&app(), "POST", "/transactions/parse", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["ceiling"], 300.0);
    assert_eq!(body[0]["remanent"], 50.0);
    assert_eq!(body[1]["ceiling"], 400.0);
    assert_eq!(body[1]["remanent"], 100.0);
    assert_eq!(body[2]["ceiling"], 0.0);
    assert_eq!(body[2]["remanent"], 0.0);
}

#[tokio::test]
async fn oversized_amount_is_unprocessable() {
    let payload = json!([{"date": "2023-01-05 10:00:00", "amount": 9.223372036854774784e16}]);
    let (status, body) = send(&app(), "POST", "/transactions/parse", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid amount"));
}

#[tokio::test]
async fn largest_amount_parses() {
    let payload = json!([{"date": "2023-01-05 10:00:00", "amount": 1e15}]);
    let (status, body) = send(&app(), "POST", "/transactions/parse", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["remanent"], 100.0);
}

#[tokio::test]
async fn validator_splits_valid_and_invalid() {
    let payload = json!({
        "wage": 50000,
        "transactions": [
            {"date": "2023-01-05 10:00:00", "amount": 250, "ceiling": 300, "remanent": 50},
            {"date": "2023-01-05 10:00:00", "amount": 120, "ceiling": 200, "remanent": 80},
            {"date": "2023-01-06 10:00:00", "amount": -5, "ceiling": 0, "remanent": 5},
            {"date": "2023-01-07 10:00:00", "amount": 500000, "ceiling": 500100, "remanent": 100}
        ]
    });
    let (status, body) = send(&app(), "POST", "/transactions/validator", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"].as_array().unwrap().len(), 1);
    let messages: Vec<&str> = body["invalid"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec!["Duplicate date", "Negative amount", "Exceeds max limit"]
    );
}

#[tokio::test]
async fn filter_applies_rules_and_rejects_bad_dates() {
    let request = returns_request();
    let payload = json!({
        "q": request["q"],
        "p": [{"extra": 5, "start": "2023-01-06 00:00:00", "end": "2023-01-06 23:59:59"}],
        "transactions": request["transactions"]
    });
    let (status, body) = send(&app(), "POST", "/transactions/filter", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"][0]["remanent"], 40.0);
    assert_eq!(body["valid"][1]["remanent"], 45.0);
    assert_eq!(body["invalid"][0]["message"], "Invalid date format");
    assert_eq!(body["invalid"][0]["remanent"], 90.0);
}

#[tokio::test]
async fn returns_nps_includes_tax_benefit() {
    let (status, body) = send(&app(), "POST", "/returns/nps", Some(returns_request())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transactionsTotalAmount"], 250.0);
    assert_eq!(body["transactionsTotalCeiling"], 300.0);
    let bucket = &body["savingsByDates"][0];
    assert_eq!(bucket["amount"], 80.0);
    assert_eq!(bucket["profits"], 65.32);
    assert_eq!(bucket["taxBenefit"], 8.0);
}

#[tokio::test]
async fn returns_index_has_no_tax_benefit() {
    let (status, body) = send(&app(), "POST", "/returns/index", Some(returns_request())).await;

    assert_eq!(status, StatusCode::OK);
    let bucket = &body["savingsByDates"][0];
    assert_eq!(bucket["profits"], 992.6);
    assert_eq!(bucket["taxBenefit"], 0.0);
}

#[tokio::test]
async fn async_job_completes() {
    let app = app();
    let (status, body) = send(&app, "POST", "/returns/nps/async", Some(returns_request())).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "processing");
    let job_id = body["jobId"].as_str().unwrap().to_string();

    let mut last = Value::Null;
    for _ in 0..100 {
        let (status, body) = send(&app, "GET", &format!("/jobs/{job_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        if body["status"] == "completed" {
            last = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(last["status"], "completed");
    assert_eq!(last["result"]["savingsByDates"][0]["amount"], 80.0);
    assert!(last["error"].is_null());
}

#[tokio::test]
async fn unknown_job_is_404() {
    let uri = "/jobs/00000000-0000-4000-8000-000000000000";
    let (status, body) = send(&app(), "GET", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn failed_job_reports_error() {
    let store = Arc::new(InMemoryJobStore::new());
    let job_id = Uuid::new_v4();
    store.put(job_id, JobRecord::failed("projection panicked"));
    let app = router(ServerState::with_job_store(Engine::builder().build(), store));

    let (status, body) = send(&app, "GET", &format!("/jobs/{job_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "projection panicked");
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn calculate_runs_whole_pipeline() {
    let payload = json!({
        "age": 30,
        "wage": 80000,
        "inflation": 0.05,
        "q": [{"fixed": 40, "start": "2023-01-01 00:00:00", "end": "2023-01-10 23:59:59"}],
        "k": [{"start": "2023-01-01 00:00:00", "end": "2023-01-31 23:59:59"}],
        "expenses": [
            {"date": "2023-01-05 10:00:00", "amount": 250},
            {"date": "2023-01-06 10:00:00", "amount": 0},
            {"date": "2023-01-07 10:00:00", "amount": -50}
        ]
    });
    let (status, body) = send(&app(), "POST", "/calculate", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["summary"],
        json!({"parsed": 3, "valid": 2, "filtered": 2, "rejected": 1})
    );
    assert_eq!(body["rejectedTransactions"][0]["message"], "Negative amount");
    assert_eq!(body["nps"]["savingsByDates"][0]["amount"], 80.0);
    assert!(body["nps"]["savingsByDates"][0]["taxBenefit"].as_f64().unwrap() > 0.0);
    assert!(body["indexFund"]["savingsByDates"][0]["profits"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn malformed_body_is_client_error() {
    let (status, _) = send(&app(), "POST", "/calculate", Some(json!({"age": 30}))).await;
    assert!(status.is_client_error());
}
