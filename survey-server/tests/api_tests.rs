//! Integration tests for survey-server API endpoints
//!
//! Every test builds the router over a fresh in-memory database and drives
//! it with `oneshot`, so no server or network is involved.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use survey_common::db::init_memory_database;
use survey_server::generator::TemplateGenerator;
use survey_server::{build_router, AppState};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app over an empty in-memory database
async fn setup_app() -> Router {
    let db = init_memory_database()
        .await
        .expect("Should create in-memory database");
    build_router(AppState::new(db, Arc::new(TemplateGenerator)))
}

/// Test helper: Create request without body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Create request with JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

/// Test helper: Send one request and return status plus JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

fn valid_response(name: &str, age: i64, feedback: &str) -> Value {
    json!({
        "name": name,
        "age": age,
        "feedback": feedback,
        "rating": 4,
        "userType": "Student",
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let (status, body) = send(&app, test_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "survey-server");
    assert!(body["version"].is_string());
}

// =============================================================================
// Surveys
// =============================================================================

#[tokio::test]
async fn test_create_and_list_surveys() {
    let app = setup_app().await;

    let (status, created) = send(
        &app,
        json_request("POST", "/api/create-survey", json!({"title": "Campus Wifi"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["message"], "Survey created successfully");
    let survey_id = created["survey_id"].as_str().unwrap().to_string();

    let (status, list) = send(&app, test_request("GET", "/api/surveys")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["_id"], survey_id.as_str());
    assert_eq!(list[0]["title"], "Campus Wifi");
}

#[tokio::test]
async fn test_create_survey_requires_title() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/create-survey", json!({"title": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Survey title is required.");
}

// =============================================================================
// Responses
// =============================================================================

#[tokio::test]
async fn test_submit_response_scores_sentiment() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/submit-response",
            valid_response("Priya", 29, "The staff were great and very helpful"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Response submitted successfully");
    assert!(body["sentiment"].as_f64().unwrap() > 0.05);
    let response_id = body["response_id"].as_str().unwrap().to_string();

    let (_, list) = send(&app, test_request("GET", "/responses")).await;
    let stored = &list[0];
    assert_eq!(stored["_id"], response_id.as_str());
    assert_eq!(stored["userType"], "Student");
    assert_eq!(stored["age"], 29);
    assert!(stored["emotion"].is_object());
    assert!(stored["timestamp"].is_string());
}

#[tokio::test]
async fn test_submit_response_accepts_age_as_string() {
    let app = setup_app().await;

    let mut request = valid_response("Ola", 0, "fine");
    request["age"] = json!("41");
    let (status, _) = send(&app, json_request("POST", "/submit-response", request)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, test_request("GET", "/responses")).await;
    assert_eq!(list[0]["age"], 41);
}

#[tokio::test]
async fn test_submit_response_rejects_invalid_fields() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/submit-response",
            json!({"name": "A", "age": 130, "feedback": "", "rating": 9, "userType": "Teacher"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Name must be at least 2 characters long."));
    assert!(message.contains("Age must be a number between 1 and 120."));
    assert!(message.contains("Feedback is required."));

    let (_, list) = send(&app, test_request("GET", "/responses")).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_response_null_age_is_validated() {
    let app = setup_app().await;

    let mut request = valid_response("Priya", 0, "Fine");
    request["age"] = Value::Null;
    let (status, body) = send(&app, json_request("POST", "/submit-response", request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Age must be a number between 1 and 120."));
}

#[tokio::test]
async fn test_malformed_body_returns_json_error() {
    let app = setup_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/submit-response")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Priya\","))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(body["error"], body["detail"]);

    // Wrong JSON type for a text field
    let (status, body) = send(
        &app,
        json_request("POST", "/api/create-survey", json!({"title": ["a"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from("username=ana"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_responses_filter_and_sort() {
    let app = setup_app().await;
    for (name, age) in [("Alice", 30), ("Bob", 22), ("Alina", 45)] {
        send(&app, json_request("POST", "/submit-response", valid_response(name, age, "ok"))).await;
    }

    let (status, list) = send(&app, test_request("GET", "/responses?name=ali&sort=age&order=asc")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Alina"]);
}

#[tokio::test]
async fn test_analyze_labels_feedback() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/analyze", json!({"feedback": "This is terrible and awful"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "negative");
    assert!(body["polarity"].as_f64().unwrap() <= -0.05);

    let (_, body) = send(&app, json_request("POST", "/analyze", json!({"feedback": ""}))).await;
    assert_eq!(body["sentiment"], "neutral");
    assert_eq!(body["polarity"], 0.0);
}

// =============================================================================
// Follow-up questions and answers
// =============================================================================

#[tokio::test]
async fn test_generate_questions_and_answer_them() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/generate-questions",
            json!({"domain": "Healthcare", "feedback": "Long wait", "survey_id": "s1", "response_id": "r1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert!((5..=6).contains(&questions.len()));
    let question_id = questions[0]["id"].as_str().unwrap().to_string();
    assert!(questions[0]["question"].is_string());

    let (_, stored) = send(&app, test_request("GET", "/questions?survey_id=s1")).await;
    assert_eq!(stored.as_array().unwrap().len(), questions.len());
    assert_eq!(stored[0]["domain"], "Healthcare");

    let (_, other) = send(&app, test_request("GET", "/questions?survey_id=s2")).await;
    assert!(other.as_array().unwrap().is_empty());

    let (status, answered) = send(
        &app,
        json_request(
            "POST",
            "/submit-answer",
            json!({"answer": "The nurses were wonderful", "question_id": question_id, "response_id": "r1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(answered["message"], "Answer submitted successfully");
    assert!(answered["sentiment"].as_f64().unwrap() > 0.0);

    let (_, answers) = send(&app, test_request("GET", "/answers?response_id=r1")).await;
    assert_eq!(answers.as_array().unwrap().len(), 1);
    assert_eq!(answers[0]["question_id"], question_id.as_str());
}

#[tokio::test]
async fn test_generate_questions_requires_domain() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/generate-questions", json!({"feedback": "meh"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Domain is required");
}

#[tokio::test]
async fn test_submit_answer_requires_text() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        json_request("POST", "/submit-answer", json!({"answer": " ", "question_id": "q1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_endpoints_404_without_data() {
    let app = setup_app().await;

    for uri in ["/analytics", "/chart", "/export-csv"] {
        let (status, body) = send(&app, test_request("GET", uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], "No data available");
    }
}

#[tokio::test]
async fn test_analytics_summary() {
    let app = setup_app().await;
    send(&app, json_request("POST", "/submit-response", valid_response("Alice", 19, "I love it"))).await;
    send(&app, json_request("POST", "/submit-response", valid_response("Bob", 45, "It was bad"))).await;

    let (status, body) = send(&app, test_request("GET", "/analytics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_responses"], 2);
    assert_eq!(body["average_age"], 32.0);
    assert_eq!(body["average_rating"], 4.0);
    assert_eq!(body["age_distribution"], json!([1, 0, 0, 1, 0]));
    assert_eq!(body["user_type_distribution"], json!([2, 0, 0]));
    assert_eq!(body["sentiment_distribution"], json!([1, 0, 1]));
    assert_eq!(body["all_feedbacks"], json!(["I love it", "It was bad"]));
    assert!(body["question_stats"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_analytics_search_filters_feedbacks() {
    let app = setup_app().await;
    for (name, feedback) in [("Alice", "Wifi keeps dropping"), ("Bob", "Great staff"), ("Cara", "WIFI is slow")] {
        send(&app, json_request("POST", "/submit-response", valid_response(name, 30, feedback))).await;
    }

    let (status, body) = send(&app, test_request("GET", "/analytics?search=wifi")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["all_feedbacks"], json!(["Wifi keeps dropping", "WIFI is slow"]));
    assert_eq!(body["total_responses"], 3);

    let (_, body) = send(&app, test_request("GET", "/analytics?search=")).await;
    assert_eq!(body["all_feedbacks"].as_array().unwrap().len(), 3);

    let (_, body) = send(&app, test_request("GET", "/analytics?search=parking")).await;
    assert!(body["all_feedbacks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chart_is_svg() {
    let app = setup_app().await;
    send(&app, json_request("POST", "/submit-response", valid_response("Alice", 25, "ok"))).await;

    let response = app.oneshot(test_request("GET", "/chart")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");

    let svg = extract_text(response.into_body()).await;
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Age Distribution"));
}

#[tokio::test]
async fn test_export_csv_download() {
    let app = setup_app().await;
    send(
        &app,
        json_request("POST", "/submit-response", valid_response("Ana, PhD", 33, "Good, mostly")),
    )
    .await;

    let response = app.oneshot(test_request("GET", "/export-csv")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=survey_responses.csv"
    );

    let csv = extract_text(response.into_body()).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "name,age,feedback,rating,userType,survey_id,sentiment,timestamp"
    );
    assert!(lines.next().unwrap().starts_with("\"Ana, PhD\",33,\"Good, mostly\",4,Student,,"));
}

// =============================================================================
// Accounts and history
// =============================================================================

#[tokio::test]
async fn test_register_login_and_history() {
    let app = setup_app().await;
    let credentials = json!({"username": "ana", "password": "s3cret"});

    let (status, body) = send(&app, json_request("POST", "/register", credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "ana");

    let (status, body) = send(&app, json_request("POST", "/register", credentials.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("already taken"));

    let (status, body) = send(&app, json_request("POST", "/login", credentials)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ana");

    let (status, body) = send(
        &app,
        json_request("POST", "/login", json!({"username": "ana", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid username or password");

    let mut mine = valid_response("Ana", 30, "Nice");
    mine["username"] = json!("ana");
    send(&app, json_request("POST", "/submit-response", mine)).await;
    send(&app, json_request("POST", "/submit-response", valid_response("Bob", 30, "Meh"))).await;

    let (status, history) = send(&app, test_request("GET", "/history?username=ana")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["username"], "ana");
}

#[tokio::test]
async fn test_history_matches_padded_username() {
    let app = setup_app().await;

    let mut mine = valid_response("Ana", 30, "Nice");
    mine["username"] = json!(" ana ");
    let (status, _) = send(&app, json_request("POST", "/submit-response", mine)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, history) = send(&app, test_request("GET", "/history?username=ana")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["username"], "ana");
}

#[tokio::test]
async fn test_register_rejects_blank_credentials() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/register", json!({"username": "", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username and password are required.");
}

#[tokio::test]
async fn test_history_requires_username() {
    let app = setup_app().await;

    let (status, body) = send(&app, test_request("GET", "/history")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username is required");
}
