//! Router tests against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskboard::{build_router, AppState, MemoryStore, OpenAIProvider};

fn app(openai: Option<&MockServer>) -> Router {
    let provider = match openai {
        Some(server) => OpenAIProvider::new(Some("sk-test".to_string()), Duration::from_secs(5))
            .unwrap()
            .with_base_url(format!("{}/v1/chat/completions", server.uri())),
        None => OpenAIProvider::new(None, Duration::from_secs(5)).unwrap(),
    };
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(provider),
        "gpt-3.5-turbo",
    );
    build_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_json(app: &Router, method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, method, uri, Some(&body.to_string())).await
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, response) = send_json(app, Method::POST, "/tasks", &body).await;
    assert_eq!(status, StatusCode::CREATED, "{response}");
    response["task"].clone()
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "model": "gpt-3.5-turbo",
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25}
    }))
}

#[tokio::test]
async fn test_health_and_info() {
    let app = app(None);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "AI Task Manager API is running");

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "AI Task Manager API");
    assert_eq!(body["endpoints"]["tasks"], "/tasks");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = app(None);
    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Route not found", "path": "/nope"}));
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let app = app(None);
    let (status, body) =
        send_json(&app, Method::POST, "/tasks", &json!({"title": "  Write docs  "})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["task"]["title"], "Write docs");
    assert_eq!(body["task"]["status"], "todo");
    assert_eq!(body["task"]["priority"], "medium");
    assert_eq!(body["task"]["description"], Value::Null);
    assert!(body["task"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body["task"]["created_at"].is_string());
}

#[tokio::test]
async fn test_create_reports_every_field_error() {
    let app = app(None);
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/tasks",
        &json!({"title": "   ", "priority": "urgent", "estimated_time": -5}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"]["title"], "Title is required");
    assert_eq!(
        body["errors"]["priority"],
        "Priority must be one of: low, medium, high"
    );
    assert!(body["errors"]["estimated_time"].is_string());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app(None);
    let (status, body) = send(&app, Method::POST, "/tasks", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_rejects_unknown_status() {
    let app = app(None);
    let task = create(&app, json!({"title": "Ship"})).await;
    let uri = format!("/tasks/{}", task["id"].as_str().unwrap());

    let (status, body) = send_json(&app, Method::PUT, &uri, &json!({"status": "archived"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Status must be one of: todo, in_progress, done");

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["task"]["status"], "todo");
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = app(None);
    let task = create(
        &app,
        json!({
            "title": "Plan sprint",
            "description": "Pick stories",
            "priority": "high",
            "due_date": "2025-03-01",
            "estimated_time": 90
        }),
    )
    .await;
    let uri = format!("/tasks/{}", task["id"].as_str().unwrap());

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &uri,
        &json!({"status": "in_progress", "due_date": null}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated successfully");
    let updated = &body["task"];
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["due_date"], Value::Null);
    assert_eq!(updated["title"], "Plan sprint");
    assert_eq!(updated["description"], "Pick stories");
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["estimated_time"], 90);
    assert_eq!(updated["created_at"], task["created_at"]);
}

#[tokio::test]
async fn test_missing_task_is_404() {
    let app = app(None);

    let (status, body) = send(&app, Method::GET, "/tasks/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Task not found"}));

    let (status, _) = send_json(&app, Method::PUT, "/tasks/missing", &json!({"title": "x"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/tasks/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = app(None);
    let task = create(&app, json!({"title": "Temporary"})).await;
    let uri = format!("/api/tasks/{}", task["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted successfully");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_search() {
    let app = app(None);
    create(&app, json!({"title": "Write docs", "priority": "low"})).await;
    create(&app, json!({"title": "Fix login bug", "status": "done", "priority": "high"})).await;
    create(&app, json!({"title": "Deploy", "description": "Ship the DOCS site"})).await;

    let (status, body) = send(&app, Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["tasks"][0]["title"], "Deploy");

    let (_, body) = send(&app, Method::GET, "/tasks?status=done", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["tasks"][0]["title"], "Fix login bug");

    let (_, body) = send(&app, Method::GET, "/tasks?search=docs", None).await;
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, Method::GET, "/tasks?search=docs&priority=low", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["tasks"][0]["title"], "Write docs");

    let (_, body) = send(&app, Method::GET, "/tasks?status=", None).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_analytics() {
    let app = app(None);
    create(&app, json!({"title": "a", "status": "done", "estimated_time": 30})).await;
    create(&app, json!({"title": "b", "estimated_time": 90, "due_date": "2000-01-01"})).await;
    create(&app, json!({"title": "c", "priority": "high"})).await;

    let (status, body) = send(&app, Method::GET, "/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["stats"];
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["by_status"]["done"], 1);
    assert_eq!(stats["by_status"]["todo"], 2);
    assert_eq!(stats["by_priority"]["high"], 1);
    assert_eq!(stats["completion_rate"], 33.3);
    assert_eq!(stats["overdue"], 1);
    assert_eq!(stats["total_estimated_time"], 120);
    assert_eq!(stats["completed_estimated_time"], 30);
    assert_eq!(stats["remaining_estimated_time"], 90);
}

#[tokio::test]
async fn test_blank_description_is_400_before_availability() {
    let app = app(None);
    for route in ["/ai/breakdown", "/ai/priority", "/ai/time-estimate", "/ai/suggestions"] {
        let (status, body) = send_json(&app, Method::POST, route, &json!({"description": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{route}");
        assert_eq!(body["error"], "Task description is required");
    }

    let (status, _) = send_json(&app, Method::POST, "/ai/priority", &json!({"description": 42})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ai_without_key_is_503() {
    let app = app(None);
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/ai/time-estimate",
        &json!({"description": "Write the release notes"}),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body["error"],
        "AI features are not available. Please configure OPENAI_API_KEY."
    );
}

#[tokio::test]
async fn test_time_estimate_is_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("About 900 minutes"))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(Some(&server));
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/ai/time-estimate",
        &json!({"description": "  Migrate the database  "}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimated_time"], 480);
    assert_eq!(body["estimated_time_display"], "8h");
    assert_eq!(body["description"], "Migrate the database");
}

#[tokio::test]
async fn test_suggestions_combine_all_hints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"response_format": {"type": "json_object"}})))
        .respond_with(completion(
            r#"{"subtasks": [{"title": "Draft", "description": "Write a first pass"}, {"description": "Review"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("task prioritization assistant"))
        .respond_with(completion(" HIGH \n"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("time estimation assistant"))
        .respond_with(completion("90"))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(Some(&server));
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/ai/suggestions",
        &json!({"description": "Write the quarterly report", "due_date": "2025-04-01"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["priority"], "high");
    assert_eq!(body["estimated_time"], 90);
    assert_eq!(body["estimated_time_display"], "1h 30m");
    assert_eq!(body["subtasks"][0]["title"], "Draft");
    assert_eq!(body["subtasks"][1]["title"], "Subtask 2");
    assert_eq!(body["due_date"], "2025-04-01");
}

#[tokio::test]
async fn test_provider_failure_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "upstream exploded"}
        })))
        .mount(&server)
        .await;

    let app = app(Some(&server));
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/ai/breakdown",
        &json!({"description": "Plan the offsite"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Internal server error"}));
}

#[tokio::test]
async fn test_completion_without_choices_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(Some(&server));
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/ai/time-estimate",
        &json!({"description": "Write the release notes"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}
