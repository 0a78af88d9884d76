//! End-to-end tests for the HTTP surface.
//!
//! Drives the axum router directly via `tower::ServiceExt::oneshot` with a
//! scripted chat client, so no network is involved.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{FailingClient, ScriptedClient};
use socrai::dialogue::DialogueEngine;
use socrai::server::router;
use socrai::store::MemoryStore;
use socrai::traits::ChatClient;

fn app<C: ChatClient + 'static>(client: C) -> Router {
    let engine = DialogueEngine::new(Arc::new(MemoryStore::new()), Arc::new(client));
    router(engine)
}

fn dialogue_body() -> String {
    json!({
        "mode": "Challenging",
        "persona": "Socrates",
        "topic": "Justice",
        "student_text": "Justice and Virtue are both important to Socrates"
    })
    .to_string()
}

fn post(uri: &str, credential: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(credential) = credential {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {credential}"));
    }
    builder.body(Body::from(body)).unwrap()
}

fn get(uri: &str, credential: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(credential) = credential {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {credential}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn dialogue_without_credential_is_401_and_mutates_nothing() {
    let app = app(ScriptedClient::new("{\"question\":\"Q\"}", "50", "x"));

    let response = app
        .clone()
        .oneshot(post("/api/dialogue", None, dialogue_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The stores were not touched.
    let response = app.oneshot(get("/api/trace", None)).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["trace"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn extract_terms_without_credential_is_401() {
    let app = app(ScriptedClient::new("q", "50", "t"));
    let response = app
        .oneshot(post("/api/extract_terms", None, dialogue_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dialogue_returns_question_and_annotations() {
    let primary = r#"{"question":"Is law the same as justice?","detection":"appeal to authority","fallacies":["Legalism"],"confidence":61,"meta":"equates law and justice"}"#;
    let app = app(ScriptedClient::new(primary, "90", r#"{"terms":["Justice"]}"#));

    let response = app
        .clone()
        .oneshot(post("/api/dialogue", Some("sk-alice-token"), dialogue_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["new_turns"][0]["role"], "ai");
    assert_eq!(body["new_turns"][0]["text"], "Is law the same as justice?");
    assert_eq!(body["detected_fallacies"][0], "Legalism");
    assert_eq!(body["confidence"], 61);

    // The trace is visible filtered by the same credential.
    let response = app
        .clone()
        .oneshot(get("/api/trace", Some("sk-alice-token")))
        .await
        .unwrap();
    let body = json_body(response).await;
    let trace = body["trace"].as_array().unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(trace[0]["detected_issue"], "appeal to authority");
    assert_eq!(trace[0]["user"], "sk-alice");

    // And the summary reflects one flaw.
    let response = app
        .oneshot(get("/api/summary", Some("sk-alice-token")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["score"], 92);
    assert_eq!(body["flaws"], 1);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn trace_without_credential_returns_global_view() {
    let primary = r#"{"question":"Q","confidence":50}"#;
    let app = app(ScriptedClient::new(primary, "50", "none"));

    for credential in ["alice-credential", "bobby-credential"] {
        let response = app
            .clone()
            .oneshot(post("/api/dialogue", Some(credential), dialogue_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(get("/api/trace", None)).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["trace"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(get("/api/trace", Some("alice-credential")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["trace"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn summary_with_empty_trace_is_fixed() {
    let app = app(ScriptedClient::new("q", "50", "t"));
    let response = app.oneshot(get("/api/summary", None)).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["summary"], "No reasoning trace available.");
    assert_eq!(body["score"], 100);
    assert_eq!(body["flaws"], 0);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn dialogue_upstream_failure_is_500() {
    let app = app(FailingClient);
    let response = app
        .oneshot(post("/api/dialogue", Some("sk-alice-token"), dialogue_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn extract_terms_falls_back_to_capitalized_words() {
    let app = app(FailingClient);
    let response = app
        .oneshot(post(
            "/api/extract_terms",
            Some("sk-alice-token"),
            dialogue_body(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["terms"], json!(["Justice", "Virtue", "Socrates"]));
}

#[tokio::test]
async fn extract_terms_model_path() {
    let app = app(ScriptedClient::new("q", "50", r#"{"terms":["Virtue Ethics"]}"#));
    let response = app
        .oneshot(post(
            "/api/extract_terms",
            Some("sk-alice-token"),
            dialogue_body(),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["terms"], json!(["Virtue Ethics"]));
}

#[tokio::test]
async fn export_and_report_enumerate_state() {
    let primary = r#"{"question":"Q1","detection":"circularity","fallacies":["Begging the Question"],"confidence":44}"#;
    let app = app(ScriptedClient::new(primary, "44", r#"{"terms":["Truth"]}"#));

    let response = app
        .clone()
        .oneshot(post("/api/dialogue", Some("sk-alice-token"), dialogue_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/export", None)).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["conversations"].as_array().unwrap().len(), 2);
    assert_eq!(body["trace"].as_array().unwrap().len(), 1);
    assert!(body["profiles"]["sk-alice"]["concept_counts"]["Truth"].is_u64());

    let response = app.oneshot(get("/api/report", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let report = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(report.starts_with("SocrAI Session Report"));
    assert!(report.contains("Issue: circularity"));
    assert!(report.contains("Fallacies: Begging the Question"));
}

#[tokio::test]
async fn health_endpoint() {
    let app = app(ScriptedClient::new("q", "50", "t"));
    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}
