//! HTTP surface.
//!
//! Routes:
//! - `POST /api/dialogue` — run one tutoring exchange (401 without credential)
//! - `GET /api/trace` — trace records, filtered when a credential is present
//! - `GET /api/summary` — reasoning-consistency summary
//! - `POST /api/extract_terms` — key-term extraction (401 without credential)
//! - `GET /api/export` — full-state JSON dump
//! - `GET /api/report` — plaintext session report
//! - `GET /health` — liveness probe
//!
//! The credential travels in the `Authorization` header. Identity is
//! resolved here, once, and passed to the engine explicitly.

mod auth;
mod requests;
mod responses;

pub use auth::extract_token;
pub use requests::DialogueBody;
pub use responses::{DialogueResponse, ErrorResponse, NewTurn, TermsResponse, TraceResponse};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::config::SecretString;
use crate::dialogue::DialogueEngine;
use crate::error::ServiceError;
use crate::export::SessionExport;
use crate::store::{SessionSummary, UserId};
use crate::traits::{ChatClient, SessionStore};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingCredential => StatusCode::UNAUTHORIZED,
            Self::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Build the application router.
pub fn router<S, C>(engine: DialogueEngine<S, C>) -> Router
where
    S: SessionStore + 'static,
    C: ChatClient + 'static,
{
    Router::new()
        .route("/api/dialogue", post(dialogue::<S, C>))
        .route("/api/trace", get(trace::<S, C>))
        .route("/api/summary", get(summary::<S, C>))
        .route("/api/extract_terms", post(extract_terms::<S, C>))
        .route("/api/export", get(export::<S, C>))
        .route("/api/report", get(report::<S, C>))
        .route("/health", get(health))
        .with_state(engine)
}

/// Resolve a required credential into (identity, secret).
fn require_credential(headers: &HeaderMap) -> Result<(UserId, SecretString), ServiceError> {
    let token = extract_token(headers).ok_or(ServiceError::MissingCredential)?;
    let user = UserId::from_token(&token).ok_or(ServiceError::MissingCredential)?;
    Ok((user, SecretString::new(token)))
}

/// Resolve an optional credential into an identity filter.
fn optional_identity(headers: &HeaderMap) -> Option<UserId> {
    extract_token(headers).and_then(|token| UserId::from_token(&token))
}

async fn dialogue<S: SessionStore, C: ChatClient>(
    State(engine): State<DialogueEngine<S, C>>,
    headers: HeaderMap,
    Json(body): Json<DialogueBody>,
) -> Result<Json<DialogueResponse>, ServiceError> {
    let (user, credential) = require_credential(&headers)?;
    let outcome = engine.dialogue(&user, &credential, body.into()).await?;
    Ok(Json(outcome.into()))
}

async fn trace<S: SessionStore, C: ChatClient>(
    State(engine): State<DialogueEngine<S, C>>,
    headers: HeaderMap,
) -> Json<TraceResponse> {
    let trace = engine.trace(optional_identity(&headers)).await;
    Json(TraceResponse { trace })
}

async fn summary<S: SessionStore, C: ChatClient>(
    State(engine): State<DialogueEngine<S, C>>,
    headers: HeaderMap,
) -> Json<SessionSummary> {
    Json(engine.summary(optional_identity(&headers)).await)
}

async fn extract_terms<S: SessionStore, C: ChatClient>(
    State(engine): State<DialogueEngine<S, C>>,
    headers: HeaderMap,
    Json(body): Json<DialogueBody>,
) -> Result<Json<TermsResponse>, ServiceError> {
    let (user, credential) = require_credential(&headers)?;
    let terms = engine.extract_terms(&user, &credential, body.into()).await;
    Ok(Json(TermsResponse { terms }))
}

async fn export<S: SessionStore, C: ChatClient>(
    State(engine): State<DialogueEngine<S, C>>,
) -> Json<SessionExport> {
    Json(engine.export().await)
}

async fn report<S: SessionStore, C: ChatClient>(
    State(engine): State<DialogueEngine<S, C>>,
) -> String {
    engine.report().await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
