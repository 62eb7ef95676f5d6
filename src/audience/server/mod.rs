// SPDX-License-Identifier: MIT

//! HTTP API for condition testing
//!
//! Responses use a `{ "success": bool, ... }` envelope.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::audience::attributes::{AttributeDefinition, AttributeRegistry};
use crate::audience::condition::{validate, ConditionNode, Evaluator};
use crate::audience::content::{validate_content, ContentConfiguration};
use crate::audience::fallback::{validate_fallbacks, FallbackConfiguration};
use crate::audience::template::{ContentSourceType, TokenRenderer};
use crate::audience::user::{sample_users, UserRecord};
use crate::error::Result;

/// Shared, read-only server state
#[derive(Clone)]
pub struct AppState {
    registry: Arc<AttributeRegistry>,
    renderer: Arc<TokenRenderer>,
}

impl AppState {
    pub fn new(registry: AttributeRegistry) -> Result<Self> {
        Ok(Self {
            registry: Arc::new(registry),
            renderer: Arc::new(TokenRenderer::new()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/attributes", get(list_attributes))
        .route("/api/sample-users", get(list_sample_users))
        .route("/api/conditions/evaluate", post(evaluate_condition))
        .route("/api/conditions/validate", post(validate_condition))
        .route("/api/content/validate", post(validate_content_config))
        .route("/api/fallbacks/validate", post(validate_fallback_config))
        .route("/api/templates/render", post(render_template))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(port: u16, registry: AttributeRegistry) -> Result<()> {
    let app = router(AppState::new(registry)?);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Rules API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// An attribute with the comparisons its type allows
#[derive(Serialize)]
struct AttributeListing<'a> {
    #[serde(flatten)]
    attribute: &'a AttributeDefinition,
    comparisons: Vec<ComparisonOption>,
}

#[derive(Serialize)]
struct ComparisonOption {
    value: String,
    label: String,
}

async fn list_attributes(State(state): State<AppState>) -> Json<Value> {
    let attributes: Vec<AttributeListing> = state
        .registry
        .all()
        .iter()
        .map(|attribute| AttributeListing {
            attribute,
            comparisons: attribute
                .attribute_type
                .available_comparisons()
                .iter()
                .map(|c| ComparisonOption {
                    value: c.as_str().to_string(),
                    label: c.label().to_string(),
                })
                .collect(),
        })
        .collect();
    Json(json!({ "success": true, "attributes": attributes }))
}

async fn list_sample_users() -> Json<Value> {
    Json(json!({ "success": true, "users": sample_users() }))
}

#[derive(Deserialize)]
struct EvaluateRequest {
    condition: ConditionNode,
    #[serde(default)]
    users: Option<Vec<UserRecord>>,
}

/// Reply with the error envelope
fn reject(status: StatusCode, error: impl std::fmt::Display) -> (StatusCode, Json<Value>) {
    log::warn!("Rejected request: {}", error);
    (
        status,
        Json(json!({ "success": false, "error": error.to_string() })),
    )
}

fn rejected_body(rejection: JsonRejection) -> (StatusCode, Json<Value>) {
    reject(StatusCode::BAD_REQUEST, rejection.body_text())
}

async fn evaluate_condition(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EvaluateRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };
    let users = payload.users.as_deref().unwrap_or_else(|| sample_users());
    let results =
        Evaluator::new(&state.registry).test_condition_against_users(&payload.condition, users);

    let matched = results.iter().filter(|r| r.matches).count();
    log::info!(
        "Evaluated condition {}: {}/{} users matched",
        payload.condition.id,
        matched,
        results.len()
    );
    (
        StatusCode::OK,
        Json(json!({ "success": true, "results": results })),
    )
}

#[derive(Deserialize)]
struct ValidateRequest {
    condition: ConditionNode,
}

async fn validate_condition(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ValidateRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };
    let validation = validate(&payload.condition, &state.registry);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "validation": validation })),
    )
}

async fn validate_content_config(
    payload: std::result::Result<Json<ContentConfiguration>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    match payload {
        Ok(Json(config)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "validation": validate_content(&config) })),
        ),
        Err(rejection) => rejected_body(rejection),
    }
}

async fn validate_fallback_config(
    payload: std::result::Result<Json<FallbackConfiguration>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    match payload {
        Ok(Json(config)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "validation": validate_fallbacks(&config) })),
        ),
        Err(rejection) => rejected_body(rejection),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest {
    template: String,
    source_type: String,
}

async fn render_template(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RenderRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };
    match payload.source_type.parse::<ContentSourceType>() {
        Ok(source) => {
            let preview = state.renderer.render(&payload.template, source);
            (
                StatusCode::OK,
                Json(json!({ "success": true, "preview": preview })),
            )
        }
        Err(e) => reject(StatusCode::BAD_REQUEST, e),
    }
}
