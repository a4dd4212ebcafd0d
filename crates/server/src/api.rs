//! JSON API routes for the sales dashboard.
//!
//! Endpoints:
//! - `GET  /`                        — service metadata and route catalog
//! - `GET  /health`                  — liveness plus dataset status
//! - `GET  /api/sales-reps`          — the full representative collection
//! - `GET  /api/sales-reps/{rep_id}` — a single representative by id
//! - `GET  /api/deals`               — every deal annotated with its owner
//! - `POST /api/ai`                  — forward a question to the completion API
//!
//! Every error response carries a `{"detail": "..."}` body; the status code
//! encodes the failure class, including verbatim upstream statuses on
//! completion API rejections.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use repdash_agent::{AiGateway, GatewayError};
use repdash_core::config::Environment;
use repdash_core::{AiContext, RepId, SalesRep};
use repdash_data::{AnnotatedDeal, SalesDataStore};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::health;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SalesDataStore>,
    pub gateway: Arc<AiGateway>,
    pub environment: Environment,
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// A missing field is treated as an empty question, which is rejected
    /// with the same 400 as an explicitly empty one.
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct DealCollection {
    pub deals: Vec<AnnotatedDeal>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Route-level failure: a status code plus the `detail` message callers see.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    fn rep_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Sales representative not found")
    }

    fn invalid_json_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid JSON body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        let status = match &error {
            GatewayError::EmptyQuestion => StatusCode::BAD_REQUEST,
            // Upstream statuses are replayed verbatim; anything outside the
            // representable range degrades to 502.
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Configuration(_)
            | GatewayError::Transport(_)
            | GatewayError::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::new(status, error.to_string())
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState, allowed_origin: &str) -> Router {
    Router::new()
        .route("/", get(service_metadata))
        .route("/health", get(health::health))
        .route("/api/sales-reps", get(list_sales_reps))
        .route("/api/sales-reps/{rep_id}", get(get_sales_rep))
        .route("/api/deals", get(list_deals))
        .route("/api/ai", post(ask_ai))
        .layer(cors_layer(allowed_origin))
        .with_state(state)
}

/// Browser clients send credentialed requests, so methods and headers mirror
/// the request instead of using wildcards (wildcards are rejected alongside
/// credentials).
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(parse_error) => {
            warn!(
                event_name = "api.cors.invalid_origin",
                origin = %allowed_origin,
                error = %parse_error,
                "allowed origin is not a valid header value, browser calls will be refused"
            );
            layer
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Landing payload the dashboard fetches to confirm the API is up.
async fn service_metadata(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Sales Dashboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment.as_str(),
        "endpoints": {
            "/api/sales-reps": "Get all sales representatives",
            "/api/sales-reps/{rep_id}": "Get a specific sales representative",
            "/api/deals": "Get all deals with their owners",
            "/api/ai": "Ask the AI assistant (POST)",
        },
    }))
}

/// The collection is returned under the same `salesReps` key the dataset
/// file uses, so the frontend can consume either directly.
async fn list_sales_reps(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "salesReps": state.store.all() }))
}

async fn get_sales_rep(
    Path(rep_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<SalesRep>, ApiError> {
    state.store.get(RepId(rep_id)).cloned().map(Json).ok_or_else(ApiError::rep_not_found)
}

async fn list_deals(State(state): State<AppState>) -> Json<DealCollection> {
    Json(DealCollection { deals: state.store.deals_with_reps() })
}

/// Build a fresh dataset context, then hand the question to the gateway.
/// Question validation happens in the gateway before any configuration
/// check, so an empty question is a 400 even on an unconfigured server.
async fn ask_ai(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::invalid_json_body())?;

    let correlation_id = Uuid::new_v4().simple().to_string();
    let context = AiContext::build(state.store.all());

    info!(
        event_name = "api.ai.question_received",
        correlation_id = %correlation_id,
        total_reps = context.total_reps,
        total_deals = context.total_deals,
        "AI question received"
    );

    match state.gateway.answer(&request.question, &context).await {
        Ok(answer) => {
            info!(
                event_name = "api.ai.answered",
                correlation_id = %correlation_id,
                answer_bytes = answer.len(),
                "AI answer produced"
            );
            Ok(Json(AskResponse { answer }))
        }
        Err(gateway_error) => {
            log_gateway_failure(&correlation_id, &gateway_error);
            Err(ApiError::from(gateway_error))
        }
    }
}

fn log_gateway_failure(correlation_id: &str, gateway_error: &GatewayError) {
    match gateway_error {
        GatewayError::EmptyQuestion => {}
        GatewayError::Configuration(detail) => error!(
            event_name = "api.ai.configuration_incomplete",
            correlation_id = %correlation_id,
            detail = %detail,
            "completion API settings are incomplete"
        ),
        GatewayError::Upstream { status, .. } => warn!(
            event_name = "api.ai.upstream_rejected",
            correlation_id = %correlation_id,
            upstream_status = *status,
            "completion API rejected the request"
        ),
        GatewayError::Transport(source) => error!(
            event_name = "api.ai.transport_failed",
            correlation_id = %correlation_id,
            error = %source,
            "could not reach the completion API"
        ),
        GatewayError::MalformedResponse(detail) => error!(
            event_name = "api.ai.malformed_response",
            correlation_id = %correlation_id,
            detail = %detail,
            "completion API returned an unusable response"
        ),
    }
}
