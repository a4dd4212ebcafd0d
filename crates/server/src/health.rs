use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use repdash_data::SalesDataStore;
use serde::Serialize;

use crate::api::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub dataset: HealthCheck,
    pub checked_at: String,
}

/// An empty dataset is a legal runtime state but almost always means the
/// data file is missing or malformed, so it is surfaced as degraded.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let dataset = dataset_check(&state.store);
    let ready = dataset.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "repdash-server runtime initialized".to_string(),
        },
        dataset,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn dataset_check(store: &SalesDataStore) -> HealthCheck {
    if store.is_empty() {
        HealthCheck {
            status: "degraded",
            detail: "sales dataset is empty (missing or malformed data file)".to_string(),
        }
    } else {
        HealthCheck {
            status: "ready",
            detail: format!("{} sales representatives loaded", store.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use repdash_agent::AiGateway;
    use repdash_core::config::{AiConfig, Environment};
    use repdash_core::{RepId, SalesRep};
    use repdash_data::SalesDataStore;

    use crate::api::AppState;
    use crate::health::health;

    fn state(store: SalesDataStore) -> State<AppState> {
        State(AppState {
            store: Arc::new(store),
            gateway: Arc::new(AiGateway::new(AiConfig {
                api_key: None,
                api_url: None,
                model: None,
            })),
            environment: Environment::Development,
        })
    }

    fn rep(id: i64, name: &str) -> SalesRep {
        SalesRep {
            id: RepId(id),
            name: name.to_string(),
            role: "Account Executive".to_string(),
            region: "West".to_string(),
            skills: Vec::new(),
            deals: Vec::new(),
            clients: Vec::new(),
        }
    }

    #[tokio::test]
    async fn health_returns_ready_when_the_dataset_is_loaded() {
        let store = SalesDataStore::from_reps(vec![rep(1, "Alice"), rep(2, "Bob")]);

        let (status, Json(payload)) = health(state(store)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.dataset.status, "ready");
        assert_eq!(payload.service.status, "ready");
        assert!(payload.dataset.detail.contains("2 sales representatives"));
    }

    #[tokio::test]
    async fn health_reports_degraded_when_the_dataset_is_empty() {
        let (status, Json(payload)) = health(state(SalesDataStore::default())).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.dataset.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
