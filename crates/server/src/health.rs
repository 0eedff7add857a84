use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    llm_configured: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub assistant: HealthCheck,
    pub checked_at: String,
}

pub fn router(llm_configured: bool) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { llm_configured })
}

/// Liveness plus one readiness detail: whether chat can reach the
/// text-generation service. A missing key is reported but does not fail the
/// check, since price comparison works without it and chat degrades to
/// canned fallbacks.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let assistant = if state.llm_configured {
        HealthCheck { status: "ready", detail: "generation credentials configured".to_string() }
    } else {
        HealthCheck {
            status: "degraded",
            detail: "no generation api key; chat serves fallback text".to_string(),
        }
    };

    let payload = HealthResponse {
        status: "ready",
        service: HealthCheck {
            status: "ready",
            detail: "cartwheel-server runtime initialized".to_string(),
        },
        assistant,
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}
