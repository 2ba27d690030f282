//! Health probes
//!
//! - `/health`: process is up, with version
//! - `/health/live`: liveness, never touches the store
//! - `/health/ready`: readiness, 503 until the credential store answers

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Healthy,
    Alive,
    Ready,
    NotReady,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: Status,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreCheck>,
}

#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl HealthResponse {
    fn new(status: Status) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(Status::Healthy))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(Status::Alive))
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, store) = match state.users().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Status::Ready,
            StoreCheck {
                status: Status::Healthy,
                message: None,
            },
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Status::NotReady,
            StoreCheck {
                status: Status::Unhealthy,
                message: Some("store unreachable"),
            },
        ),
    };

    let mut response = HealthResponse::new(status);
    response.store = Some(store);
    (code, Json(response))
}
