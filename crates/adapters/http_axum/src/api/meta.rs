//! Introspection endpoints that never touch storage.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use people_domain::time::now;

use crate::state::AppState;

/// Body of `GET /api/meta`.
#[derive(Serialize, ToSchema)]
pub struct MetaBody {
    pub version: String,
    pub environment: String,
    pub time: DateTime<Utc>,
}

/// Body of `GET /health`.
#[derive(Serialize, ToSchema)]
pub struct HealthBody {
    pub status: &'static str,
    pub time: DateTime<Utc>,
}

/// `GET /api/meta`
#[utoipa::path(
    get,
    path = "/api/meta",
    responses((status = 200, description = "Version and environment", body = MetaBody)),
    tag = "meta"
)]
pub async fn meta<R>(State(state): State<AppState<R>>) -> Json<MetaBody> {
    Json(MetaBody {
        version: state.info.version.clone(),
        environment: state.info.environment.clone(),
        time: now(),
    })
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is alive", body = HealthBody)),
    tag = "meta"
)]
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        time: now(),
    })
}
