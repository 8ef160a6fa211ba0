//! Axum router assembly.

use std::path::PathBuf;

use axum::Router;
use axum::http::HeaderValue;
use axum::response::Redirect;
use axum::routing::get;
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use people_app::ports::PersonRepository;

use crate::state::AppState;

/// Web-facing settings that shape the router.
///
/// Deserializes from the `[web]` section of the daemon's config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Directory served for any path not claimed by the API.
    pub static_dir: PathBuf,
    /// Origins allowed by CORS. Empty or `*` means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("wwwroot"),
            allowed_origins: Vec::new(),
        }
    }
}

/// Build the CORS layer for the given origin list.
///
/// Any method and any header are allowed. An empty list or a `*` entry
/// allows every origin. Entries that are not valid header values are skipped
/// with a warning; if none survive, cross-origin requests are denied.
#[must_use]
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o.trim() == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("no valid CORS origin configured, denying cross-origin requests");
    }
    AllowOrigin::list(origins)
}

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api`, exposes `/health`, the OpenAPI document and
/// Swagger UI,
/// redirects `/` to `/index.html`, and falls back to the static directory.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>, web: &WebConfig) -> Router
where
    R: PersonRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(crate::api::meta::health))
        .route("/", get(|| async { Redirect::temporary("/index.html") }))
        .nest("/api", crate::api::routes())
        .merge(crate::openapi::routes())
        .fallback_service(ServeDir::new(&web.static_dir))
        .layer(cors_layer(&web.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
