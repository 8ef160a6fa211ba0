//! Shared application state for axum handlers.

use std::sync::Arc;

use people_app::ports::PersonRepository;
use people_app::services::person_service::PersonService;

/// Static facts about the running process, reported by `/api/meta`.
#[derive(Debug, Clone)]
pub struct AppInfo {
    /// Application version.
    pub version: String,
    /// Deployment environment name (e.g. `production`, `development`).
    pub environment: String,
}

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R> {
    /// Person CRUD service.
    pub person_service: Arc<PersonService<R>>,
    /// Process metadata.
    pub info: Arc<AppInfo>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            person_service: Arc::clone(&self.person_service),
            info: Arc::clone(&self.info),
        }
    }
}

impl<R> AppState<R>
where
    R: PersonRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(person_service: PersonService<R>, info: AppInfo) -> Self {
        Self {
            person_service: Arc::new(person_service),
            info: Arc::new(info),
        }
    }
}
