//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod meta;
#[allow(clippy::missing_errors_doc)]
pub mod people;

use axum::Router;
use axum::routing::{get, post};

use people_app::ports::PersonRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: PersonRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/people", get(people::list::<R>).post(people::create::<R>))
        .route("/people/seed", post(people::seed::<R>))
        .route(
            "/people/{id}",
            get(people::get::<R>)
                .put(people::update::<R>)
                .delete(people::delete::<R>),
        )
        .route("/meta", get(meta::meta::<R>))
}
