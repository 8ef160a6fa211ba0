//! OpenAPI document assembly.
//!
//! Collects every utoipa-annotated handler into one document, served as JSON
//! at `/openapi.json` and at the `/swagger/v1/swagger.json` path that existing
//! API explorers already point at. `/swagger` renders the document with
//! Swagger UI loaded from a CDN.

use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::api::meta::{HealthBody, MetaBody};
use crate::api::people::{PersonBody, PersonRequest, SeedBody};
use crate::error::ErrorBody;

/// Assembled OpenAPI document for the whole HTTP surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "People API",
        version = "v1",
        description = "CRUD over a single Person resource backed by SQLite."
    ),
    paths(
        crate::api::people::list,
        crate::api::people::get,
        crate::api::people::create,
        crate::api::people::update,
        crate::api::people::delete,
        crate::api::people::seed,
        crate::api::meta::meta,
        crate::api::meta::health,
    ),
    components(schemas(PersonBody, PersonRequest, SeedBody, MetaBody, HealthBody, ErrorBody)),
    tags(
        (name = "people", description = "Person lifecycle"),
        (name = "meta", description = "Liveness and process metadata"),
    )
)]
pub struct ApiDoc;

/// Build the documentation router.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/swagger/v1/swagger.json", get(openapi_json))
        .route("/swagger", get(swagger_ui))
        .route("/swagger/index.html", get(swagger_ui))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

const SWAGGER_UI_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>People API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js" crossorigin></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-standalone-preset.js" crossorigin></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
"#;

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}
