//! JSON REST handlers for people.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use people_app::ports::PersonRepository;
use people_app::services::person_service::SeedReport;
use people_domain::id::PersonId;
use people_domain::person::{NewPerson, Person};

use crate::error::ApiError;
use crate::state::AppState;

/// A stored person as returned by the API.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonBody {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl From<Person> for PersonBody {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.get(),
            first_name: person.first_name,
            last_name: person.last_name,
            age: person.age,
        }
    }
}

/// Request body for creating or replacing a person.
///
/// Every field is optional and defaults to its zero value; an `id` field is
/// accepted but ignored.
#[derive(Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl From<PersonRequest> for NewPerson {
    fn from(req: PersonRequest) -> Self {
        Self::new(req.first_name, req.last_name, req.age)
    }
}

/// Body of `POST /api/people/seed`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeedBody {
    pub added: u64,
    pub total: u64,
    pub skipped: bool,
}

impl From<SeedReport> for SeedBody {
    fn from(report: SeedReport) -> Self {
        Self {
            added: report.added,
            total: report.total,
            skipped: report.skipped,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<PersonBody>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<PersonBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created { location: String, body: Json<PersonBody> },
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created { location, body } => {
                (StatusCode::CREATED, [(LOCATION, location)], body).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<PersonId, ApiError> {
    PersonId::from_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("invalid person id {raw:?}")))
}

/// `GET /api/people`
#[utoipa::path(
    get,
    path = "/api/people",
    responses(
        (status = 200, description = "Every person, ordered by last then first name", body = Vec<PersonBody>),
    ),
    tag = "people"
)]
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: PersonRepository + Send + Sync + 'static,
{
    let people = state.person_service.list_people().await?;
    Ok(ListResponse::Ok(Json(
        people.into_iter().map(PersonBody::from).collect(),
    )))
}

/// `GET /api/people/:id`
#[utoipa::path(
    get,
    path = "/api/people/{id}",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person found", body = PersonBody),
        (status = 404, description = "No such person", body = crate::error::ErrorBody),
    ),
    tag = "people"
)]
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: PersonRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let person = state.person_service.get_person(id).await?;
    Ok(GetResponse::Ok(Json(person.into())))
}

/// `POST /api/people`
#[utoipa::path(
    post,
    path = "/api/people",
    request_body = PersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonBody,
            headers(("Location" = String, description = "URL of the new person"))),
    ),
    tag = "people"
)]
pub async fn create<R>(
    State(state): State<AppState<R>>,
    Json(req): Json<PersonRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: PersonRepository + Send + Sync + 'static,
{
    let created = state.person_service.create_person(req.into()).await?;
    Ok(CreateResponse::Created {
        location: format!("/api/people/{}", created.id),
        body: Json(created.into()),
    })
}

/// `PUT /api/people/:id`
#[utoipa::path(
    put,
    path = "/api/people/{id}",
    params(("id" = i64, Path, description = "Person id")),
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person replaced", body = PersonBody),
        (status = 404, description = "No such person", body = crate::error::ErrorBody),
    ),
    tag = "people"
)]
pub async fn update<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<PersonRequest>,
) -> Result<GetResponse, ApiError>
where
    R: PersonRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let updated = state.person_service.update_person(id, req.into()).await?;
    Ok(GetResponse::Ok(Json(updated.into())))
}

/// `DELETE /api/people/:id`
#[utoipa::path(
    delete,
    path = "/api/people/{id}",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "No such person", body = crate::error::ErrorBody),
    ),
    tag = "people"
)]
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: PersonRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    state.person_service.delete_person(id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `POST /api/people/seed`
#[utoipa::path(
    post,
    path = "/api/people/seed",
    responses(
        (status = 200, description = "Samples inserted, or skipped because data exists", body = SeedBody),
    ),
    tag = "people"
)]
pub async fn seed<R>(State(state): State<AppState<R>>) -> Result<Json<SeedBody>, ApiError>
where
    R: PersonRepository + Send + Sync + 'static,
{
    let report = state.person_service.seed().await?;
    Ok(Json(report.into()))
}
