use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use backend_application::commands::event_commands;
use backend_application::queries::event_queries;
use backend_application::AppState;
use backend_domain::{BulkEventsPayload, Event, EventDraft, EventId, PageRequest};

use crate::error::HttpError;
use crate::extractors::{ApiJson, ApiPath};

pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<EventDraft>,
) -> Result<(StatusCode, Json<Event>), HttpError> {
    let event = event_commands::create_event(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, HttpError> {
    let rows = event_queries::list_events(&state).await?;
    Ok(Json(rows))
}

pub async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<EventDraft>,
) -> Result<Response, HttpError> {
    let updated = event_commands::update_event(&state, EventId(id), payload).await?;
    Ok(row_or_empty(updated))
}

pub async fn delete_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, HttpError> {
    let deleted = event_commands::delete_event(&state, EventId(id)).await?;
    Ok(row_or_empty(deleted))
}

pub async fn bulk_insert_events(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BulkEventsPayload>,
) -> Result<(StatusCode, Json<Vec<Event>>), HttpError> {
    let rows = event_commands::bulk_insert_events(&state, payload.events).await?;
    Ok((StatusCode::CREATED, Json(rows)))
}

pub async fn list_events_by_country(
    State(state): State<AppState>,
    ApiPath(country): ApiPath<String>,
) -> Result<Json<Vec<Event>>, HttpError> {
    let rows = event_queries::list_events_by_country(&state, &country).await?;
    Ok(Json(rows))
}

pub async fn list_events_page(
    State(state): State<AppState>,
    ApiPath((page, page_size)): ApiPath<(i64, i64)>,
) -> Result<Json<Vec<Event>>, HttpError> {
    let rows = event_queries::list_events_page(&state, PageRequest::new(page, page_size)).await?;
    Ok(Json(rows))
}

/// A missing row still answers 200, with no body.
fn row_or_empty(row: Option<Event>) -> Response {
    match row {
        Some(event) => (StatusCode::OK, Json(event)).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
