use tracing::{error, warn};

use backend_domain::{Event, EventDraft, EventId, NewEvent, ValidationError};

use crate::{AppError, AppState};

pub async fn create_event(state: &AppState, draft: EventDraft) -> Result<Event, AppError> {
    state.metrics.record_operation();
    let event = validated(state, NewEvent::try_from(draft))?;
    let stored = state.event_repo.insert(&event).await.map_err(|err| {
        error!("failed to create event: {:#}", err);
        state.metrics.record_backend_error();
        AppError::Backend(err)
    })?;
    state.metrics.record_rows_written(1);
    Ok(stored)
}

/// Overwrites all eight columns. `Ok(None)` when `id` matches nothing.
pub async fn update_event(
    state: &AppState,
    id: EventId,
    draft: EventDraft,
) -> Result<Option<Event>, AppError> {
    state.metrics.record_operation();
    let event = validated(state, NewEvent::try_from(draft))?;
    let updated = state.event_repo.update(id, &event).await.map_err(|err| {
        error!("failed to update event {}: {:#}", id, err);
        state.metrics.record_backend_error();
        AppError::Backend(err)
    })?;
    if updated.is_some() {
        state.metrics.record_rows_written(1);
    }
    Ok(updated)
}

/// Returns the deleted row. `Ok(None)` when `id` matches nothing.
pub async fn delete_event(state: &AppState, id: EventId) -> Result<Option<Event>, AppError> {
    state.metrics.record_operation();
    let deleted = state.event_repo.delete(id).await.map_err(|err| {
        error!("failed to delete event {}: {:#}", id, err);
        state.metrics.record_backend_error();
        AppError::Backend(err)
    })?;
    if deleted.is_some() {
        state.metrics.record_rows_written(1);
    }
    Ok(deleted)
}

pub async fn bulk_insert_events(
    state: &AppState,
    drafts: Vec<EventDraft>,
) -> Result<Vec<Event>, AppError> {
    state.metrics.record_operation();
    let events = validated(state, NewEvent::batch(drafts))?;
    let stored = state.event_repo.insert_many(&events).await.map_err(|err| {
        error!("failed to bulk insert {} events: {:#}", events.len(), err);
        state.metrics.record_backend_error();
        AppError::Backend(err)
    })?;
    state.metrics.record_rows_written(stored.len());
    Ok(stored)
}

pub(crate) fn validated<T>(
    state: &AppState,
    result: Result<T, ValidationError>,
) -> Result<T, AppError> {
    result.map_err(|err| {
        warn!("rejected request: {}", err);
        state.metrics.record_validation_error();
        AppError::Validation(err)
    })
}
