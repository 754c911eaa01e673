// Event entity
// A single row of the `history` table

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value_objects::EventId;

/// Number of caller-supplied columns per event.
pub const EVENT_FIELD_COUNT: usize = 8;

/// PostgreSQL accepts at most `u16::MAX` bind parameters per statement.
pub const MAX_BIND_PARAMETERS: usize = u16::MAX as usize;

/// Largest batch a single multi-row insert can carry.
pub const MAX_BULK_EVENTS: usize = MAX_BIND_PARAMETERS / EVENT_FIELD_COUNT;

/// A persisted historical event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub period: String,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub country: String,
    pub city: String,
}

impl Event {
    pub fn event_id(&self) -> EventId {
        EventId(self.id)
    }

    /// Everything but the identity, for comparing a stored row with its input.
    pub fn fields(&self) -> NewEvent {
        NewEvent {
            title: self.title.clone(),
            description: self.description.clone(),
            year: self.year,
            period: self.period.clone(),
            month: self.month,
            day: self.day,
            country: self.country.clone(),
            city: self.city.clone(),
        }
    }
}

/// Request payload for one event, exactly as the caller sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub month: Option<i32>,
    #[serde(default)]
    pub day: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkEventsPayload {
    #[serde(default)]
    pub events: Vec<EventDraft>,
}

/// A validated event ready to be written. Field order matches the column order
/// of every insert and update statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub period: String,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub country: String,
    pub city: String,
}

impl NewEvent {
    /// Validates a whole batch, reporting the first offending index.
    pub fn batch(drafts: Vec<EventDraft>) -> Result<Vec<NewEvent>, ValidationError> {
        if drafts.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        if drafts.len() > MAX_BULK_EVENTS {
            return Err(ValidationError::BatchTooLarge {
                len: drafts.len(),
                max: MAX_BULK_EVENTS,
            });
        }
        drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                NewEvent::try_from(draft).map_err(|err| match err {
                    ValidationError::MissingField(field) => {
                        ValidationError::MissingBatchField { index, field }
                    }
                    other => other,
                })
            })
            .collect()
    }
}

impl TryFrom<EventDraft> for NewEvent {
    type Error = ValidationError;

    fn try_from(draft: EventDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(draft.title, "title")?,
            description: required(draft.description, "description")?,
            year: required(draft.year, "year")?,
            period: required(draft.period, "period")?,
            month: draft.month,
            day: draft.day,
            country: required(draft.country, "country")?,
            city: required(draft.city, "city")?,
        })
    }
}

impl From<NewEvent> for EventDraft {
    fn from(event: NewEvent) -> Self {
        Self {
            title: Some(event.title),
            description: Some(event.description),
            year: Some(event.year),
            period: Some(event.period),
            month: event.month,
            day: event.day,
            country: Some(event.country),
            city: Some(event.city),
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}
