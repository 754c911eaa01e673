use async_trait::async_trait;

use crate::entities::{Event, NewEvent, PageWindow};
use crate::value_objects::EventId;

/// Storage for the `history` table. Each call is one statement.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    async fn insert(&self, event: &NewEvent) -> anyhow::Result<Event>;
    /// All-or-nothing; rows come back in input order.
    async fn insert_many(&self, events: &[NewEvent]) -> anyhow::Result<Vec<Event>>;
    async fn list_all(&self) -> anyhow::Result<Vec<Event>>;
    /// `None` when no row has `id`.
    async fn update(&self, id: EventId, event: &NewEvent) -> anyhow::Result<Option<Event>>;
    /// `None` when no row has `id`.
    async fn delete(&self, id: EventId) -> anyhow::Result<Option<Event>>;
    async fn find_by_country(&self, country: &str) -> anyhow::Result<Vec<Event>>;
    async fn fetch_page(&self, window: PageWindow) -> anyhow::Result<Vec<Event>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
