// In-memory repository for tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::Mutex;

use backend_domain::{Event, EventRepository, EventId, NewEvent, PageWindow, RuntimeConfig};

use crate::AppState;

#[derive(Default)]
struct Table {
    rows: Vec<Event>,
    last_id: i32,
}

impl Table {
    fn next_row(&mut self, event: &NewEvent) -> Event {
        self.last_id += 1;
        row(self.last_id, event)
    }
}

#[derive(Default)]
pub struct MemoryEventRepository {
    table: Mutex<Table>,
    failing: AtomicBool,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn rows(&self) -> Vec<Event> {
        self.table.lock().await.rows.clone()
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        self.check()
    }

    async fn insert(&self, event: &NewEvent) -> anyhow::Result<Event> {
        self.check()?;
        let mut table = self.table.lock().await;
        let stored = table.next_row(event);
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn insert_many(&self, events: &[NewEvent]) -> anyhow::Result<Vec<Event>> {
        self.check()?;
        let mut table = self.table.lock().await;
        let stored = events
            .iter()
            .map(|event| table.next_row(event))
            .collect::<Vec<_>>();
        table.rows.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Event>> {
        self.check()?;
        Ok(self.table.lock().await.rows.clone())
    }

    async fn update(&self, id: EventId, event: &NewEvent) -> anyhow::Result<Option<Event>> {
        self.check()?;
        let mut table = self.table.lock().await;
        let Some(existing) = table.rows.iter_mut().find(|row| row.id == id.get()) else {
            return Ok(None);
        };
        *existing = row(id.get(), event);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: EventId) -> anyhow::Result<Option<Event>> {
        self.check()?;
        let mut table = self.table.lock().await;
        let position = table.rows.iter().position(|row| row.id == id.get());
        Ok(position.map(|index| table.rows.remove(index)))
    }

    async fn find_by_country(&self, country: &str) -> anyhow::Result<Vec<Event>> {
        self.check()?;
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|row| row.country == country)
            .cloned()
            .collect())
    }

    async fn fetch_page(&self, window: PageWindow) -> anyhow::Result<Vec<Event>> {
        self.check()?;
        let table = self.table.lock().await;
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        Ok(table.rows.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }
}

fn row(id: i32, event: &NewEvent) -> Event {
    Event {
        id,
        title: event.title.clone(),
        description: event.description.clone(),
        year: event.year,
        period: event.period.clone(),
        month: event.month,
        day: event.day,
        country: event.country.clone(),
        city: event.city.clone(),
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 5,
    }
}

pub fn memory_state() -> (AppState, Arc<MemoryEventRepository>) {
    let repo = Arc::new(MemoryEventRepository::new());
    let state = AppState::new(runtime_config(), repo.clone());
    (state, repo)
}

pub fn sample_event(title: &str, country: &str) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        description: format!("{title} description"),
        year: 1789,
        period: "AD".to_string(),
        month: Some(7),
        day: Some(14),
        country: country.to_string(),
        city: "Paris".to_string(),
    }
}
