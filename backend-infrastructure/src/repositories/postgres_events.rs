use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use tracing::info;

use backend_domain::{Event, EventId, EventRepository, NewEvent, PageWindow};

use crate::db::HistoryStatements;

type EventQuery<'q> = QueryAs<'q, Postgres, Event, PgArguments>;

#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
    statements: HistoryStatements,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            statements: HistoryStatements::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Binds the eight writable columns in `HISTORY_COLUMNS` order.
fn bind_event<'q>(query: EventQuery<'q>, event: &'q NewEvent) -> EventQuery<'q> {
    query
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.year)
        .bind(&event.period)
        .bind(event.month)
        .bind(event.day)
        .bind(&event.country)
        .bind(&event.city)
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(&self.statements.create_table)
            .execute(&self.pool)
            .await?;
        info!("history table ready");
        Ok(())
    }

    async fn insert(&self, event: &NewEvent) -> Result<Event> {
        let query = sqlx::query_as(&self.statements.insert_one);
        let row = bind_event(query, event).fetch_one(&self.pool).await?;
        Ok(row)
    }

    async fn insert_many(&self, events: &[NewEvent]) -> Result<Vec<Event>> {
        let sql = self.statements.insert_many(events.len())?;
        let mut query = sqlx::query_as(&sql);
        for event in events {
            query = bind_event(query, event);
        }
        // A multi-row VALUES list keeps its input order in RETURNING output.
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as(&self.statements.select_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: EventId, event: &NewEvent) -> Result<Option<Event>> {
        let query = sqlx::query_as(&self.statements.update);
        let row = bind_event(query, event)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: EventId) -> Result<Option<Event>> {
        let row = sqlx::query_as(&self.statements.delete)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_country(&self, country: &str) -> Result<Vec<Event>> {
        let rows = sqlx::query_as(&self.statements.select_by_country)
            .bind(country)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_page(&self, window: PageWindow) -> Result<Vec<Event>> {
        let rows = sqlx::query_as(&self.statements.select_page)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        let _: (i32,) = sqlx::query_as(self.statements.ping)
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p backend-infrastructure -- --ignored
    //
    // Each test works on rows tagged with its own country so tests can share a table.

    async fn repo() -> PostgresEventRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .expect("pool creation failed");
        let repo = PostgresEventRepository::new(pool);
        repo.ensure_schema().await.expect("schema");
        repo
    }

    fn event(title: &str, country: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: format!("{title} description"),
            year: 1066,
            period: "AD".to_string(),
            month: Some(10),
            day: None,
            country: country.to_string(),
            city: "Hastings".to_string(),
        }
    }

    async fn clear(repo: &PostgresEventRepository, country: &str) {
        sqlx::query("DELETE FROM history WHERE country = $1")
            .bind(country)
            .execute(repo.pool())
            .await
            .expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_update_delete_round() {
        let repo = repo().await;
        let country = "test-crud";
        clear(&repo, country).await;

        let created = repo.insert(&event("Battle", country)).await.expect("insert");
        assert_eq!(created.fields(), event("Battle", country));

        let replacement = event("Battle of Hastings", country);
        let updated = repo
            .update(created.event_id(), &replacement)
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields(), replacement);

        let deleted = repo
            .delete(created.event_id())
            .await
            .expect("delete")
            .expect("row existed");
        assert_eq!(deleted, updated);
        assert!(repo.find_by_country(country).await.expect("query").is_empty());

        assert!(repo.update(created.event_id(), &replacement).await.expect("update").is_none());
        assert!(repo.delete(created.event_id()).await.expect("delete").is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bulk_insert_returns_rows_in_order() {
        let repo = repo().await;
        let country = "test-bulk";
        clear(&repo, country).await;

        let events = (0..5)
            .map(|i| event(&format!("Bulk {i}"), country))
            .collect::<Vec<_>>();
        let rows = repo.insert_many(&events).await.expect("bulk insert");
        assert_eq!(rows.len(), events.len());
        for (row, input) in rows.iter().zip(&events) {
            assert_eq!(&row.fields(), input);
        }
        clear(&repo, country).await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn country_filter_is_case_sensitive() {
        let repo = repo().await;
        clear(&repo, "test-Case").await;
        clear(&repo, "test-case").await;

        repo.insert(&event("Upper", "test-Case")).await.expect("insert");
        repo.insert(&event("Lower", "test-case")).await.expect("insert");

        let rows = repo.find_by_country("test-Case").await.expect("query");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Upper");

        clear(&repo, "test-Case").await;
        clear(&repo, "test-case").await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn failed_bulk_insert_writes_nothing() {
        let repo = repo().await;
        let country = "test-atomic";
        clear(&repo, country).await;

        // Second row has a NULL city, which the NOT NULL constraint rejects.
        let sql = repo.statements.insert_many(2).expect("sql");
        let first = event("Valid", country);
        let result = sqlx::query(&sql)
            .bind(&first.title)
            .bind(&first.description)
            .bind(first.year)
            .bind(&first.period)
            .bind(first.month)
            .bind(first.day)
            .bind(&first.country)
            .bind(&first.city)
            .bind("Invalid")
            .bind("no city")
            .bind(1)
            .bind("AD")
            .bind(None::<i32>)
            .bind(None::<i32>)
            .bind(country)
            .bind(None::<String>)
            .execute(repo.pool())
            .await;

        assert!(result.is_err());
        assert!(repo.find_by_country(country).await.expect("query").is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_succeeds() {
        repo().await.ping().await.expect("ping");
    }
}
