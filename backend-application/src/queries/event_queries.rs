use tracing::error;

use backend_domain::{Event, PageRequest};

use crate::commands::event_commands::validated;
use crate::{AppError, AppState};

/// Every row, in whatever order the backend returns them.
pub async fn list_events(state: &AppState) -> Result<Vec<Event>, AppError> {
    state.metrics.record_operation();
    let rows = state.event_repo.list_all().await.map_err(|err| {
        error!("failed to list events: {:#}", err);
        state.metrics.record_backend_error();
        AppError::Backend(err)
    })?;
    Ok(rows)
}

/// Exact, case-sensitive match on `country`.
pub async fn list_events_by_country(
    state: &AppState,
    country: &str,
) -> Result<Vec<Event>, AppError> {
    state.metrics.record_operation();
    let rows = state
        .event_repo
        .find_by_country(country)
        .await
        .map_err(|err| {
            error!("failed to fetch events for country {:?}: {:#}", country, err);
            state.metrics.record_backend_error();
            AppError::Backend(err)
        })?;
    Ok(rows)
}

/// Pages carry no ORDER BY, so they are only stable while nothing is written
/// between requests.
pub async fn list_events_page(
    state: &AppState,
    request: PageRequest,
) -> Result<Vec<Event>, AppError> {
    state.metrics.record_operation();
    let window = validated(state, request.window())?;
    let rows = state.event_repo.fetch_page(window).await.map_err(|err| {
        error!(
            "failed to fetch page {} (size {}): {:#}",
            request.page, request.page_size, err
        );
        state.metrics.record_backend_error();
        AppError::Backend(err)
    })?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::commands::event_commands::{bulk_insert_events, create_event, delete_event};
    use crate::testing::{memory_state, sample_event};
    use backend_domain::{EventDraft, ValidationError};

    async fn seed(state: &AppState, count: usize) -> Vec<Event> {
        let drafts = (0..count)
            .map(|i| {
                let country = if i % 2 == 0 { "France" } else { "france" };
                EventDraft::from(sample_event(&format!("Event {i}"), country))
            })
            .collect();
        bulk_insert_events(state, drafts).await.expect("seed")
    }

    #[tokio::test]
    async fn list_reflects_creates_and_deletes() {
        let (state, _repo) = memory_state();
        let kept = create_event(&state, sample_event("Kept", "Japan").into())
            .await
            .expect("create");
        let removed = create_event(&state, sample_event("Removed", "Japan").into())
            .await
            .expect("create");
        delete_event(&state, removed.event_id()).await.expect("delete");

        let rows = list_events(&state).await.expect("list");
        assert_eq!(rows, vec![kept]);
    }

    #[tokio::test]
    async fn country_filter_is_byte_exact() {
        let (state, _repo) = memory_state();
        let rows = seed(&state, 5).await;

        let upper = list_events_by_country(&state, "France").await.expect("query");
        let lower = list_events_by_country(&state, "france").await.expect("query");
        let expected_upper: Vec<_> = rows.iter().filter(|r| r.country == "France").cloned().collect();

        assert_eq!(upper, expected_upper);
        assert_eq!(upper.len(), 3);
        assert_eq!(lower.len(), 2);
    }

    #[tokio::test]
    async fn country_without_rows_is_empty_success() {
        let (state, _repo) = memory_state();
        seed(&state, 2).await;
        let rows = list_events_by_country(&state, "Atlantis").await.expect("query");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn pages_do_not_overlap_or_skip() {
        let (state, _repo) = memory_state();
        let all = seed(&state, 25).await;

        let first = list_events_page(&state, PageRequest::new(1, 10)).await.expect("page 1");
        let second = list_events_page(&state, PageRequest::new(2, 10)).await.expect("page 2");
        let third = list_events_page(&state, PageRequest::new(3, 10)).await.expect("page 3");

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 10);
        assert_eq!(third.len(), 5);
        let ids: HashSet<i32> = first.iter().chain(&second).chain(&third).map(|r| r.id).collect();
        assert_eq!(ids.len(), all.len());
        assert_eq!(first[9].id + 1, second[0].id);
    }

    #[tokio::test]
    async fn page_past_end_is_empty() {
        let (state, _repo) = memory_state();
        seed(&state, 3).await;
        let rows = list_events_page(&state, PageRequest::new(4, 10)).await.expect("page");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn non_positive_page_coordinates_are_rejected() {
        let (state, _repo) = memory_state();
        seed(&state, 3).await;

        for (page, page_size) in [(0, 10), (-1, 10), (1, 0), (1, -10)] {
            let err = list_events_page(&state, PageRequest::new(page, page_size))
                .await
                .expect_err("invalid page");
            assert!(matches!(
                err,
                AppError::Validation(
                    ValidationError::InvalidPage(_) | ValidationError::InvalidPageSize(_)
                )
            ));
        }
    }

    #[tokio::test]
    async fn read_failures_are_backend_errors() {
        let (state, repo) = memory_state();
        repo.set_failing(true);

        assert!(matches!(list_events(&state).await, Err(AppError::Backend(_))));
        assert!(matches!(
            list_events_by_country(&state, "France").await,
            Err(AppError::Backend(_))
        ));
        assert!(matches!(
            list_events_page(&state, PageRequest::new(1, 10)).await,
            Err(AppError::Backend(_))
        ));
    }
}
