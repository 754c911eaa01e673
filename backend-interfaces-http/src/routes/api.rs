use axum::routing::{get, post, put};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{history_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/history",
            get(history_handlers::list_events).post(history_handlers::create_event),
        )
        .route("/history/bulk", post(history_handlers::bulk_insert_events))
        .route(
            "/history/:id",
            put(history_handlers::update_event).delete(history_handlers::delete_event),
        )
        .route(
            "/history/country/:country",
            get(history_handlers::list_events_by_country),
        )
        .route(
            "/history/page/:page/:page_size",
            get(history_handlers::list_events_page),
        )
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
