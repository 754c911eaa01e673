pub mod postgres_events;

pub use postgres_events::*;
