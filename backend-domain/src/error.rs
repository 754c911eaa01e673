use thiserror::Error;

/// Request shapes rejected before any statement is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("events[{index}]: missing field `{field}`")]
    MissingBatchField { index: usize, field: &'static str },
    #[error("events must not be empty")]
    EmptyBatch,
    #[error("too many events in one batch: {len} (max {max})")]
    BatchTooLarge { len: usize, max: usize },
    #[error("page must be at least 1, got {0}")]
    InvalidPage(i64),
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(i64),
    #[error("page {page} with page size {page_size} is out of range")]
    PageOutOfRange { page: i64, page_size: i64 },
}
