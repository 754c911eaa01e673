use serde::Deserialize;

use crate::error::ValidationError;

/// 1-indexed page coordinates from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

/// `LIMIT`/`OFFSET` pair derived from a validated [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// offset = (page - 1) * page_size
    pub fn window(&self) -> Result<PageWindow, ValidationError> {
        if self.page < 1 {
            return Err(ValidationError::InvalidPage(self.page));
        }
        if self.page_size < 1 {
            return Err(ValidationError::InvalidPageSize(self.page_size));
        }
        let offset = (self.page - 1)
            .checked_mul(self.page_size)
            .ok_or(ValidationError::PageOutOfRange {
                page: self.page,
                page_size: self.page_size,
            })?;
        Ok(PageWindow {
            limit: self.page_size,
            offset,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub ensure_schema: bool,
}
