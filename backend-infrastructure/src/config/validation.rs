use anyhow::{anyhow, Result};
use sqlx::postgres::PgSslMode;

pub const SSL_MODES: [&str; 6] = [
    "disable",
    "allow",
    "prefer",
    "require",
    "verify-ca",
    "verify-full",
];

pub fn parse_ssl_mode(value: &str) -> Result<PgSslMode> {
    let normalized = value.trim().to_lowercase();
    if !SSL_MODES.contains(&normalized.as_str()) {
        return Err(anyhow!(
            "unknown postgres ssl mode '{}', expected one of {}",
            value,
            SSL_MODES.join(", ")
        ));
    }
    normalized
        .parse::<PgSslMode>()
        .map_err(|err| anyhow!("invalid postgres ssl mode '{}': {}", value, err))
}

pub fn validate_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{} must not be empty", field));
    }
    Ok(())
}
