use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{DbConfig, RuntimeConfig};

use super::validation::{parse_ssl_mode, validate_not_blank};

pub const CONFIG_PATH_ENV: &str = "HISTORY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_database: String,
    pub postgres_user: String,
    pub postgres_password: Option<String>,
    pub postgres_ssl_mode: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub ensure_schema: bool,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            postgres_host: "localhost".to_string(),
            postgres_port: 5432,
            postgres_database: "history".to_string(),
            postgres_user: "postgres".to_string(),
            postgres_password: None,
            postgres_ssl_mode: "require".to_string(),
            max_connections: 10,
            acquire_timeout_seconds: 10,
            ensure_schema: true,
            max_body_bytes: 8 * 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path)).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str(&content)?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(password) = &self.postgres_password {
            if password.trim().is_empty() {
                self.postgres_password = None;
            }
        }
        self.postgres_host = self.postgres_host.trim().to_string();
        self.postgres_database = self.postgres_database.trim().to_string();
        self.postgres_user = self.postgres_user.trim().to_string();
        self.postgres_ssl_mode = self.postgres_ssl_mode.trim().to_lowercase();
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_not_blank("postgres_host", &self.postgres_host)?;
        validate_not_blank("postgres_database", &self.postgres_database)?;
        validate_not_blank("postgres_user", &self.postgres_user)?;
        parse_ssl_mode(&self.postgres_ssl_mode)?;
        if self.max_connections == 0 {
            return Err(anyhow!("max_connections must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            host: self.postgres_host.clone(),
            port: self.postgres_port,
            database: self.postgres_database.clone(),
            user: self.postgres_user.clone(),
            password: self.postgres_password.clone(),
            ssl_mode: self.postgres_ssl_mode.clone(),
            max_connections: self.max_connections,
            acquire_timeout_seconds: self.acquire_timeout_seconds,
            ensure_schema: self.ensure_schema,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("HISTORY_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("POSTGRE_HOST") {
            self.postgres_host = value;
        }
        if let Ok(value) = env::var("POSTGRE_PORT") {
            self.postgres_port = parse_override("POSTGRE_PORT", &value, self.postgres_port);
        }
        if let Ok(value) = env::var("POSTGRE_DB") {
            self.postgres_database = value;
        }
        if let Ok(value) = env::var("POSTGRE_USER") {
            self.postgres_user = value;
        }
        if let Ok(value) = env::var("POSTGRE_PASSWORD") {
            self.postgres_password = Some(value);
        }
        if let Ok(value) = env::var("POSTGRE_SSL_MODE") {
            self.postgres_ssl_mode = value;
        }
        if let Ok(value) = env::var("HISTORY_MAX_CONNECTIONS") {
            self.max_connections =
                parse_override("HISTORY_MAX_CONNECTIONS", &value, self.max_connections);
        }
        if let Ok(value) = env::var("HISTORY_ACQUIRE_TIMEOUT_SECONDS") {
            self.acquire_timeout_seconds = parse_override(
                "HISTORY_ACQUIRE_TIMEOUT_SECONDS",
                &value,
                self.acquire_timeout_seconds,
            );
        }
        if let Ok(value) = env::var("HISTORY_ENSURE_SCHEMA") {
            self.ensure_schema =
                parse_override("HISTORY_ENSURE_SCHEMA", &value, self.ensure_schema);
        }
        if let Ok(value) = env::var("HISTORY_MAX_BODY_BYTES") {
            self.max_body_bytes =
                parse_override("HISTORY_MAX_BODY_BYTES", &value, self.max_body_bytes);
        }
        if let Ok(value) = env::var("HISTORY_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = parse_override(
                "HISTORY_REQUEST_TIMEOUT_SECONDS",
                &value,
                self.request_timeout_seconds,
            );
        }
    }
}

fn parse_override<T>(name: &str, value: &str, current: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("ignoring {}={:?}: {}, keeping {}", name, value, err, current);
            current
        }
    }
}
