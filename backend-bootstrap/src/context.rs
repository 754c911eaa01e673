use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use backend_application::AppState;
use backend_domain::EventRepository;
use backend_infrastructure::{create_pool, AppConfig, PostgresEventRepository};

pub struct AppContext {
    pub state: AppState,
    pub pool: PgPool,
}

impl AppContext {
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from(path).await?,
            None => AppConfig::load().await?,
        };
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();
        info!(
            bind_addr = %runtime_config.bind_addr,
            postgres_host = %db_config.host,
            postgres_port = db_config.port,
            postgres_database = %db_config.database,
            postgres_user = %db_config.user,
            postgres_password_set = db_config.password.is_some(),
            postgres_ssl_mode = %db_config.ssl_mode,
            "config loaded"
        );

        let pool = create_pool(&db_config).await?;
        let repo = Arc::new(PostgresEventRepository::new(pool.clone()));
        if db_config.ensure_schema {
            repo.ensure_schema().await?;
        }

        let state = AppState::new(runtime_config, repo);
        Ok(Self { state, pool })
    }
}
