mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo, ReminderFindQuery, Repos,
};
use sqlx::migrate::MigrateError;
use sqlx::PgPool;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl ReminderContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(connection_string) => {
                Repos::create_postgres(connection_string, config.database_max_connections).await?
            }
            None => {
                info!("DATABASE_URL is not set, reminders are kept in memory");
                Repos::create_inmemory()
            }
        };
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context backed by the in-memory store, ignoring the environment
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(Config::new()).await
}

pub async fn run_migration(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}
