use tracing::warn;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Reminders are kept in memory when this is missing.
    pub database_url: Option<String>,
    /// Size of the Postgres connection pool
    pub database_max_connections: u32,
}

impl Config {
    pub fn new() -> Self {
        Self::from_vars(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("DATABASE_MAX_CONNECTIONS").ok(),
        )
    }

    fn from_vars(database_url: Option<String>, max_connections: Option<String>) -> Self {
        let database_url = database_url.filter(|url| !url.trim().is_empty());
        let database_max_connections = match max_connections {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => match value.parse::<u32>() {
                Ok(max) if max > 0 => max,
                _ => {
                    warn!(
                        "The given DATABASE_MAX_CONNECTIONS: {} is not valid, falling back to the default: {}.",
                        value, DEFAULT_MAX_CONNECTIONS
                    );
                    DEFAULT_MAX_CONNECTIONS
                }
            },
        };
        Self {
            database_url,
            database_max_connections,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}
