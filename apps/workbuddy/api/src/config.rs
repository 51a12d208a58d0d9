use core_config::{
    AppInfo, FromEnv, app_info, embedding::EmbeddingConfig, env_parse, server::ServerConfig,
};
use std::time::Duration;

// Import database configs from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub embedding: EmbeddingConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Deadline for creating a job or searching by text (`JOB_REQUEST_TIMEOUT_SECS`)
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL or DB_HOST/DB_USER/...
        let embedding = EmbeddingConfig::from_env()?; // Requires OPENAI_API_KEY
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let request_timeout = Duration::from_secs(env_parse("JOB_REQUEST_TIMEOUT_SECS", "30")?);

        Ok(Self {
            app: app_info!(),
            database,
            embedding,
            server,
            environment,
            request_timeout,
        })
    }
}
