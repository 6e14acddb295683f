//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix for nested overrides (`MARKET__AUTH__JWT_SECRET`).
const ENV_PREFIX: &str = "MARKET";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the process environment.
    ///
    /// Sources, lowest priority first:
    /// 1. `config/default.toml`
    /// 2. `config/{env}.toml`
    /// 3. `MARKET__SECTION__KEY` variables
    /// 4. the bare `JWT_SECRET` and `PORT` variables
    ///
    /// The result is validated; a missing signing secret is an error.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let jwt_secret = std::env::var("JWT_SECRET").ok();
        let port = std::env::var("PORT")
            .ok()
            .map(|p| {
                p.parse::<i64>()
                    .map_err(|_| AppError::configuration(format!("PORT is not a number: '{p}'")))
            })
            .transpose()?;

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt_secret", jwt_secret)?
            .set_override_option("server.port", port)?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants that must hold before serving traffic.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.signing_secret()?;

        if self.auth.password_min_length == 0 {
            return Err(AppError::configuration(
                "auth.password_min_length must be at least 1",
            ));
        }

        if self.database.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }

        Ok(())
    }
}
