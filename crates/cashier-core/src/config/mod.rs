//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod backend;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::backend::BackendConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment name (`development`, `production`, ...).
    #[serde(default = "default_environment")]
    pub environment: String,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Business backend settings.
    pub backend: BackendConfig,
    /// Session cookie and boundary settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `{dir}/default.toml` with `{dir}/{env}.toml` and environment
    /// variables of the form `CASHIER__SECTION__KEY`.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        Self::load_with(dir, env, environment_source())
    }

    fn load_with(dir: &str, env: &str, overrides: config::Environment) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .set_default("environment", env)?
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(overrides)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Build a configuration with defaults for everything but the backend.
    pub fn with_backend(base_url: impl Into<String>) -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            backend: BackendConfig::new(base_url),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Whether this deployment runs in production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Whether session cookies carry the `Secure` attribute.
    ///
    /// An explicit `session.secure_cookies` wins; otherwise cookies are
    /// secure exactly in production.
    pub fn secure_cookies(&self) -> bool {
        self.session
            .secure_cookies
            .unwrap_or_else(|| self.is_production())
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(AppError::configuration("backend.base_url must be set"));
        }
        if !self.session.login_path.starts_with('/') || !self.session.dashboard_path.starts_with('/')
        {
            return Err(AppError::configuration(
                "session.login_path and session.dashboard_path must be absolute paths",
            ));
        }
        Ok(())
    }
}

fn environment_source() -> config::Environment {
    config::Environment::with_prefix("CASHIER")
        .separator("__")
        .try_parsing(true)
}

fn default_environment() -> String {
    "development".to_string()
}
