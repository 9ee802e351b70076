use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::types::RepeatEndPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub schedule: ScheduleConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    SingleUser,
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub proxy: ProxyAuthConfig,
    pub single_user: Option<SingleUserAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyAuthConfig {
    /// Header carrying the user id set by the authenticating reverse proxy.
    pub user_header: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Upper bound on occurrences produced by expanding a single entry.
    pub max_occurrences: usize,
    pub repeat_end_policy: RepeatEndPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryMethod {
    Static,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub method: DirectoryMethod,
    pub url: Option<String>,
    pub timeout_secs: u64,
    #[serde(default)]
    pub memberships: Vec<MembershipConfig>,
}

/// One `(tenant, user) -> classroom` row of the static membership directory.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipConfig {
    pub tenant_id: String,
    pub user_id: String,
    pub classroom_id: String,
    pub name: String,
}

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8699)?
            .set_default("auth.method", "proxy")?
            .set_default("auth.proxy.user_header", "x-remote-user")?
            .set_default("logging.level", "info")?
            .set_default("schedule.max_occurrences", 10_000)?
            .set_default("schedule.repeat_end_policy", "entry_gate")?
            .set_default("directory.method", "static")?
            .set_default("directory.timeout_secs", 5)?)
    }

    /// ## Summary
    /// Builds a `Settings` from built-in defaults only, ignoring the
    /// environment and any configuration file.
    ///
    /// ## Errors
    /// Returns an error if the defaults fail to deserialize.
    pub fn defaults() -> Result<Self> {
        Ok(Self::builder()?.build()?.try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration from environment variables and `config.toml` into a `Settings`.
    /// Nested keys use a double underscore, e.g. `SCHEDULE__MAX_OCCURRENCES`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks cross-field constraints serde cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the HTTP directory has no URL or
    /// the occurrence limit is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.directory.method == DirectoryMethod::Http && self.directory.url.is_none() {
            return Err(CoreError::ConfigError(
                "directory.url is required when directory.method is http".to_string(),
            ));
        }

        if self.schedule.max_occurrences == 0 {
            return Err(CoreError::ConfigError(
                "schedule.max_occurrences must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
