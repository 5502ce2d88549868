//! Application configuration management.

use chrono::TimeDelta;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote API configuration.
    pub api: ApiConfig,
    /// Session and navigation configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Request gateway configuration.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto (e.g. `https://host/api`).
    pub base_url: String,
    /// Optional per-request timeout. Unset means the transport default applies.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of a freshly issued bearer credential, in hours.
    #[serde(default = "default_credential_ttl_hours")]
    pub credential_ttl_hours: i64,
    /// Where the file credential store keeps the token.
    #[serde(default = "default_credential_path")]
    pub credential_path: String,
    /// Login view path.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Default authenticated landing view.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    /// Paths that require an authenticated session.
    #[serde(default = "default_protected_paths")]
    pub protected_paths: Vec<String>,
    /// Paths only meaningful for anonymous visitors.
    #[serde(default = "default_auth_paths")]
    pub auth_paths: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            credential_ttl_hours: default_credential_ttl_hours(),
            credential_path: default_credential_path(),
            login_path: default_login_path(),
            landing_path: default_landing_path(),
            protected_paths: default_protected_paths(),
            auth_paths: default_auth_paths(),
        }
    }
}

impl SessionConfig {
    /// Credential lifetime, or `None` when `credential_ttl_hours` is not a
    /// positive number of hours that fits a duration.
    #[must_use]
    pub fn credential_ttl(&self) -> Option<TimeDelta> {
        if self.credential_ttl_hours <= 0 {
            return None;
        }
        TimeDelta::try_hours(self.credential_ttl_hours)
    }
}

fn default_credential_ttl_hours() -> i64 {
    3
}

fn default_credential_path() -> String {
    ".vaultdash/credential.json".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_landing_path() -> String {
    "/dashboard".to_string()
}

fn default_protected_paths() -> Vec<String> {
    ["/dashboard", "/wallets", "/virtual-cards", "/fx", "/settings"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_auth_paths() -> Vec<String> {
    vec!["/login".to_string(), "/signup".to_string()]
}

/// What a gateway does with a response that settles after a newer request
/// on the same instance was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Only the most recently issued request may update the stored outcome.
    #[default]
    Discard,
    /// Whichever response arrives last overwrites the stored outcome.
    LastWriteWins,
}

/// Request gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// Handling of out-of-order responses.
    #[serde(default)]
    pub stale_responses: StaleResponsePolicy,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the credential
    /// lifetime is out of range.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VAULTDASH").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        if config.session.credential_ttl().is_none() {
            return Err(config::ConfigError::Message(format!(
                "session.credential_ttl_hours out of range: {}",
                config.session.credential_ttl_hours
            )));
        }

        Ok(config)
    }
}
