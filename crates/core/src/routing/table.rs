//! Route classification.

use vaultdash_shared::config::SessionConfig;

/// How the gate treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires an authenticated session.
    Protected,
    /// Login and signup; pointless once authenticated.
    AuthOnly,
    /// Anything else, including the root path.
    Neutral,
}

/// Path lists and redirect targets used by the gate.
#[derive(Debug, Clone)]
pub struct RouteTable {
    protected: Vec<String>,
    auth_only: Vec<String>,
    login_path: String,
    landing_path: String,
}

impl RouteTable {
    /// Creates a table from explicit lists.
    #[must_use]
    pub fn new(
        protected: Vec<String>,
        auth_only: Vec<String>,
        login_path: impl Into<String>,
        landing_path: impl Into<String>,
    ) -> Self {
        Self {
            protected,
            auth_only,
            login_path: login_path.into(),
            landing_path: landing_path.into(),
        }
    }

    /// Creates a table from session configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.protected_paths.clone(),
            config.auth_paths.clone(),
            config.login_path.clone(),
            config.landing_path.clone(),
        )
    }

    /// Classifies a path by exact match.
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.protected.iter().any(|p| p == path) {
            RouteClass::Protected
        } else if self.auth_only.iter().any(|p| p == path) {
            RouteClass::AuthOnly
        } else {
            RouteClass::Neutral
        }
    }

    /// Login view path.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Default authenticated landing view.
    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}
