//! Auth state published by the session controller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of the most recent identity resolution.
///
/// Valid transitions:
/// - Loading → Authenticated (identity resolved)
/// - Loading → Unauthenticated (resolution failed)
/// - Authenticated ⇄ Unauthenticated (explicit re-resolution only)
///
/// `Loading` is only ever the initial state; re-resolution never returns to it,
/// so `Loading` doubles as "first resolution still pending".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    /// No resolution has completed yet.
    #[default]
    Loading,
    /// The server recognised the credential.
    Authenticated,
    /// No credential, or the server rejected it.
    Unauthenticated,
}

impl AuthState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }

    /// Returns true once the first resolution has settled.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// Returns true if the session is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// State after a resolution attempt, given whether an identity came back.
    #[must_use]
    pub fn resolved(identified: bool) -> Self {
        if identified {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
