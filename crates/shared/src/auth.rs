//! Bearer credential and auth response types.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Opaque bearer token with an absolute expiry.
///
/// The token is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    token: String,
    /// Instant after which the credential is no longer sent.
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Creates a credential expiring at the given instant.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Creates a credential that lives for `ttl` from now.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    #[must_use]
    pub fn issue(token: impl Into<String>, ttl: Duration) -> Option<Self> {
        let expires_at = Utc::now().checked_add_signed(ttl)?;
        Some(Self::new(token, expires_at))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns true once `now` has reached the expiry instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns true if the credential has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body returned by `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Issued bearer token.
    pub token: String,
    /// Optional success message.
    #[serde(default)]
    pub message: Option<String>,
}
