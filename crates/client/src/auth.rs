//! Sign-in and registration.
//!
//! Both flows store the issued token with a fixed lifetime, re-resolve
//! identity through the session controller, and then move to the landing
//! view.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use tracing::info;
use validator::{Validate, ValidationError};
use vaultdash_core::routing::Navigator;
use vaultdash_shared::auth::TokenResponse;
use vaultdash_shared::config::{SessionConfig, StaleResponsePolicy};

use crate::credentials::CredentialStore;
use crate::error::{ClientError, GENERIC_ERROR_MESSAGE};
use crate::gateway::{ApiRequest, RequestError, RequestGateway, Settled};
use crate::session::SessionController;
use crate::transport::Transport;

/// Login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";
/// Registration endpoint.
pub const REGISTER_PATH: &str = "/auth/register";

const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
const MINIMUM_AGE_YEARS: i32 = 18;
const FALLBACK_CREDENTIAL_TTL_HOURS: i64 = 3;

/// Login form.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginInput {
    /// Account email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Postal address collected at registration.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    /// Street line.
    #[validate(length(min = 5, message = "Street address is required"))]
    pub street: String,
    /// City.
    #[validate(length(min = 2, message = "City is required"))]
    pub city: String,
    /// State or region.
    #[validate(length(min = 2, message = "State is required"))]
    pub state: String,
    /// Country.
    #[validate(length(min = 2, message = "Country is required"))]
    pub country: String,
    /// Postal code.
    #[validate(length(min = 4, message = "Zip code is required"))]
    pub zip_code: String,
}

/// Registration form. `confirm_password` is checked locally and never sent.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    /// Given name.
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    /// Account email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Phone number, `+` followed by 10 to 15 digits.
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[validate(custom(function = "validate_date_of_birth"))]
    pub date_of_birth: String,
    /// Bank verification number.
    #[validate(length(equal = 10, message = "BVN must be 10 digits"))]
    pub bvn: String,
    /// Account password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Password typed a second time.
    #[serde(skip)]
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    /// Postal address.
    #[validate(nested)]
    pub address: AddressInput,
}

const REGISTRATION_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "phone_number",
    "date_of_birth",
    "bvn",
    "password",
    "confirm_password",
    "address.street",
    "address.city",
    "address.state",
    "address.country",
    "address.zip_code",
];

fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or_default();
    let valid = value.starts_with('+')
        && (10..=15).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number").with_message(Cow::Borrowed(
            "Invalid phone number format (e.g., +2347000000000)",
        )))
    }
}

/// Age is counted in calendar years, as on the sign-up form.
fn validate_date_of_birth(value: &str) -> Result<(), ValidationError> {
    let old_enough = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .is_ok_and(|born| Utc::now().year() - born.year() >= MINIMUM_AGE_YEARS);
    if old_enough {
        Ok(())
    } else {
        Err(ValidationError::new("date_of_birth")
            .with_message(Cow::Borrowed("You must be at least 18 years old")))
    }
}

/// Performs login and registration.
pub struct AuthClient {
    gateway: RequestGateway<TokenResponse>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    credential_ttl: TimeDelta,
    landing_path: String,
}

impl AuthClient {
    /// Creates a client using the session section for token lifetime and
    /// the landing view. An out-of-range lifetime falls back to three hours.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        config: &SessionConfig,
        policy: StaleResponsePolicy,
    ) -> Self {
        Self {
            gateway: RequestGateway::with_policy(transport, Arc::clone(&credentials), policy),
            credentials,
            navigator,
            credential_ttl: config
                .credential_ttl()
                .unwrap_or_else(|| TimeDelta::hours(FALLBACK_CREDENTIAL_TTL_HOURS)),
            landing_path: config.landing_path.clone(),
        }
    }

    /// True while a login or registration request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.gateway.is_busy()
    }

    /// Error of the last stored login or registration attempt.
    #[must_use]
    pub fn last_error(&self) -> Option<RequestError> {
        self.gateway.last_error()
    }

    /// Signs in. Returns the success message.
    ///
    /// On 200 the token is stored, identity re-resolved, and the landing
    /// view loaded from scratch. A 400 surfaces the server's message; any
    /// other failure the generic one.
    pub async fn login(
        &self,
        input: &LoginInput,
        session: &SessionController,
    ) -> Result<String, ClientError> {
        input
            .validate()
            .map_err(|errors| ClientError::from_validation(&errors, &["email", "password"]))?;

        let settled = self
            .gateway
            .dispatch(ApiRequest::post(LOGIN_PATH).json(input))
            .await;

        let token = match Self::issued_token(&settled, 200) {
            Some(token) => token,
            None if settled.outcome.status == 400 => {
                let message = settled
                    .error_message(GENERIC_ERROR_MESSAGE)
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
                return Err(ClientError::rejected(400, message));
            }
            None => {
                return Err(ClientError::rejected(
                    settled.outcome.status,
                    GENERIC_ERROR_MESSAGE,
                ));
            }
        };

        self.credentials.store_token(&token.token, self.credential_ttl)?;
        info!(email = %input.email, "signed in");

        session.resolve_identity().await;
        self.navigator.reload(&self.landing_path);

        Ok(token
            .message
            .unwrap_or_else(|| "Login successful".to_string()))
    }

    /// Creates an account. Returns the success message.
    ///
    /// On 201 the token is stored, identity re-resolved, and the landing
    /// view shown. Any failure surfaces the server's message or a
    /// registration-specific fallback.
    pub async fn register(
        &self,
        input: &RegistrationInput,
        session: &SessionController,
    ) -> Result<String, ClientError> {
        input
            .validate()
            .map_err(|errors| ClientError::from_validation(&errors, REGISTRATION_FIELDS))?;

        let settled = self
            .gateway
            .dispatch(ApiRequest::post(REGISTER_PATH).json(input))
            .await;

        let Some(token) = Self::issued_token(&settled, 201) else {
            let message = settled
                .error_message(REGISTRATION_FAILED)
                .unwrap_or_else(|| REGISTRATION_FAILED.to_string());
            return Err(ClientError::rejected(settled.outcome.status, message));
        };

        self.credentials.store_token(&token.token, self.credential_ttl)?;
        info!(email = %input.email, "account created");

        session.resolve_identity().await;
        self.navigator.replace(&self.landing_path);

        Ok("Account created successfully!".to_string())
    }

    fn issued_token(settled: &Settled<TokenResponse>, expected: u16) -> Option<TokenResponse> {
        if settled.outcome.has_status(expected) {
            settled.outcome.data.clone()
        } else {
            None
        }
    }
}
