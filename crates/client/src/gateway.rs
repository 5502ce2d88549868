//! Request gateway.
//!
//! Every API call goes through a [`RequestGateway`]. It attaches the bearer
//! credential read fresh from the store, never fails, and records the last
//! outcome, the last error, and a busy flag for its own call site.
//!
//! Each gateway numbers the requests it issues. With
//! [`StaleResponsePolicy::Discard`] a response is handed back to its caller
//! but not stored when a newer request on the same gateway is still live or
//! has already stored its own outcome. A newer request that is dropped before
//! it settles stops counting, so the older response is stored after all.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;
use vaultdash_shared::config::StaleResponsePolicy;

use crate::credentials::CredentialStore;
use crate::transport::{Method, Transport, TransportError, WireRequest, WireResponse};

/// Status reported when no response was received.
pub const NO_RESPONSE_STATUS: u16 = 500;

/// An API call described by the caller.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Result<Value, String>>,
}

impl ApiRequest {
    /// Creates a request without a body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// `PATCH path`.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Attaches a JSON body. A body that cannot be encoded turns the call
    /// into a failure without touching the network.
    #[must_use]
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_string()));
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn into_wire(self, authorization: Option<String>) -> Result<WireRequest, String> {
        let body = self.body.transpose()?;
        Ok(WireRequest {
            method: self.method,
            path: self.path,
            body,
            authorization,
        })
    }
}

/// Uniform result of a call: the body, if any, and the status.
///
/// On failure `data` holds whatever the server sent back when it matches
/// `T`, and `status` defaults to 500 when no response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome<T> {
    /// Decoded body.
    pub data: Option<T>,
    /// HTTP status, or 500 without a response.
    pub status: u16,
}

impl<T> RequestOutcome<T> {
    /// Returns true for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the status equals `expected`.
    #[must_use]
    pub fn has_status(&self, expected: u16) -> bool {
        self.status == expected
    }

    fn failed(status: u16) -> Self {
        Self { data: None, status }
    }
}

/// Error record kept next to a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    /// Server-provided message when there was one, else a transport description.
    pub message: String,
    /// Same value as the outcome status.
    pub code: u16,
    from_server: bool,
}

impl RequestError {
    fn from_response(response: &WireResponse) -> Self {
        match server_message(response.body.as_ref()) {
            Some(message) => Self {
                message,
                code: response.status,
                from_server: true,
            },
            None => Self {
                message: format!("Request failed with status code {}", response.status),
                code: response.status,
                from_server: false,
            },
        }
    }

    fn without_response(message: String) -> Self {
        Self {
            message,
            code: NO_RESPONSE_STATUS,
            from_server: false,
        }
    }

    fn undecodable(status: u16, err: &serde_json::Error) -> Self {
        Self {
            message: format!("Unexpected response body: {err}"),
            code: status,
            from_server: false,
        }
    }

    /// The server's own `message` or `error` field, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.from_server.then_some(self.message.as_str())
    }

    /// Text to show the user: the server's message verbatim, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// A settled call as seen by its caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<T> {
    /// The outcome of this call.
    pub outcome: RequestOutcome<T>,
    /// Error record of this call, if it failed.
    pub error: Option<RequestError>,
    /// False when a newer call on the same gateway was issued while this
    /// one was in flight and the gateway discards stale responses.
    pub is_current: bool,
}

impl<T> Settled<T> {
    /// Message of a failed call, if any.
    #[must_use]
    pub fn error_message(&self, fallback: &str) -> Option<String> {
        self.error.as_ref().map(|e| e.user_message(fallback))
    }
}

struct Slot<T> {
    issued: u64,
    live: BTreeSet<u64>,
    stored: u64,
    outcome: Option<RequestOutcome<T>>,
    error: Option<RequestError>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            issued: 0,
            live: BTreeSet::new(),
            stored: 0,
            outcome: None,
            error: None,
        }
    }

    /// No newer call is live and none has stored an outcome.
    fn is_newest(&self, sequence: u64) -> bool {
        sequence > self.stored && self.live.range(sequence + 1..).next().is_none()
    }

    /// Decides whether call `sequence` may store its outcome.
    fn accept(&mut self, sequence: u64, policy: StaleResponsePolicy) -> bool {
        let is_current = match policy {
            StaleResponsePolicy::Discard => self.is_newest(sequence),
            StaleResponsePolicy::LastWriteWins => true,
        };
        if is_current {
            self.stored = self.stored.max(sequence);
        }
        is_current
    }
}

/// Sequence number of a live call. Dropping it, settled or not, stops the
/// call from superseding older ones.
struct Ticket<'a, T> {
    slot: &'a Mutex<Slot<T>>,
    sequence: u64,
}

impl<'a, T> Ticket<'a, T> {
    fn issue(slot: &'a Mutex<Slot<T>>) -> Self {
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.issued += 1;
        let sequence = guard.issued;
        guard.live.insert(sequence);
        Self { slot, sequence }
    }
}

impl<T> Drop for Ticket<'_, T> {
    fn drop(&mut self) {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .live
            .remove(&self.sequence);
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// One call site's gateway.
///
/// Calls on a gateway may overlap; the busy flag stays up until all of them
/// have settled or been dropped.
pub struct RequestGateway<T> {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    policy: StaleResponsePolicy,
    in_flight: AtomicUsize,
    slot: Mutex<Slot<T>>,
}

impl<T> RequestGateway<T>
where
    T: DeserializeOwned + Clone + Send,
{
    /// Creates a gateway with the default stale-response policy.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self::with_policy(transport, credentials, StaleResponsePolicy::default())
    }

    /// Creates a gateway with an explicit stale-response policy.
    #[must_use]
    pub fn with_policy(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        policy: StaleResponsePolicy,
    ) -> Self {
        Self {
            transport,
            credentials,
            policy,
            in_flight: AtomicUsize::new(0),
            slot: Mutex::new(Slot::new()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true while any call on this gateway is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Last stored outcome.
    #[must_use]
    pub fn last_outcome(&self) -> Option<RequestOutcome<T>> {
        self.slot().outcome.clone()
    }

    /// Error of the last stored outcome. Cleared by a later success.
    #[must_use]
    pub fn last_error(&self) -> Option<RequestError> {
        self.slot().error.clone()
    }

    /// Performs a call and returns its outcome.
    pub async fn request(&self, request: ApiRequest) -> RequestOutcome<T> {
        self.dispatch(request).await.outcome
    }

    /// Performs a call and returns its outcome, error, and whether it is
    /// still the newest call on this gateway.
    pub async fn dispatch(&self, request: ApiRequest) -> Settled<T> {
        let _busy = InFlight::enter(&self.in_flight);
        let ticket = Ticket::issue(&self.slot);
        let sequence = ticket.sequence;
        let request_id = Uuid::new_v4();
        let method = request.method();
        let path = request.path().to_string();

        debug!(%request_id, sequence, %method, %path, "dispatching request");

        let (outcome, error) = match request.into_wire(self.authorization()) {
            Ok(wire) => match self.transport.send(wire).await {
                Ok(response) => decode(&response),
                Err(err) => no_response(&err),
            },
            Err(message) => {
                warn!(%request_id, %path, error = %message, "request body could not be encoded");
                (
                    RequestOutcome::failed(NO_RESPONSE_STATUS),
                    Some(RequestError::without_response(message)),
                )
            }
        };

        match &error {
            None => debug!(%request_id, status = outcome.status, "request succeeded"),
            Some(err) => warn!(
                %request_id,
                %method,
                %path,
                status = err.code,
                error = %err.message,
                "request failed"
            ),
        }

        let is_current = self.store(sequence, &outcome, error.as_ref());
        if !is_current {
            debug!(%request_id, sequence, "discarding stale response");
        }

        Settled {
            outcome,
            error,
            is_current,
        }
    }

    fn authorization(&self) -> Option<String> {
        match self.credentials.get() {
            Ok(credential) => credential.map(|c| c.bearer()),
            Err(err) => {
                warn!(error = %err, "credential store unreadable; sending without credential");
                None
            }
        }
    }

    fn store(
        &self,
        sequence: u64,
        outcome: &RequestOutcome<T>,
        error: Option<&RequestError>,
    ) -> bool {
        let mut slot = self.slot();
        let is_current = slot.accept(sequence, self.policy);
        if is_current {
            slot.outcome = Some(outcome.clone());
            slot.error = error.cloned();
        }
        is_current
    }
}

fn decode<T: DeserializeOwned>(
    response: &WireResponse,
) -> (RequestOutcome<T>, Option<RequestError>) {
    let status = response.status;

    if !response.is_success() {
        let data = response
            .body
            .clone()
            .and_then(|body| serde_json::from_value(body).ok());
        return (
            RequestOutcome { data, status },
            Some(RequestError::from_response(response)),
        );
    }

    match response.body.clone().map(serde_json::from_value).transpose() {
        Ok(data) => (RequestOutcome { data, status }, None),
        Err(err) => (
            RequestOutcome::failed(status),
            Some(RequestError::undecodable(status, &err)),
        ),
    }
}

fn no_response<T>(err: &TransportError) -> (RequestOutcome<T>, Option<RequestError>) {
    (
        RequestOutcome::failed(NO_RESPONSE_STATUS),
        Some(RequestError::without_response(err.to_string())),
    )
}

/// The server's `message` or `error` string field.
fn server_message(body: Option<&Value>) -> Option<String> {
    let body = body?;
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

#[cfg(test)]
mod props;
