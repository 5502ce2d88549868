//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use vaultdash_client::MemoryCredentialStore;
use vaultdash_client::credentials::CredentialStore;
use vaultdash_client::transport::{Method, Transport, TransportError, WireRequest, WireResponse};
use vaultdash_core::routing::Navigator;

#[derive(Debug, Clone)]
enum Scripted {
    Respond {
        status: u16,
        body: Option<Value>,
        delay: Duration,
    },
    Fail {
        error: TransportError,
        delay: Duration,
    },
}

/// In-process transport answering from scripted responses.
///
/// Responses for one route are used in order; the last one repeats.
/// Unscripted routes answer 404.
#[derive(Default)]
pub struct FakeTransport {
    scripts: Mutex<HashMap<(String, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<WireRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry((method.as_str().to_string(), path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_after(method, path, Duration::ZERO, status, body);
    }

    pub fn respond_after(
        &self,
        method: Method,
        path: &str,
        delay: Duration,
        status: u16,
        body: Value,
    ) {
        self.push(
            method,
            path,
            Scripted::Respond {
                status,
                body: Some(body),
                delay,
            },
        );
    }

    pub fn respond_empty(&self, method: Method, path: &str, status: u16) {
        self.push(
            method,
            path,
            Scripted::Respond {
                status,
                body: None,
                delay: Duration::ZERO,
            },
        );
    }

    pub fn fail(&self, method: Method, path: &str, error: TransportError) {
        self.push(
            method,
            path,
            Scripted::Fail {
                error,
                delay: Duration::ZERO,
            },
        );
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    pub fn last_request(&self, path: &str) -> Option<WireRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|request| request.path == path)
    }

    fn next_script(&self, request: &WireRequest) -> Option<Scripted> {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(&(
            request.method.as_str().to_string(),
            request.path.clone(),
        ))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.next_script(&request);

        match scripted {
            Some(Scripted::Respond {
                status,
                body,
                delay,
            }) => {
                tokio::time::sleep(delay).await;
                Ok(WireResponse { status, body })
            }
            Some(Scripted::Fail { error, delay }) => {
                tokio::time::sleep(delay).await;
                Err(error)
            }
            None => Ok(WireResponse {
                status: 404,
                body: Some(json!({"message": "Not found"})),
            }),
        }
    }
}

/// A navigation side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCall {
    Replace(String),
    Reload(String),
    External(String),
}

/// Navigator that records every call.
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<NavCall>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<NavCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.calls.lock().unwrap().push(NavCall::Replace(path.to_string()));
    }

    fn reload(&self, path: &str) {
        self.calls.lock().unwrap().push(NavCall::Reload(path.to_string()));
    }

    fn open_external(&self, url: &str) {
        self.calls.lock().unwrap().push(NavCall::External(url.to_string()));
    }
}

/// A memory store already holding `token` for three hours.
pub fn signed_in(token: &str) -> Arc<MemoryCredentialStore> {
    let store = Arc::new(MemoryCredentialStore::new());
    store
        .store_token(token, chrono::Duration::hours(3))
        .unwrap();
    store
}

pub fn user_body() -> Value {
    json!({
        "user": {
            "_id": "u1",
            "firstName": "Ada",
            "lastName": "Obi",
            "dateOfBirth": "1990-01-01",
            "email": "ada@example.com",
            "phoneNumber": "+2347000000000",
            "address": {
                "street": "1 Marina",
                "city": "Lagos",
                "state": "Lagos",
                "country": "Nigeria",
                "zipCode": "100001"
            },
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }
    })
}

pub fn wallets_body() -> Value {
    json!({"wallets": [
        {"_id": "w-usd", "currency": "USD", "balance": 250},
        {"_id": "w-ngn", "currency": "NGN", "balance": 1_000_000}
    ]})
}

pub fn fx_page_body(page: u32, total_records: u64) -> Value {
    json!({
        "fxTransactions": [{
            "reference": format!("FX-{page}"),
            "sourceCurrency": "USD",
            "targetCurrency": "NGN",
            "sourceAmount": 100,
            "targetAmount": 150_000,
            "createdAt": "2025-03-01T10:00:00Z"
        }],
        "page": page,
        "numberOfRecordsPerPage": 10,
        "totalRecords": total_records,
        "totalPages": total_records.div_ceil(10)
    })
}
