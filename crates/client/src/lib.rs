//! API client for Vaultdash.
//!
//! This crate connects the pure state machines of `vaultdash-core` to the
//! remote API.
//!
//! # Modules
//!
//! - `transport` - Wire transport trait and the reqwest implementation
//! - `credentials` - Bearer credential stores
//! - `gateway` - Per-call-site request gateway
//! - `models` - API response bodies
//! - `session` - Session controller publishing the auth state
//! - `collection` - Paginated list fetchers
//! - `exchange` - Quote/execute session
//! - `auth` - Login and registration
//! - `wallets` - Wallet list, creation, and funding
//! - `cards` - Virtual card operations
//! - `dashboard` - Wiring of all of the above
//! - `error` - User-facing client errors

pub mod auth;
pub mod cards;
pub mod collection;
pub mod credentials;
pub mod dashboard;
pub mod error;
pub mod exchange;
pub mod gateway;
pub mod models;
pub mod session;
pub mod transport;
pub mod wallets;

pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use dashboard::Dashboard;
pub use error::ClientError;
pub use exchange::{ExchangeSession, RefreshTrigger};
pub use gateway::{ApiRequest, RequestError, RequestGateway, RequestOutcome};
pub use session::SessionController;
pub use transport::{HttpTransport, Transport};
