//! Core client logic for Vaultdash.
//!
//! This crate contains the client state machines with ZERO transport dependencies.
//! Everything here is driven by explicit events so it can be tested without a UI.
//!
//! # Modules
//!
//! - `pagination` - Page window arithmetic and the pager state machine
//! - `routing` - Route classification and the route gate
//! - `session` - Auth state published by the session controller
//! - `exchange` - Quote validation, the quote/execute state machine, rate display

pub mod exchange;
pub mod pagination;
pub mod routing;
pub mod session;
