//! Shared types, errors, and configuration for Vaultdash.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and decimal amounts
//! - Typed string IDs for server-issued references
//! - The server-reported page window for list endpoints
//! - The bearer credential
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::Credential;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
