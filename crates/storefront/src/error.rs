//! Unified error handling.
//!
//! Provides a `StorefrontError` that every flow error converts into, plus
//! a `Result` alias. Shells (the CLI, integration tests) can bubble any
//! engine error through one type; the per-service enums remain the
//! precise API for callers that match on causes.

use evershop_core::EmailError;
use thiserror::Error;

use crate::account::AccountError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::orders::OrderError;
use crate::storage::StorageError;

/// Application-level error type for the storefront engine.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Checkout progression failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order placement failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Account flow failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Email validation failed.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// Persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
