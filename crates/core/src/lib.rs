//! EverShop Core - Shared types library.
//!
//! This crate provides common types used across all EverShop components:
//! - `storefront` - Session engine for the client-side store
//! - `cli` - Command-line tools for inspecting persisted session state
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! storage access, no async. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, money rounding,
//!   and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
