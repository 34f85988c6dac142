//! CLI command implementations.

pub mod orders;
pub mod products;
pub mod quote;
pub mod state;
