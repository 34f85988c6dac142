//! Domain models for the storefront session.
//!
//! These are the shapes that flow between the state containers and the
//! persistence layer. Catalog-facing types (products, reviews, orders)
//! live next to the module that owns them; the types here are shared by
//! several modules.

pub mod address;
pub mod payment;
pub mod user;

pub use address::Address;
pub use payment::{CardDetails, PaymentMethod, PaymentSummary};
pub use user::User;
