//! EverShop Storefront - client-side session engine.
//!
//! This crate holds everything a storefront shell needs behind the UI:
//! catalog queries, the cart/wishlist/comparison containers, the checkout
//! state machine with its pricing calculator, order creation and history,
//! product reviews, and the mock account flows. State lives in a
//! [`session::StorefrontSession`] built at session start; each container
//! persists itself as JSON through a [`storage::StateStore`].
//!
//! There is no server here. "Network" operations (login, order placement,
//! wishlist sharing) are simulated with configurable latency and a
//! pluggable failure injector so shells behave like they would against a
//! flaky backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod comparison;
pub mod config;
pub mod error;
pub mod format;
mod ids;
pub mod models;
pub mod orders;
pub mod pricing;
pub mod reviews;
pub mod session;
pub mod sim;
pub mod storage;
pub mod wishlist;
