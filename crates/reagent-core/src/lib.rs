//! Core types and logic for the Reagent chemical inventory.
//!
//! This crate is free of HTTP, database and async-runtime dependencies. The
//! storage backend and the API layer depend on it; it depends on nothing
//! proprietary.

// Native `async fn` in traits; the returned futures are bounded explicitly.
#![allow(async_fn_in_trait)]

pub mod chemical;
pub mod error;
pub mod form;
pub mod inventory;
pub mod lookup;
pub mod notification;
pub mod query;
pub mod role;
pub mod seed;
pub mod simulator;
pub mod status;
pub mod store;
pub mod warning;

pub use error::{Error, Result};
