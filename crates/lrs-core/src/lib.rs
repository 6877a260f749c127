//! Core types and trait definitions for the LRS statement publisher.
//!
//! This crate is deliberately free of HTTP and runtime dependencies. It holds
//! the xAPI statement model, the identity policy, the preference snapshot,
//! and the traits through which the publisher reaches its collaborators
//! (preference store, environment, location service, statement transport).

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod environment;
pub mod error;
pub mod identity;
pub mod location;
pub mod preferences;
pub mod statement;
pub mod transport;

pub use error::{ConfigurationError, DeliveryError, Error, LocationError, Result};
