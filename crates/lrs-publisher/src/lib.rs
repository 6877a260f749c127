//! Statement assembly and delivery.
//!
//! Identity comes from the preference snapshot, location from a resolver
//! started eagerly at construction, device metadata from the environment.
//! [`Publisher`] ties them together with a [`Dispatcher`] over any
//! [`StatementTransport`](lrs_core::transport::StatementTransport).

pub mod builder;
pub mod cache;
pub mod dispatcher;
pub mod location;
pub mod publisher;

pub use builder::{StatementBuilder, StatementParts};
pub use cache::LocationCache;
pub use dispatcher::{DeliveryReport, Dispatcher};
pub use location::{LocationHandle, LocationResolver};
pub use publisher::Publisher;
