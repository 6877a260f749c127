//! HTTP implementations of the publisher's network collaborators.
//!
//! - [`LrsClient`] posts statements to an xAPI record store.
//! - [`HttpLocationService`] discovers the public IP and geolocates it.

mod geo;
mod lrs;

pub use geo::{HttpLocationService, ServiceUrls};
pub use lrs::{LrsClient, LrsConfig, XAPI_VERSION, XAPI_VERSION_HEADER};

#[cfg(test)]
mod tests;
