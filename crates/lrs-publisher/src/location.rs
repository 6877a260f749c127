//! Eager, shared resolution of the caller's location.
//!
//! [`LocationResolver::new`] starts the two-stage lookup (IP discovery, then
//! geolocation of that IP) straight away on the tokio runtime. Statement
//! builds that need the location await the same shared result instead of
//! re-triggering the lookup.

use std::sync::{Arc, Mutex, PoisonError};

use futures::{
  FutureExt,
  future::{BoxFuture, Shared},
};
use lrs_core::{
  LocationError,
  location::{Location, LocationService},
};
use tracing::{debug, info, warn};

use crate::cache::LocationCache;

/// A started resolution. Cheap to clone; every clone observes the same
/// outcome.
#[derive(Clone)]
pub struct LocationHandle {
  inner: Shared<BoxFuture<'static, Result<Location, LocationError>>>,
}

impl LocationHandle {
  /// Wait for the resolution to finish.
  pub async fn get(self) -> Result<Location, LocationError> { self.inner.await }

  fn same_as(&self, other: &Self) -> bool { self.inner.ptr_eq(&other.inner) }
}

pub struct LocationResolver<L> {
  service: Arc<L>,
  cache:   Arc<LocationCache>,
  handle:  Mutex<LocationHandle>,
}

impl<L> LocationResolver<L>
where
  L: LocationService + 'static,
{
  /// Create a resolver and start resolving immediately.
  ///
  /// Inside a tokio runtime the lookup is spawned as its own task. Outside
  /// one it runs on first [`get`](Self::get).
  pub fn new(service: Arc<L>, cache: Arc<LocationCache>) -> Self {
    let handle = start(Arc::clone(&service), Arc::clone(&cache));
    Self { service, cache, handle: Mutex::new(handle) }
  }

  /// The current resolution.
  pub fn handle(&self) -> LocationHandle {
    self
      .handle
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Await the shared resolution.
  ///
  /// A failure is returned to this caller and then forgotten: the next call
  /// starts a fresh resolution, which may still find the cache filled by some
  /// other publisher.
  pub async fn get(&self) -> Result<Location, LocationError> {
    let handle = self.handle();
    let result = handle.clone().get().await;

    if result.is_err() {
      let mut current =
        self.handle.lock().unwrap_or_else(PoisonError::into_inner);
      if current.same_as(&handle) {
        *current = start(Arc::clone(&self.service), Arc::clone(&self.cache));
      }
    }
    result
  }

  /// Run the two-stage lookup now, against the shared cache, bypassing the
  /// resolver's own handle.
  pub async fn resolve(&self) -> Result<Location, LocationError> {
    resolve(self.service.as_ref(), &self.cache).await
  }
}

fn start<L>(service: Arc<L>, cache: Arc<LocationCache>) -> LocationHandle
where
  L: LocationService + 'static,
{
  let lookup = async move { resolve(service.as_ref(), &cache).await };

  let inner = match tokio::runtime::Handle::try_current() {
    Ok(runtime) => {
      let task = runtime.spawn(lookup);
      async move { task.await.unwrap_or(Err(LocationError::Aborted)) }.boxed()
    }
    Err(_) => lookup.boxed(),
  };

  LocationHandle { inner: inner.shared() }
}

async fn resolve<L>(
  service: &L,
  cache: &LocationCache,
) -> Result<Location, LocationError>
where
  L: LocationService,
{
  let ip = service.public_ip().await.inspect_err(|e| {
    warn!(error = %e, "ip discovery failed");
  })?;
  let ip = ip.trim();
  if ip.is_empty() {
    warn!("ip discovery returned an empty body");
    return Err(LocationError::EmptyIp);
  }
  debug!(%ip, "discovered public ip");

  cache
    .get_or_try_insert_with(|| async {
      let location = service.geolocate(ip).await.inspect_err(|e| {
        warn!(%ip, error = %e, "geolocation failed");
      })?;
      info!(
        country = location.country.as_deref().unwrap_or(""),
        city = location.city.as_deref().unwrap_or(""),
        "resolved location"
      );
      Ok::<_, LocationError>(location)
    })
    .await
}
