//! Process-wide location cache.

use std::{
  future::Future,
  sync::{Arc, LazyLock},
};

use lrs_core::{LocationError, location::Location};
use tokio::sync::OnceCell;

static GLOBAL: LazyLock<Arc<LocationCache>> =
  LazyLock::new(|| Arc::new(LocationCache::new()));

/// Holds "this process's current location": a single entry, empty at start,
/// filled at most once, never refreshed.
///
/// Filling is single-flight. The first caller runs the lookup; concurrent
/// callers wait for it and observe its value. A failed lookup leaves the cache
/// empty, so the next caller performs its own.
#[derive(Debug, Default)]
pub struct LocationCache {
  cell: OnceCell<Location>,
}

impl LocationCache {
  pub fn new() -> Self { Self::default() }

  /// The cache shared by every publisher in the process.
  pub fn global() -> Arc<Self> { Arc::clone(&GLOBAL) }

  pub fn get(&self) -> Option<Location> { self.cell.get().cloned() }

  /// Return the cached location, or run `lookup` and insert its result if the
  /// cache is still empty when it completes.
  pub async fn get_or_try_insert_with<F, Fut>(
    &self,
    lookup: F,
  ) -> Result<Location, LocationError>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Location, LocationError>>,
  {
    self.cell.get_or_try_init(lookup).await.cloned()
  }
}
