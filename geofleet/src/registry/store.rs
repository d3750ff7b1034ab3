//! Driver store
//!
//! Thread-safe registry pairing a driver table with a spatial index. Both
//! structures sit behind a single lock, so every operation observes them
//! in agreement: a driver is either present in both or in neither.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

use tracing::warn;

use crate::coord::Location;
use crate::registry::spatial::{IndexEntry, RTreeIndex, SpatialIndex};
use crate::registry::types::{Driver, DriverId, RegistryConfig, RegistryError};

/// Both halves of the registry state, guarded together.
struct RegistryInner<I> {
    drivers: HashMap<DriverId, Driver>,
    index: I,
}

/// Concurrent registry of live driver positions.
///
/// Lookups (`get`, `nearest`, `len`) share a read lock; mutations (`set`,
/// `delete`, `delete_expired`) take the write lock. Snapshots returned to
/// callers are clones and never borrow the locked state.
pub struct DriverRegistry<I: SpatialIndex = RTreeIndex> {
    config: RegistryConfig,
    inner: RwLock<RegistryInner<I>>,
}

impl DriverRegistry {
    /// Creates a registry backed by an R-tree index.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_index(config, RTreeIndex::new())
    }
}

impl<I: SpatialIndex> DriverRegistry<I> {
    /// Creates a registry backed by the given spatial index.
    pub fn with_index(config: RegistryConfig, index: I) -> Self {
        Self {
            config,
            inner: RwLock::new(RegistryInner {
                drivers: HashMap::new(),
                index,
            }),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers or refreshes a driver at `location`.
    ///
    /// Stamps a fresh validity deadline, records the fix in the driver's
    /// history, and reindexes the driver when the position moved.
    pub fn set(&self, id: DriverId, location: Location) -> Result<(), RegistryError> {
        let now = Instant::now();
        let deadline = Some(now + self.config.validity_window);

        let mut guard = self.inner.write().expect("registry lock poisoned");
        let inner = &mut *guard;

        match inner.drivers.get_mut(&id) {
            Some(driver) => {
                if driver.last_location != location {
                    let previous = IndexEntry::new(id, driver.last_location);
                    if !inner.index.remove(&previous) {
                        warn!("driver {} was missing from the spatial index", id);
                    }
                    inner.index.insert(IndexEntry::new(id, location));
                    driver.last_location = location;
                }
                driver.expires_at = deadline;
                driver.history.put(now, location);
            }
            None => {
                let driver =
                    Driver::new(id, location, now, deadline, self.config.history_capacity)?;
                inner.drivers.insert(id, driver);
                inner.index.insert(IndexEntry::new(id, location));
            }
        }
        Ok(())
    }

    /// Looks up a driver, returning a point-in-time snapshot.
    pub fn get(&self, id: DriverId) -> Result<Driver, RegistryError> {
        let guard = self.inner.read().expect("registry lock poisoned");
        guard
            .drivers
            .get(&id)
            .cloned()
            .ok_or(RegistryError::NotFound { id })
    }

    /// Unregisters a driver.
    ///
    /// The index entry goes first; if the index refuses, the driver stays
    /// fully registered and the call fails with
    /// [`RegistryError::IndexRemoval`].
    pub fn delete(&self, id: DriverId) -> Result<(), RegistryError> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let inner = &mut *guard;

        let driver = inner
            .drivers
            .get(&id)
            .ok_or(RegistryError::NotFound { id })?;
        let entry = IndexEntry::new(id, driver.last_location);

        if !inner.index.remove(&entry) {
            return Err(RegistryError::IndexRemoval { id });
        }
        inner.drivers.remove(&id);
        Ok(())
    }

    /// Returns up to `count` live drivers ordered by ascending distance
    /// from `origin`.
    pub fn nearest(&self, origin: Location, count: usize) -> Vec<Driver> {
        if count == 0 {
            return Vec::new();
        }
        let guard = self.inner.read().expect("registry lock poisoned");
        guard
            .index
            .nearest(origin, count)
            .into_iter()
            .filter_map(|entry| guard.drivers.get(&entry.id).cloned())
            .collect()
    }

    /// Sweeps out every driver whose validity deadline has passed,
    /// returning how many were removed.
    ///
    /// Drivers without a deadline are never swept.
    pub fn delete_expired(&self) -> usize {
        let now = Instant::now();
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let inner = &mut *guard;

        let expired: Vec<DriverId> = inner
            .drivers
            .values()
            .filter(|driver| driver.is_expired(now))
            .map(|driver| driver.id)
            .collect();

        for id in &expired {
            if let Some(driver) = inner.drivers.remove(id) {
                let entry = IndexEntry::new(*id, driver.last_location);
                if !inner.index.remove(&entry) {
                    warn!("expired driver {} had no index entry", id);
                }
            }
        }
        expired.len()
    }

    /// Number of registered drivers.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("registry lock poisoned")
            .drivers
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
