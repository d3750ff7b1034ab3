//! Registry type definitions
//!
//! Core data types shared by the driver store, the spatial index, and the
//! expiry sweeper.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::cache::{CacheError, RecencyCache};
use crate::coord::Location;

/// Unique driver identifier.
pub type DriverId = i64;

/// Default number of location fixes kept per driver.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Default window during which a reported location counts as live.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(15);

/// Errors surfaced by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The driver is not currently registered.
    #[error("driver {id} does not exist")]
    NotFound { id: DriverId },

    /// The spatial index refused to drop the driver's entry; the driver
    /// was left registered so the two stores stay consistent.
    #[error("driver {id} could not be removed from the spatial index")]
    IndexRemoval { id: DriverId },

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The sweeper cannot run with a zero interval.
    #[error("sweep interval must be greater than zero")]
    ZeroSweepInterval,
}

/// Tuning knobs for a [`DriverRegistry`](crate::registry::DriverRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Location fixes retained per driver before the oldest is dropped.
    pub history_capacity: usize,
    /// How long a reported location stays live before the sweeper may
    /// remove the driver.
    pub validity_window: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            validity_window: DEFAULT_VALIDITY_WINDOW,
        }
    }
}

impl RegistryConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many location fixes each driver retains.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Sets how long a reported location counts as live.
    pub fn with_validity_window(mut self, window: Duration) -> Self {
        self.validity_window = window;
        self
    }
}

/// A registered driver: identity, latest fix, validity deadline, and a
/// bounded trail of recent fixes.
#[derive(Debug, Clone)]
pub struct Driver {
    /// Stable identifier, unique within the registry.
    pub id: DriverId,
    /// Most recently reported position.
    pub last_location: Location,
    /// Deadline after which the sweeper may remove the driver. `None`
    /// exempts the driver from expiry.
    pub expires_at: Option<Instant>,
    pub(crate) history: RecencyCache<Instant, Location>,
}

impl Driver {
    /// Creates a driver with its first location fix already recorded.
    pub(crate) fn new(
        id: DriverId,
        location: Location,
        recorded_at: Instant,
        expires_at: Option<Instant>,
        history_capacity: usize,
    ) -> Result<Self, CacheError> {
        let mut history = RecencyCache::new(history_capacity)?;
        history.put(recorded_at, location);
        Ok(Self {
            id,
            last_location: location,
            expires_at,
            history,
        })
    }

    /// The driver's recent location fixes, keyed by report time.
    pub fn history(&self) -> &RecencyCache<Instant, Location> {
        &self.history
    }

    /// Whether the validity deadline has passed at `now`. Drivers with
    /// no deadline never expire.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline < now)
    }
}
