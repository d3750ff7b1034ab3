//! Live driver registry
//!
//! The registry tracks every driver currently reporting positions: a
//! concurrent table of driver records paired with a spatial index for
//! nearest-driver queries, plus a sweeper daemon that retires drivers
//! whose last report has gone stale. Each driver also carries a bounded
//! history of recent fixes, newest first.

mod spatial;
mod store;
mod sweeper;
mod types;

pub use spatial::{IndexEntry, RTreeIndex, SpatialIndex, POINT_MARGIN_DEG};
pub use store::DriverRegistry;
pub use sweeper::{ExpirySweeper, SweeperConfig, DEFAULT_SWEEP_INTERVAL_SECS};
pub use types::{
    Driver, DriverId, RegistryConfig, RegistryError, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_VALIDITY_WINDOW,
};
