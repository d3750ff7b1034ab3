//! Expiry sweeper daemon
//!
//! Periodically removes drivers whose validity deadline has passed. Runs
//! as a background task alongside the HTTP server and stops cleanly when
//! the shutdown token fires.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::registry::spatial::{RTreeIndex, SpatialIndex};
use crate::registry::store::DriverRegistry;
use crate::registry::types::RegistryError;

/// Default pause between sweep passes.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 1;

/// Tuning knobs for the expiry sweeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweeperConfig {
    /// Pause between sweep passes.
    pub interval: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl SweeperConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pause between sweep passes.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Background task that sweeps expired drivers out of a registry.
pub struct ExpirySweeper<I: SpatialIndex = RTreeIndex> {
    registry: Arc<DriverRegistry<I>>,
    config: SweeperConfig,
}

impl<I: SpatialIndex> ExpirySweeper<I> {
    /// Creates a sweeper for `registry`.
    ///
    /// Fails with [`RegistryError::ZeroSweepInterval`] when the configured
    /// interval is zero, which would spin the sweep loop.
    pub fn new(
        registry: Arc<DriverRegistry<I>>,
        config: SweeperConfig,
    ) -> Result<Self, RegistryError> {
        if config.interval.is_zero() {
            return Err(RegistryError::ZeroSweepInterval);
        }
        Ok(Self { registry, config })
    }

    /// Runs sweep passes until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            "Expiry sweeper started (interval: {}ms)",
            self.config.interval.as_millis()
        );

        let mut interval = tokio::time::interval(self.config.interval);
        interval.tick().await; // Skip the first immediate tick

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Expiry sweeper stopping");
                    break;
                }

                _ = interval.tick() => {
                    let removed = self.registry.delete_expired();
                    if removed > 0 {
                        info!("Removed {} expired drivers", removed);
                    } else {
                        debug!("Sweep pass found no expired drivers");
                    }
                }
            }
        }
    }
}
