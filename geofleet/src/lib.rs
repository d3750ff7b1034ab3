//! GeoFleet - Live driver-position tracking
//!
//! This library provides the core functionality for tracking a fleet of
//! drivers in real time: accepting position reports, answering
//! nearest-driver queries, and expiring drivers that stop reporting.
//!
//! # High-Level API
//!
//! For most use cases, build a [`registry::DriverRegistry`], start an
//! [`registry::ExpirySweeper`], and serve the registry over HTTP:
//!
//! ```ignore
//! use geofleet::api;
//! use geofleet::registry::{DriverRegistry, RegistryConfig};
//!
//! let registry = Arc::new(DriverRegistry::new(RegistryConfig::default()));
//! api::serve(bind_addr, registry, shutdown.cancelled_owned()).await?;
//! ```

pub mod api;
pub mod cache;
pub mod coord;
pub mod logging;
pub mod registry;

/// Version of the geofleet library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
