//! Integration tests for the driver registry.
//!
//! These tests verify the complete tracking flow including:
//! - Registration, relocation, and removal through the public API
//! - Nearest-driver ordering checked against great-circle distances
//! - Background expiry sweeping with a live sweeper task
//! - Concurrent mixed workloads keeping both stores consistent
//!
//! Run with: `cargo test --test registry_integration`

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use geofleet::coord::{haversine_meters, Location};
use geofleet::registry::{
    DriverRegistry, ExpirySweeper, RegistryConfig, RegistryError, SweeperConfig,
};

// ============================================================================
// Test Fixtures
// ============================================================================

const QUERY_LAT: f64 = 42.876420;
const QUERY_LON: f64 = 74.588332;

fn query_point() -> Location {
    Location::new(QUERY_LAT, QUERY_LON)
}

/// Registers five drivers scattered around a few city blocks in Bishkek.
fn seed_fleet(registry: &DriverRegistry) {
    registry.set(1, Location::new(42.875799, 74.588279)).unwrap();
    registry.set(2, Location::new(42.875508, 74.588107)).unwrap();
    registry.set(3, Location::new(42.876106, 74.588204)).unwrap();
    registry.set(4, Location::new(42.874942, 74.585908)).unwrap();
    registry.set(5, Location::new(42.875744, 74.584503)).unwrap();
}

// ============================================================================
// Lifecycle Integration Tests
// ============================================================================

#[test]
fn test_full_driver_lifecycle() {
    let registry = DriverRegistry::new(RegistryConfig::default());
    let first_fix = Location::new(42.875799, 74.588279);
    let second_fix = Location::new(42.876106, 74.588204);

    registry.set(7, first_fix).unwrap();
    let driver = registry.get(7).unwrap();
    assert_eq!(driver.id, 7);
    assert_eq!(driver.last_location, first_fix);
    assert!(driver.expires_at.is_some());

    // Relocate and confirm the registry serves the new position
    registry.set(7, second_fix).unwrap();
    let driver = registry.get(7).unwrap();
    assert_eq!(driver.last_location, second_fix);
    assert_eq!(driver.history().len(), 2);

    let nearest = registry.nearest(query_point(), 1);
    assert_eq!(nearest.len(), 1);
    assert_eq!(nearest[0].id, 7);

    registry.delete(7).unwrap();
    assert_eq!(
        registry.get(7).unwrap_err(),
        RegistryError::NotFound { id: 7 }
    );
    assert!(registry.nearest(query_point(), 1).is_empty());
    assert!(registry.is_empty());
}

#[test]
fn test_nearest_ordering_matches_great_circle_distances() {
    let registry = DriverRegistry::new(RegistryConfig::default());
    seed_fleet(&registry);

    let drivers = registry.nearest(query_point(), 5);
    let ids: Vec<i64> = drivers.iter().map(|driver| driver.id).collect();
    assert_eq!(ids, vec![3, 1, 2, 4, 5]);

    let distances: Vec<f64> = drivers
        .iter()
        .map(|driver| haversine_meters(query_point(), driver.last_location))
        .collect();
    assert!(
        distances.windows(2).all(|pair| pair[0] <= pair[1]),
        "results must be ordered nearest first: {distances:?}"
    );
}

#[test]
fn test_history_window_tracks_recent_fixes() {
    let registry = DriverRegistry::new(RegistryConfig::new().with_history_capacity(3));
    let fixes = [
        Location::new(42.8701, 74.5801),
        Location::new(42.8702, 74.5802),
        Location::new(42.8703, 74.5803),
        Location::new(42.8704, 74.5804),
        Location::new(42.8705, 74.5805),
    ];

    for fix in fixes {
        registry.set(1, fix).unwrap();
        std::thread::sleep(Duration::from_millis(2));
    }

    let driver = registry.get(1).unwrap();
    assert_eq!(driver.last_location, fixes[4]);
    assert_eq!(driver.history().len(), 3);

    let (_, oldest) = driver.history().peek_oldest().unwrap();
    assert_eq!(*oldest, fixes[2], "only the three newest fixes remain");
}

// ============================================================================
// Sweeper Integration Tests
// ============================================================================

#[tokio::test]
async fn test_sweeper_purges_stale_drivers() {
    let registry = Arc::new(DriverRegistry::new(
        RegistryConfig::new().with_validity_window(Duration::from_millis(50)),
    ));
    seed_fleet(&registry);
    assert_eq!(registry.len(), 5);

    let sweeper = ExpirySweeper::new(
        Arc::clone(&registry),
        SweeperConfig::new().with_interval(Duration::from_millis(25)),
    )
    .unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(sweeper.run(shutdown.clone()));

    tokio::time::sleep(Duration::from_millis(250)).await;
    shutdown.cancel();
    handle.await.unwrap();

    assert_eq!(registry.len(), 0, "silent drivers must be swept");
    assert!(registry.nearest(query_point(), 10).is_empty());
}

#[tokio::test]
async fn test_sweeper_spares_drivers_that_keep_reporting() {
    let registry = Arc::new(DriverRegistry::new(
        RegistryConfig::new().with_validity_window(Duration::from_millis(500)),
    ));
    registry.set(1, Location::new(42.875799, 74.588279)).unwrap();
    registry.set(2, Location::new(42.875508, 74.588107)).unwrap();

    let sweeper = ExpirySweeper::new(
        Arc::clone(&registry),
        SweeperConfig::new().with_interval(Duration::from_millis(25)),
    )
    .unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(sweeper.run(shutdown.clone()));

    // Driver 1 keeps reporting while driver 2 goes quiet
    for _ in 0..12 {
        registry.set(1, Location::new(42.875799, 74.588279)).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    shutdown.cancel();
    handle.await.unwrap();

    assert!(registry.get(1).is_ok(), "reporting driver must survive");
    assert_eq!(
        registry.get(2).unwrap_err(),
        RegistryError::NotFound { id: 2 }
    );
}

// ============================================================================
// Concurrency Integration Tests
// ============================================================================

#[test]
fn test_concurrent_mixed_workload_keeps_stores_consistent() {
    let registry = Arc::new(DriverRegistry::new(RegistryConfig::default()));
    let mut handles = Vec::new();

    // Four writers registering disjoint id ranges
    for t in 0..4i64 {
        let registry = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            for i in 0..25i64 {
                let id = t * 1000 + i;
                let location = Location::new(42.87 + id as f64 * 1e-4, 74.58);
                registry.set(id, location).unwrap();
            }
        }));
    }

    // A deleter racing over the first writer's range
    {
        let registry = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            for id in 0..25i64 {
                match registry.delete(id) {
                    Ok(()) | Err(RegistryError::NotFound { .. }) => {}
                    Err(err) => panic!("unexpected delete failure: {err}"),
                }
            }
        }));
    }

    // A reader hammering nearest queries meanwhile
    {
        let registry = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            for _ in 0..200 {
                let _ = registry.nearest(Location::new(42.87, 74.58), 10);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // The table and the index agree on the survivors
    let live = registry.len();
    let indexed = registry.nearest(Location::new(42.87, 74.58), 1000).len();
    assert_eq!(live, indexed);

    // Ranges untouched by the deleter are fully present
    for t in 1..4i64 {
        for i in 0..25i64 {
            assert!(registry.get(t * 1000 + i).is_ok());
        }
    }
}
