//! Spatial indexing of driver positions
//!
//! Wraps an R-tree keyed on latitude/longitude so the registry can answer
//! nearest-driver queries without scanning the whole fleet. The index
//! stores one entry per driver and is swapped out during tests through the
//! [`SpatialIndex`] trait.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::coord::Location;
use crate::registry::types::DriverId;

/// Half-width in degrees of the bounding box indexed around each fix.
pub const POINT_MARGIN_DEG: f64 = 0.01;

/// A driver's entry in the spatial index: identity plus the fix it was
/// indexed under.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry {
    pub id: DriverId,
    pub location: Location,
}

impl IndexEntry {
    pub fn new(id: DriverId, location: Location) -> Self {
        Self { id, location }
    }
}

// Identity alone decides equality; the index never holds two entries for
// one driver, and removal probes carry the fix the entry was indexed under.
impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [
                self.location.lat - POINT_MARGIN_DEG,
                self.location.lon - POINT_MARGIN_DEG,
            ],
            [
                self.location.lat + POINT_MARGIN_DEG,
                self.location.lon + POINT_MARGIN_DEG,
            ],
        )
    }
}

impl PointDistance for IndexEntry {
    // Distance to the fix itself, not the padded box, so neighbor
    // ordering stays exact even when boxes overlap the query.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.location.lat - point[0];
        let dlon = self.location.lon - point[1];
        dlat * dlat + dlon * dlon
    }
}

/// Index of driver positions supporting nearest-neighbor lookup.
///
/// Implementations are not internally synchronized; the registry guards
/// its index behind the same lock as the driver table.
pub trait SpatialIndex: Send + Sync {
    /// Adds an entry. The caller drops any previous entry for the same
    /// driver first.
    fn insert(&mut self, entry: IndexEntry);

    /// Removes the entry matching `entry`, returning whether one was found.
    fn remove(&mut self, entry: &IndexEntry) -> bool;

    /// Returns up to `count` entries ordered by ascending distance from
    /// `origin`.
    fn nearest(&self, origin: Location, count: usize) -> Vec<IndexEntry>;

    /// Number of indexed entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// R-tree backed spatial index, the default for production registries.
#[derive(Debug, Default)]
pub struct RTreeIndex {
    tree: RTree<IndexEntry>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for RTreeIndex {
    fn insert(&mut self, entry: IndexEntry) {
        self.tree.insert(entry);
    }

    fn remove(&mut self, entry: &IndexEntry) -> bool {
        self.tree.remove(entry).is_some()
    }

    fn nearest(&self, origin: Location, count: usize) -> Vec<IndexEntry> {
        if count == 0 {
            return Vec::new();
        }
        self.tree
            .nearest_neighbor_iter(&[origin.lat, origin.lon])
            .take(count)
            .copied()
            .collect()
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstar::Envelope;

    /// Five drivers scattered around a few city blocks in Bishkek.
    fn bishkek_fleet() -> Vec<IndexEntry> {
        vec![
            IndexEntry::new(1, Location::new(42.875799, 74.588279)),
            IndexEntry::new(2, Location::new(42.875508, 74.588107)),
            IndexEntry::new(3, Location::new(42.876106, 74.588204)),
            IndexEntry::new(4, Location::new(42.874942, 74.585908)),
            IndexEntry::new(5, Location::new(42.875744, 74.584503)),
        ]
    }

    fn query_point() -> Location {
        Location::new(42.876420, 74.588332)
    }

    // =========================================================================
    // Entry semantics
    // =========================================================================

    #[test]
    fn test_equality_ignores_location() {
        let a = IndexEntry::new(9, Location::new(1.0, 2.0));
        let b = IndexEntry::new(9, Location::new(3.0, 4.0));
        let c = IndexEntry::new(10, Location::new(1.0, 2.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_envelope_pads_the_fix() {
        let entry = IndexEntry::new(1, Location::new(10.0, 20.0));
        let envelope = entry.envelope();

        assert_eq!(envelope.lower(), [10.0 - POINT_MARGIN_DEG, 20.0 - POINT_MARGIN_DEG]);
        assert_eq!(envelope.upper(), [10.0 + POINT_MARGIN_DEG, 20.0 + POINT_MARGIN_DEG]);
        assert!(envelope.contains_point(&[10.0, 20.0]));
    }

    // =========================================================================
    // Insertion and removal
    // =========================================================================

    #[test]
    fn test_insert_grows_the_index() {
        let mut index = RTreeIndex::new();
        assert!(index.is_empty());

        for entry in bishkek_fleet() {
            index.insert(entry);
        }
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_remove_is_single_shot() {
        let mut index = RTreeIndex::new();
        let entry = IndexEntry::new(1, Location::new(42.875799, 74.588279));
        index.insert(entry);

        assert!(index.remove(&entry));
        assert!(!index.remove(&entry));
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove_needs_the_indexed_fix() {
        let mut index = RTreeIndex::new();
        index.insert(IndexEntry::new(1, Location::new(10.0, 20.0)));

        // A probe far from the indexed fix never finds the entry
        let elsewhere = IndexEntry::new(1, Location::new(50.0, 60.0));
        assert!(!index.remove(&elsewhere));
        assert_eq!(index.len(), 1);
    }

    // =========================================================================
    // Nearest lookup
    // =========================================================================

    #[test]
    fn test_nearest_orders_by_ascending_distance() {
        let mut index = RTreeIndex::new();
        for entry in bishkek_fleet() {
            index.insert(entry);
        }

        let hits = index.nearest(query_point(), 3);
        let ids: Vec<_> = hits.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_nearest_zero_count_is_empty() {
        let mut index = RTreeIndex::new();
        assert!(index.nearest(query_point(), 0).is_empty());

        index.insert(IndexEntry::new(1, Location::new(42.875799, 74.588279)));
        assert!(index.nearest(query_point(), 0).is_empty());
    }

    #[test]
    fn test_nearest_count_beyond_len_returns_all() {
        let mut index = RTreeIndex::new();
        for entry in bishkek_fleet() {
            index.insert(entry);
        }

        let hits = index.nearest(query_point(), 50);
        let ids: Vec<_> = hits.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4, 5]);
    }
}
