use std::collections::HashMap;

use crate::atlas::{LocationId, RoadAtlas};

/// Memoized straight-line distances between unordered location pairs.
///
/// One instance is shared across a whole search so repeated heuristic
/// evaluations of the same pair avoid recomputation. Either endpoint lacking
/// a position makes the distance 0.0, degrading the heuristic for that pair
/// instead of failing.
#[derive(Debug, Default)]
pub struct DistanceCache {
    values: HashMap<(LocationId, LocationId), f64>,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Straight-line distance between `a` and `b`, memoized per unordered
    /// pair so `(a, b)` and `(b, a)` share an entry.
    pub fn distance_between(&mut self, atlas: &RoadAtlas, a: LocationId, b: LocationId) -> f64 {
        let (Some(pos_a), Some(pos_b)) = (atlas.position(a), atlas.position(b)) else {
            return 0.0;
        };
        let key = if a <= b { (a, b) } else { (b, a) };
        *self
            .values
            .entry(key)
            .or_insert_with(|| pos_a.distance_to(&pos_b))
    }

    /// Number of memoized pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Position;

    fn fixture_atlas() -> RoadAtlas {
        let mut atlas = RoadAtlas::new();
        atlas.set_position(
            "Alpha",
            Position {
                latitude: 0.0,
                longitude: 0.0,
            },
        );
        atlas.set_position(
            "Beta",
            Position {
                latitude: 3.0,
                longitude: 4.0,
            },
        );
        atlas.intern("NoCoords");
        atlas
    }

    #[test]
    fn distance_is_planar_euclidean() {
        let atlas = fixture_atlas();
        let mut cache = DistanceCache::new();
        let alpha = atlas.location_id("Alpha").unwrap();
        let beta = atlas.location_id("Beta").unwrap();

        assert_eq!(cache.distance_between(&atlas, alpha, beta), 5.0);
    }

    #[test]
    fn unordered_pair_shares_one_entry() {
        let atlas = fixture_atlas();
        let mut cache = DistanceCache::new();
        let alpha = atlas.location_id("Alpha").unwrap();
        let beta = atlas.location_id("Beta").unwrap();

        let forward = cache.distance_between(&atlas, alpha, beta);
        let backward = cache.distance_between(&atlas, beta, alpha);
        assert_eq!(forward, backward);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_position_degrades_to_zero() {
        let atlas = fixture_atlas();
        let mut cache = DistanceCache::new();
        let alpha = atlas.location_id("Alpha").unwrap();
        let unknown = atlas.location_id("NoCoords").unwrap();

        assert_eq!(cache.distance_between(&atlas, alpha, unknown), 0.0);
        assert!(cache.is_empty(), "unknown pairs are not memoized");
    }

    #[test]
    fn same_location_distance_is_zero() {
        let atlas = fixture_atlas();
        let mut cache = DistanceCache::new();
        let alpha = atlas.location_id("Alpha").unwrap();

        assert_eq!(cache.distance_between(&atlas, alpha, alpha), 0.0);
    }
}
