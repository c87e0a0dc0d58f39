use std::sync::Arc;

use crate::atlas::{LocationId, RoadAtlas};

/// Directed half of an undirected road segment, as stored in the adjacency
/// table. The road name is shared between both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    pub target: LocationId,
    pub miles: f64,
    pub speed_limit: f64,
    pub road_name: Arc<str>,
}

/// Adjacency over interned location indices. Every interned location has a
/// row, even when nothing connects to it.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    adjacency: Vec<Vec<RoadEdge>>,
}

impl RoadGraph {
    /// Return the outgoing half-edges for a location.
    pub fn neighbours(&self, location: LocationId) -> &[RoadEdge] {
        self.adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Locate the edge between two adjacent locations; parallel edges
    /// resolve to the shortest one.
    pub fn edge_between(&self, from: LocationId, to: LocationId) -> Option<&RoadEdge> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .min_by(|a, b| a.miles.total_cmp(&b.miles))
    }
}

/// Build the symmetric road graph from the atlas's raw segment records.
/// Self-loop records are kept as a single adjacency entry; parallel records
/// between the same pair all survive.
pub fn build_road_graph(atlas: &RoadAtlas) -> RoadGraph {
    let mut adjacency: Vec<Vec<RoadEdge>> = vec![Vec::new(); atlas.location_count()];
    for record in atlas.segments() {
        let road_name: Arc<str> = Arc::from(record.road_name.as_str());
        adjacency[record.a].push(RoadEdge {
            target: record.b,
            miles: record.miles,
            speed_limit: record.speed_limit,
            road_name: Arc::clone(&road_name),
        });
        if record.a != record.b {
            adjacency[record.b].push(RoadEdge {
                target: record.a,
                miles: record.miles,
                speed_limit: record.speed_limit,
                road_name,
            });
        }
    }
    RoadGraph { adjacency }
}
