use serde::Serialize;
use tracing::debug;

use crate::atlas::{LocationId, RoadAtlas};
use crate::cost::CostMode;
use crate::error::{Error, Result};
use crate::graph::build_road_graph;
use crate::search::{find_route, SearchContext};

/// High-level route request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub mode: CostMode,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>, mode: CostMode) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            mode,
        }
    }
}

/// One traversed segment of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteLeg {
    pub next: LocationId,
    pub road_name: String,
    pub miles: f64,
}

/// Planned route returned by the library. `steps` starts at the start
/// location; `legs` describe each traversal after it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoutePlan {
    pub mode: CostMode,
    pub start: LocationId,
    pub goal: LocationId,
    pub steps: Vec<LocationId>,
    pub legs: Vec<RouteLeg>,
    pub total_segments: usize,
    pub total_miles: f64,
    pub total_hours: f64,
    pub total_delivery_hours: f64,
}

/// Resolve a location name to its id, attaching fuzzy suggestions on miss.
fn resolve_location(atlas: &RoadAtlas, name: &str) -> Result<LocationId> {
    atlas.location_id(name).ok_or_else(|| {
        let suggestions = atlas.fuzzy_matches(name, 3);
        Error::UnknownLocation {
            name: name.to_string(),
            suggestions,
        }
    })
}

/// Compute a route using the requested cost mode.
///
/// 1. Resolves the start and goal names against the atlas
/// 2. Validates the goal against the coordinate index
/// 3. Builds the road graph and a fresh search context
/// 4. Runs the best-first engine and assembles the plan
pub fn plan_route(atlas: &RoadAtlas, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_location(atlas, &request.start)?;
    let goal = resolve_location(atlas, &request.goal)?;

    if atlas.position(goal).is_none() {
        return Err(Error::UnknownGoal {
            name: request.goal.clone(),
        });
    }

    let graph = build_road_graph(atlas);
    let mut ctx = SearchContext::new(atlas, &graph);

    let trace =
        find_route(&mut ctx, start, goal, request.mode).ok_or_else(|| Error::RouteNotFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        })?;

    let mut legs = Vec::with_capacity(trace.total_segments);
    for pair in trace.steps.windows(2) {
        let edge = graph
            .edge_between(pair[0], pair[1])
            .ok_or_else(|| Error::RouteNotFound {
                start: request.start.clone(),
                goal: request.goal.clone(),
            })?;
        legs.push(RouteLeg {
            next: pair[1],
            road_name: edge.road_name.to_string(),
            miles: edge.miles,
        });
    }

    debug!(
        mode = %request.mode,
        segments = trace.total_segments,
        miles = trace.total_miles,
        "planned route"
    );

    Ok(RoutePlan {
        mode: request.mode,
        start,
        goal,
        steps: trace.steps,
        legs,
        total_segments: trace.total_segments,
        total_miles: trace.total_miles,
        total_hours: trace.total_hours,
        total_delivery_hours: trace.total_delivery_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Position;

    fn fixture_atlas() -> RoadAtlas {
        let mut atlas = RoadAtlas::new();
        atlas.add_segment("Alpha", "Beta", 10.0, 50.0, "Hwy1");
        atlas.add_segment("Beta", "Gamma", 5.0, 30.0, "Hwy2");
        atlas.add_segment("Alpha", "Gamma", 20.0, 60.0, "Hwy3");
        for (name, latitude) in [("Alpha", 0.0), ("Beta", 0.1), ("Gamma", 0.15)] {
            atlas.set_position(
                name,
                Position {
                    latitude,
                    longitude: 0.0,
                },
            );
        }
        atlas
    }

    #[test]
    fn unknown_start_carries_suggestions() {
        let atlas = fixture_atlas();
        let request = RouteRequest::new("Alpho", "Gamma", CostMode::Distance);
        let error = plan_route(&atlas, &request).expect_err("unknown start");
        let message = format!("{error}");
        assert!(message.contains("unknown location: Alpho"));
        assert!(message.contains("Alpha"));
    }

    #[test]
    fn goal_without_coordinates_is_rejected_before_search() {
        let mut atlas = fixture_atlas();
        atlas.add_segment("Gamma", "Offgrid", 2.0, 40.0, "Dirt");
        let request = RouteRequest::new("Alpha", "Offgrid", CostMode::Distance);
        let error = plan_route(&atlas, &request).expect_err("goal lacks coordinates");
        assert!(matches!(error, Error::UnknownGoal { .. }));
    }

    #[test]
    fn legs_mirror_the_traversed_edges() {
        let atlas = fixture_atlas();
        let request = RouteRequest::new("Alpha", "Gamma", CostMode::Distance);
        let plan = plan_route(&atlas, &request).expect("route exists");

        assert_eq!(plan.total_segments, plan.legs.len());
        let leg_total: f64 = plan.legs.iter().map(|leg| leg.miles).sum();
        assert_eq!(leg_total, plan.total_miles);
        assert_eq!(plan.legs[0].road_name, "Hwy1");
        assert_eq!(plan.legs[1].road_name, "Hwy2");
    }

    #[test]
    fn plan_serializes_with_mode_name() {
        let atlas = fixture_atlas();
        let request = RouteRequest::new("Alpha", "Gamma", CostMode::Segments);
        let plan = plan_route(&atlas, &request).expect("route exists");

        let json = serde_json::to_value(&plan).expect("plan serializes");
        assert_eq!(json["mode"], "segments");
        assert_eq!(json["total_segments"], 1);
    }
}
