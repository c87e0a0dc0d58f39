//! roadtrip library entry points.
//!
//! This crate exposes helpers to load the road network files into memory,
//! build the graph representation, and run the multi-metric best-first route
//! search. Higher-level consumers (the CLI) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod atlas;
pub mod cost;
pub mod distance;
pub mod error;
pub mod graph;
pub mod output;
pub mod routing;
pub mod search;

pub use atlas::{load_atlas, LocationId, Position, RoadAtlas, COORDINATES_FILE, SEGMENTS_FILE};
pub use cost::CostMode;
pub use distance::DistanceCache;
pub use error::{Error, Result};
pub use graph::{build_road_graph, RoadEdge, RoadGraph};
pub use output::{RouteRenderMode, RouteSummary};
pub use routing::{plan_route, RouteLeg, RoutePlan, RouteRequest};
pub use search::{find_route, RouteState, RouteTrace, SearchContext};
