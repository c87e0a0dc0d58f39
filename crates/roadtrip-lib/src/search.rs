//! Best-first route search over the road graph.
//!
//! One expansion loop serves all four cost modes. Closed locations may be
//! reopened when a strictly better priority is discovered (never in
//! segments mode); the delivery projection depends on accumulated delivery
//! time, so it is not a consistent heuristic and delivery searches behave
//! uniform-cost-like rather than as strict A*, revisiting nodes when the
//! graph demands it.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::atlas::{LocationId, RoadAtlas};
use crate::cost::{delivery_increment, time_increment, CostMode};
use crate::distance::DistanceCache;
use crate::graph::RoadGraph;

/// Shared lookups for one search invocation. Built fresh per call; nothing
/// in here is global or survives the query.
pub struct SearchContext<'a> {
    pub atlas: &'a RoadAtlas,
    pub graph: &'a RoadGraph,
    pub distances: DistanceCache,
}

impl<'a> SearchContext<'a> {
    pub fn new(atlas: &'a RoadAtlas, graph: &'a RoadGraph) -> Self {
        Self {
            atlas,
            graph,
            distances: DistanceCache::new(),
        }
    }
}

/// Partial route under evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
    /// Locations in visit order; the first entry is always the search start.
    pub path: Vec<LocationId>,
    pub miles: f64,
    pub segments: usize,
    pub hours: f64,
    pub delivery_hours: f64,
}

impl RouteState {
    fn start(location: LocationId) -> Self {
        Self {
            path: vec![location],
            miles: 0.0,
            segments: 0,
            hours: 0.0,
            delivery_hours: 0.0,
        }
    }

    /// Location at the head of this partial route.
    pub fn current(&self) -> LocationId {
        *self.path.last().expect("route state path is never empty")
    }

    /// Whether this state still sits on the start location with no edges
    /// taken.
    pub fn is_initial(&self) -> bool {
        self.path.len() == 1
    }
}

/// Goal state reached by the search: the full path and the totals its
/// accumulators carried when popped.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTrace {
    pub steps: Vec<LocationId>,
    pub total_segments: usize,
    pub total_miles: f64,
    pub total_hours: f64,
    pub total_delivery_hours: f64,
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone)]
struct FrontierEntry {
    priority: FloatOrd,
    state: RouteState,
}

impl FrontierEntry {
    fn new(priority: f64, state: RouteState) -> Self {
        Self {
            priority: FloatOrd(priority),
            state,
        }
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        // Ties break deterministically: fewer segments first, then the
        // lexicographically smaller path of interned indices.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.state.segments.cmp(&self.state.segments))
            .then_with(|| other.state.path.cmp(&self.state.path))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run the best-first expansion loop from `start` to `goal` under `mode`.
///
/// Returns `None` when the frontier empties without reaching the goal. The
/// caller resolves names and validates the goal's coordinates before
/// invoking the engine. A `start == goal` query resolves on the first pop
/// with zero totals.
pub fn find_route(
    ctx: &mut SearchContext<'_>,
    start: LocationId,
    goal: LocationId,
    mode: CostMode,
) -> Option<RouteTrace> {
    let graph = ctx.graph;
    let mut visited: HashMap<LocationId, f64> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    let initial = RouteState::start(start);
    let priority = mode.priority(&initial, goal, ctx);
    frontier.push(FrontierEntry::new(priority, initial));

    let mut expansions = 0usize;
    while let Some(entry) = frontier.pop() {
        let state = entry.state;
        let current = state.current();

        if current == goal {
            debug!(expansions, segments = state.segments, "goal reached");
            return Some(RouteTrace {
                total_segments: state.segments,
                total_miles: state.miles,
                total_hours: state.hours,
                total_delivery_hours: state.delivery_hours,
                steps: state.path,
            });
        }

        visited.insert(current, entry.priority.0);
        expansions += 1;

        for edge in graph.neighbours(current) {
            let mut successor = state.clone();
            successor.path.push(edge.target);
            successor.miles += edge.miles;
            successor.segments += 1;
            successor.hours += time_increment(edge.miles, edge.speed_limit);
            successor.delivery_hours +=
                delivery_increment(edge.miles, edge.speed_limit, state.delivery_hours);

            let priority = mode.priority(&successor, goal, ctx);
            match visited.get(&edge.target) {
                None => frontier.push(FrontierEntry::new(priority, successor)),
                Some(&seen) if priority < seen && mode != CostMode::Segments => {
                    // Reopen: clear the mark so the cheaper route gets
                    // expanded again.
                    visited.remove(&edge.target);
                    frontier.push(FrontierEntry::new(priority, successor));
                }
                Some(_) => {}
            }
        }
    }

    debug!(expansions, "frontier exhausted");
    None
}
