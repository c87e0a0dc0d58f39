use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::atlas::LocationId;
use crate::error::Error;
use crate::search::{RouteState, SearchContext};

/// Assumed network-wide speed cap underlying the time and delivery
/// projections, keeping them a lower bound on remaining travel time.
pub const ASSUMED_MAX_SPEED: f64 = 65.0;

/// Speed limit at or above which a segment accrues delivery fatigue.
pub const FATIGUE_SPEED_CUTOFF: f64 = 50.0;

/// Selectable cost strategies for route search.
///
/// Each mode scores a partial route with a single float used directly as
/// the frontier priority: the accumulated cost plus the mode's projection
/// of the remaining cost to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Fewest road segments.
    Segments,
    /// Shortest total distance.
    Distance,
    /// Least total travel time at each segment's speed limit.
    Time,
    /// Least delivery time, where fast segments accrue a fatigue surcharge.
    Delivery,
}

impl CostMode {
    /// All supported modes, in documentation order.
    pub const ALL: [CostMode; 4] = [
        CostMode::Segments,
        CostMode::Distance,
        CostMode::Time,
        CostMode::Delivery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CostMode::Segments => "segments",
            CostMode::Distance => "distance",
            CostMode::Time => "time",
            CostMode::Delivery => "delivery",
        }
    }

    /// Frontier priority for a partial route.
    ///
    /// The time and delivery projections fold the accumulated miles into
    /// the remaining-distance term and divide by the assumed cap; a state
    /// still sitting on the start location projects zero. The delivery
    /// projection's low-speed comparison tests the assumed cap rather than
    /// any real segment's limit, so with a cap of 65 its fatigue branch
    /// always applies.
    pub fn priority(
        self,
        state: &RouteState,
        goal: LocationId,
        ctx: &mut SearchContext<'_>,
    ) -> f64 {
        let current = state.current();
        match self {
            CostMode::Segments => (state.segments + 1) as f64,
            CostMode::Distance => {
                state.miles + ctx.distances.distance_between(ctx.atlas, current, goal)
            }
            CostMode::Time => {
                let projected =
                    ctx.distances.distance_between(ctx.atlas, current, goal) + state.miles;
                let remaining = if state.is_initial() {
                    0.0
                } else {
                    projected / ASSUMED_MAX_SPEED
                };
                state.hours + remaining
            }
            CostMode::Delivery => {
                let projected =
                    ctx.distances.distance_between(ctx.atlas, current, goal) + state.miles;
                if ASSUMED_MAX_SPEED < FATIGUE_SPEED_CUTOFF {
                    let remaining = if state.is_initial() {
                        0.0
                    } else {
                        projected / ASSUMED_MAX_SPEED
                    };
                    state.delivery_hours + remaining
                } else if state.is_initial() {
                    state.delivery_hours
                } else {
                    let remaining = projected / ASSUMED_MAX_SPEED;
                    state.delivery_hours
                        + remaining
                        + 2.0 * (remaining + state.delivery_hours) * (projected / 1000.0).tanh()
                }
            }
        }
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "segments" => Ok(CostMode::Segments),
            "distance" => Ok(CostMode::Distance),
            "time" => Ok(CostMode::Time),
            "delivery" => Ok(CostMode::Delivery),
            other => Err(Error::InvalidCostMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Travel time for one edge at its posted speed limit.
pub fn time_increment(miles: f64, speed_limit: f64) -> f64 {
    miles / speed_limit
}

/// Delivery time for one edge. Segments at or above the fatigue cutoff pay
/// a surcharge that compounds with already-accrued delivery time through a
/// saturating tanh term.
pub fn delivery_increment(miles: f64, speed_limit: f64, delivery_so_far: f64) -> f64 {
    let time = time_increment(miles, speed_limit);
    if speed_limit < FATIGUE_SPEED_CUTOFF {
        time
    } else {
        time + 2.0 * (time + delivery_so_far) * (miles / 1000.0).tanh()
    }
}
