use std::fmt::Write;

use serde::Serialize;

use crate::atlas::{LocationId, RoadAtlas};
use crate::cost::CostMode;
use crate::error::{Error, Result};
use crate::routing::RoutePlan;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// The classic route printer layout with the aligned totals block.
    PlainText,
    /// Single-line arrow rendering of the stops.
    Compact,
}

/// One "then go to" step with its resolved name and description string.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryLeg {
    pub next: String,
    pub via: String,
}

/// Structured representation of a planned route that higher-level consumers
/// can serialise. Serialized field names follow the route result contract
/// (`total-segments`, `total-miles`, `total-hours`, `total-delivery-hours`,
/// `route-taken`).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub mode: CostMode,
    pub start: String,
    pub goal: String,
    #[serde(rename = "total-segments")]
    pub total_segments: usize,
    #[serde(rename = "total-miles")]
    pub total_miles: f64,
    #[serde(rename = "total-hours")]
    pub total_hours: f64,
    #[serde(rename = "total-delivery-hours")]
    pub total_delivery_hours: f64,
    #[serde(rename = "route-taken")]
    pub route_taken: Vec<SummaryLeg>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved location names.
    pub fn from_plan(atlas: &RoadAtlas, plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let route_taken = plan
            .legs
            .iter()
            .map(|leg| SummaryLeg {
                next: resolve_name(atlas, leg.next),
                via: format!("{} for {} miles", leg.road_name, leg.miles),
            })
            .collect();

        Ok(Self {
            mode: plan.mode,
            start: resolve_name(atlas, plan.start),
            goal: resolve_name(atlas, plan.goal),
            total_segments: plan.total_segments,
            total_miles: plan.total_miles,
            total_hours: plan.total_hours,
            total_delivery_hours: plan.total_delivery_hours,
            route_taken,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Start in {}", self.start);
        for leg in &self.route_taken {
            let _ = writeln!(buffer, "   Then go to {} via {}", leg.next, leg.via);
        }
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "          Total segments: {:4}", self.total_segments);
        let _ = writeln!(buffer, "             Total miles: {:8.3}", self.total_miles);
        let _ = writeln!(buffer, "             Total hours: {:8.3}", self.total_hours);
        let _ = writeln!(
            buffer,
            "Total hours for delivery: {:8.3}",
            self.total_delivery_hours
        );
        buffer
    }

    fn render_compact(&self) -> String {
        let mut stops = vec![self.start.as_str()];
        stops.extend(self.route_taken.iter().map(|leg| leg.next.as_str()));
        format!(
            "{} ({} segments, {:.3} miles via {})\n",
            stops.join(" -> "),
            self.total_segments,
            self.total_miles,
            self.mode
        )
    }
}

fn resolve_name(atlas: &RoadAtlas, id: LocationId) -> String {
    atlas
        .location_name(id)
        .unwrap_or("<unknown>")
        .to_string()
}
