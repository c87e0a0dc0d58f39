use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Default file name for road segment records.
pub const SEGMENTS_FILE: &str = "road-segments.txt";

/// Default file name for coordinate records.
pub const COORDINATES_FILE: &str = "city-gps.txt";

/// Suggestions below this normalized similarity are discarded.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Interned index of a named location.
pub type LocationId = usize;

/// Planar coordinates for a location, as recorded in the coordinate file.
/// Latitude and longitude are treated as plain x/y throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.latitude - other.latitude;
        let dy = self.longitude - other.longitude;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Raw road segment record, endpoints already interned.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub a: LocationId,
    pub b: LocationId,
    pub miles: f64,
    pub speed_limit: f64,
    pub road_name: String,
}

/// In-memory tables for the road network: interned location names, optional
/// positions, and the raw segment records the graph is built from.
///
/// Location identifiers are contiguous indices assigned in input order; the
/// original name is kept only for lookups and output formatting.
#[derive(Debug, Clone, Default)]
pub struct RoadAtlas {
    names: Vec<String>,
    name_to_id: HashMap<String, LocationId>,
    positions: Vec<Option<Position>>,
    segments: Vec<SegmentRecord>,
}

impl RoadAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a location name, returning its stable index.
    pub fn intern(&mut self, name: &str) -> LocationId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.positions.push(None);
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    /// Lookup a location identifier by its exact name.
    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a location name by identifier.
    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Position recorded for a location, when the coordinate file had one.
    /// Absence is a valid state, not an error.
    pub fn position(&self, id: LocationId) -> Option<Position> {
        self.positions.get(id).copied().flatten()
    }

    /// Record a position for a location, interning the name if needed.
    pub fn set_position(&mut self, name: &str, position: Position) {
        let id = self.intern(name);
        self.positions[id] = Some(position);
    }

    /// Record an undirected road segment between two locations.
    pub fn add_segment(&mut self, a: &str, b: &str, miles: f64, speed_limit: f64, road_name: &str) {
        let a = self.intern(a);
        let b = self.intern(b);
        self.segments.push(SegmentRecord {
            a,
            b,
            miles,
            speed_limit,
            road_name: road_name.to_string(),
        });
    }

    /// All raw segment records, in input order.
    pub fn segments(&self) -> &[SegmentRecord] {
        &self.segments
    }

    /// Number of interned locations.
    pub fn location_count(&self) -> usize {
        self.names.len()
    }

    /// Closest location names to `name`, most similar first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .names
            .iter()
            .map(|candidate| {
                (
                    strsim::normalized_levenshtein(name, candidate),
                    candidate.as_str(),
                )
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

/// Load the road network tables from `road-segments.txt` and `city-gps.txt`
/// inside `data_dir`.
pub fn load_atlas(data_dir: &Path) -> Result<RoadAtlas> {
    load_atlas_from_files(
        &data_dir.join(SEGMENTS_FILE),
        &data_dir.join(COORDINATES_FILE),
    )
}

/// Load the road network tables from explicit file paths.
pub fn load_atlas_from_files(segments_path: &Path, coordinates_path: &Path) -> Result<RoadAtlas> {
    let mut atlas = RoadAtlas::new();
    load_segments(&mut atlas, segments_path)?;
    load_coordinates(&mut atlas, coordinates_path)?;
    debug!(
        locations = atlas.location_count(),
        segments = atlas.segments.len(),
        "loaded road atlas"
    );
    Ok(atlas)
}

fn load_segments(atlas: &mut RoadAtlas, path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)?;
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let malformed = |message: String| Error::MalformedSegment {
            path: path.to_path_buf(),
            line: index + 1,
            message,
        };
        let &[a, b, miles, speed_limit, road_name] = &fields[..] else {
            return Err(malformed(format!(
                "expected 5 fields, found {}",
                fields.len()
            )));
        };
        let miles = parse_positive(miles, "length").map_err(&malformed)?;
        let speed_limit = parse_positive(speed_limit, "speed limit").map_err(&malformed)?;
        atlas.add_segment(a, b, miles, speed_limit, road_name);
    }
    Ok(())
}

fn load_coordinates(atlas: &mut RoadAtlas, path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)?;
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let malformed = |message: String| Error::MalformedCoordinate {
            path: path.to_path_buf(),
            line: index + 1,
            message,
        };
        let &[name, latitude, longitude] = &fields[..] else {
            return Err(malformed(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        };
        let latitude = parse_float(latitude, "latitude").map_err(&malformed)?;
        let longitude = parse_float(longitude, "longitude").map_err(&malformed)?;
        atlas.set_position(
            name,
            Position {
                latitude,
                longitude,
            },
        );
    }
    Ok(())
}

fn parse_float(value: &str, field: &str) -> std::result::Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("{field} is not a number: {value}"))
}

fn parse_positive(value: &str, field: &str) -> std::result::Result<f64, String> {
    let parsed = parse_float(value, field)?;
    if parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("{field} must be positive: {value}"))
    }
}
