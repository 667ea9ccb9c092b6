use super::ParseError;
use geo::Point;
use gpx::Gpx;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Trackpoint segments and named waypoints extracted from one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedGpx {
    /// Non-empty segments in source order, each a run of (lon, lat)
    /// points in recording order.
    pub segments: Vec<Vec<Point>>,
    /// Waypoints carrying a non-empty name, in source order.
    pub named_points: Vec<(Point, String)>,
}

static XMLNS_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+xmlns:[^\s=]+="[^"]+""#).unwrap());
static TAG_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+?:").unwrap());

/// Textual namespace normalization applied before structural parsing.
///
/// Two passes: drop `xmlns:<prefix>="<uri>"` declarations, then drop any
/// remaining `<prefix>:` tag/attribute prefixes. This is a compatibility
/// shim for the loosely namespaced exports in the wild that a strict
/// namespace-aware parser would reject; it accepts some malformed input
/// on purpose and makes no correctness guarantee beyond that.
pub fn strip_namespace_prefixes(raw: &str) -> String {
    let cleaned = XMLNS_DECL.replace_all(raw, "");
    TAG_PREFIX.replace_all(&cleaned, "").into_owned()
}

/// Parse raw GPX text into segments and named waypoints.
pub fn parse_track_text(raw: &str) -> Result<ParsedGpx, ParseError> {
    let cleaned = strip_namespace_prefixes(raw);
    let parsed: Gpx = gpx::read(cleaned.as_bytes())?;

    let mut segments = Vec::new();
    for track in &parsed.tracks {
        for segment in &track.segments {
            let points: Vec<Point> = segment.points.iter().map(|p| p.point()).collect();
            if !points.is_empty() {
                segments.push(points);
            }
        }
    }

    let named_points = parsed
        .waypoints
        .iter()
        .filter_map(|wpt| {
            wpt.name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| (wpt.point(), name.to_string()))
        })
        .collect();

    Ok(ParsedGpx {
        segments,
        named_points,
    })
}

pub fn parse_track_file(path: &Path) -> Result<ParsedGpx, ParseError> {
    let raw = fs::read_to_string(path)?;
    parse_track_text(&raw)
}
