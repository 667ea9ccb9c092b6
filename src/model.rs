use geo::Point;

/// One source file's worth of recorded track geometry.
///
/// `filename` is the base name of the originating file, not its path.
/// Segment and point order follow the source file and must never be
/// reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackEntry {
    pub filename: String,
    pub segments: Vec<Vec<Point>>,
}

impl TrackEntry {
    /// All segment points flattened in traversal order.
    pub fn coords(&self) -> Vec<Point> {
        self.segments.iter().flatten().copied().collect()
    }
}

/// A named waypoint, tagged with the base name of its source file.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPoint {
    pub point: Point,
    pub name: String,
    pub filename: String,
}

/// The aggregate of one full generation run.
///
/// Built in memory once, written once, discarded. Tracks appear in
/// discovery order; `heat_points` keeps every retained point across all
/// tracks, duplicates included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoDataDocument {
    pub tracks: Vec<TrackEntry>,
    pub heat_points: Vec<Point>,
    pub named_points: Vec<NamedPoint>,
}
