use geo::Point;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in kilometers between two
/// (lon, lat) points in decimal degrees.
pub fn haversine_km(a: Point, b: Point) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// One scrub query result: the sample index and the distance covered up
/// to it, together with the track total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubSample {
    pub index: usize,
    pub distance_km: f64,
    pub total_km: f64,
}

/// Cumulative great-circle distance along an ordered coordinate
/// sequence, plus the normalized-position-to-index mapping used by the
/// scrub control.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceEngine {
    cumulative: Vec<f64>,
}

impl DistanceEngine {
    /// Builds the cumulative array: `D[0] = 0`,
    /// `D[i] = D[i-1] + haversine(c[i-1], c[i])`. Empty for empty input.
    pub fn new(coords: &[Point]) -> Self {
        if coords.is_empty() {
            return DistanceEngine {
                cumulative: Vec::new(),
            };
        }
        let mut cumulative = Vec::with_capacity(coords.len());
        cumulative.push(0.0);
        let mut running = 0.0;
        for pair in coords.windows(2) {
            running += haversine_km(pair[0], pair[1]);
            cumulative.push(running);
        }
        DistanceEngine { cumulative }
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    pub fn total_km(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Maps a normalized position to a sample index:
    /// `round(p * (L-1))`, with p clamped to [0, 1] and the result
    /// clamped to [0, L-1]. Linear in index, not in distance; dragging
    /// at constant speed over unevenly spaced samples does not move at
    /// constant real-world speed, and that approximation is accepted.
    pub fn index_at(&self, position: f64) -> Option<usize> {
        if self.cumulative.is_empty() {
            return None;
        }
        let clamped = position.clamp(0.0, 1.0);
        let index = (clamped * (self.cumulative.len() - 1) as f64).round() as usize;
        Some(index.min(self.cumulative.len() - 1))
    }

    pub fn sample(&self, position: f64) -> Option<ScrubSample> {
        let index = self.index_at(position)?;
        Some(ScrubSample {
            index,
            distance_km: self.cumulative[index],
            total_km: self.total_km(),
        })
    }
}
