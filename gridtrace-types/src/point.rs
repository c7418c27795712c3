use geo::Point;
use serde::{Deserialize, Serialize};

/// A synthesized point on the time grid, tagged with a spatial hash.
///
/// `C` is the hash code type produced by the spatial hasher. The default is
/// a geohash string.
///
/// # Examples
///
/// ```
/// use gridtrace_types::point::InterpolatedPoint;
///
/// let p = InterpolatedPoint::new("u33dc0cp".to_string(), 13.405, 52.52, 600, 1);
/// assert_eq!(p.hash(), "u33dc0cp");
/// assert_eq!(p.timestamp(), 600);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedPoint<C = String> {
    hash: C,
    point: Point<f64>,
    timestamp: i64,
    entity_id: i64,
}

impl<C> InterpolatedPoint<C> {
    pub fn new(hash: C, longitude: f64, latitude: f64, timestamp: i64, entity_id: i64) -> Self {
        Self {
            hash,
            point: Point::new(longitude, latitude),
            timestamp,
            entity_id,
        }
    }

    /// Spatial hash code of the rounded location.
    pub fn hash(&self) -> &C {
        &self.hash
    }

    /// Consume the point, keeping only the hash code.
    pub fn into_hash(self) -> C {
        self.hash
    }

    pub fn point(&self) -> &Point<f64> {
        &self.point
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    /// Grid-aligned timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn entity_id(&self) -> i64 {
        self.entity_id
    }
}
