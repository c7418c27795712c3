use geo::Point;
use serde::{Deserialize, Serialize};

/// One raw location observation for a moving entity.
///
/// Samples for the same entity form a chronological chain. A sample never
/// references its successor; callers pass adjacent pairs explicitly, usually
/// from an ordered slice of samples they own.
///
/// # Examples
///
/// ```
/// use gridtrace_types::sample::RawSample;
///
/// let sample = RawSample::new(13.4050, 52.5200, 1_000, 7);
/// assert_eq!(sample.longitude(), 13.4050);
/// assert_eq!(sample.latitude(), 52.5200);
/// assert_eq!(sample.timestamp(), 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    point: Point<f64>,
    timestamp: i64,
    entity_id: i64,
}

impl RawSample {
    /// Create a sample from longitude, latitude, timestamp and entity id.
    pub fn new(longitude: f64, latitude: f64, timestamp: i64, entity_id: i64) -> Self {
        Self {
            point: Point::new(longitude, latitude),
            timestamp,
            entity_id,
        }
    }

    /// Create a sample from a `geo::Point` (x = longitude, y = latitude).
    pub fn from_point(point: Point<f64>, timestamp: i64, entity_id: i64) -> Self {
        Self {
            point,
            timestamp,
            entity_id,
        }
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

    /// Timestamp in the same unit as the grid step.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn entity_id(&self) -> i64 {
        self.entity_id
    }
}
