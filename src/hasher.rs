//! Spatial hash functions used to tag interpolated points.
//!
//! [`SpatialHasher`] is the seam between the interpolator and whatever code
//! system the caller indexes on. [`GeohashHasher`] is the default, and any
//! `Fn(f64, f64) -> C` closure taking `(latitude, longitude)` also works.

use crate::error::{GridError, Result};
use geohash::{Coord, encode};

/// Longest geohash the encoder supports.
pub const MAX_GEOHASH_LENGTH: usize = 12;

/// Default geohash length for tagging points
pub const DEFAULT_GEOHASH_LENGTH: usize = MAX_GEOHASH_LENGTH;

/// Pure function from a location to a hash code.
///
/// Implementations must not have side effects visible to the caller; they
/// may be called from several threads at once when the `parallel` feature
/// is in use.
pub trait SpatialHasher {
    type Code;

    fn hash(&self, latitude: f64, longitude: f64) -> Self::Code;
}

impl<F, C> SpatialHasher for F
where
    F: Fn(f64, f64) -> C,
{
    type Code = C;

    fn hash(&self, latitude: f64, longitude: f64) -> C {
        self(latitude, longitude)
    }
}

/// Geohash encoder with a fixed code length.
///
/// # Examples
///
/// ```
/// use gridtrace::hasher::{GeohashHasher, SpatialHasher};
///
/// let hasher = GeohashHasher::new(5)?;
/// assert_eq!(hasher.hash(57.64911, 10.40744), "u4pru");
/// # Ok::<(), gridtrace::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeohashHasher {
    length: usize,
}

impl GeohashHasher {
    pub fn new(length: usize) -> Result<Self> {
        if !(1..=MAX_GEOHASH_LENGTH).contains(&length) {
            return Err(GridError::InvalidConfig(format!(
                "Geohash length must be in [1, {}], got: {}",
                MAX_GEOHASH_LENGTH, length
            )));
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for GeohashHasher {
    fn default() -> Self {
        Self {
            length: DEFAULT_GEOHASH_LENGTH,
        }
    }
}

impl SpatialHasher for GeohashHasher {
    type Code = String;

    /// Coordinates the encoder rejects (out of range, NaN) yield an empty code.
    fn hash(&self, latitude: f64, longitude: f64) -> String {
        let coord = Coord {
            x: longitude,
            y: latitude,
        };
        encode(coord, self.length).unwrap_or_else(|e| {
            log::warn!(
                "Cannot geohash ({}, {}), emitting empty code: {}",
                latitude,
                longitude,
                e
            );
            String::new()
        })
    }
}
