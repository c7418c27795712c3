//! Densify sparse trajectories onto a regular time grid.
//!
//! Consecutive samples of an entity that stayed in place (within tolerance)
//! are expanded into one point per grid timestamp between them. Every point
//! carries coordinates rounded half-to-even at a fixed precision and a
//! spatial hash, a geohash by default.
//!
//! ```rust
//! use gridtrace::{GridConfig, RawSample, SegmentInterpolator};
//!
//! let config = GridConfig::default().with_time_delta(60).with_precision(5);
//! let interpolator = SegmentInterpolator::with_geohash(config)?;
//!
//! let samples = [
//!     RawSample::new(-74.0060, 40.7128, 30, 1),
//!     RawSample::new(-74.0060, 40.7128, 200, 1),
//! ];
//! let densified = interpolator.densify(&samples);
//! assert_eq!(densified.points.len(), 3);
//! assert_eq!(densified.points[0].timestamp(), 60);
//! # Ok::<(), gridtrace::GridError>(())
//! ```
//!
//! ## Features
//! - `parallel`: `SegmentInterpolator::par_interpolate` backed by rayon
//! - `toml`: load and save `GridConfig` as TOML

pub mod compute;
pub mod config;
pub mod error;
pub mod hasher;
pub mod trajectory;

pub use compute::{Interpolation, SegmentInterpolator};
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use hasher::{GeohashHasher, SpatialHasher};
pub use trajectory::{Densified, DensifyStats, segments};

pub use geo::Point;

pub use gridtrace_types::point::InterpolatedPoint;
pub use gridtrace_types::sample::RawSample;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{GridConfig, GridError, Result, SegmentInterpolator};

    pub use crate::{GeohashHasher, SpatialHasher};

    pub use crate::{InterpolatedPoint, RawSample};

    pub use crate::compute::rounding::round_half_even;
    pub use crate::compute::validation::fuzzy_equals;
}
