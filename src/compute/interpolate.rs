//! Segment interpolation onto the time grid.
//!
//! A segment is two chronologically adjacent samples of one entity. When the
//! entity stayed put (within tolerance) across the gap, every grid timestamp
//! in the gap gets a synthesized point with rounded coordinates and a spatial
//! hash.
//!
//! ```rust
//! use gridtrace::{GridConfig, RawSample, SegmentInterpolator};
//!
//! let config = GridConfig::default().with_time_delta(10);
//! let interpolator = SegmentInterpolator::with_geohash(config)?;
//!
//! let current = RawSample::new(1.0, 1.0, 5, 7);
//! let next = RawSample::new(1.0, 1.0, 25, 7);
//! assert!(interpolator.validate(&current, Some(&next)));
//!
//! let times: Vec<i64> = interpolator
//!     .interpolate(&current, &next)
//!     .map(|p| p.timestamp())
//!     .collect();
//! assert_eq!(times, vec![10, 20]);
//! # Ok::<(), gridtrace::GridError>(())
//! ```

use crate::compute::rounding::round_half_even;
use crate::compute::validation::fuzzy_equals;
use crate::config::GridConfig;
use crate::error::Result;
use crate::hasher::{GeohashHasher, SpatialHasher};
use gridtrace_types::point::InterpolatedPoint;
use gridtrace_types::sample::RawSample;
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

/// Segments producing more points than this are logged as suspicious.
const LARGE_SEGMENT_THRESHOLD: usize = 1_000_000;

/// Validates sample pairs and interpolates grid points between them.
#[derive(Debug, Clone)]
pub struct SegmentInterpolator<H = GeohashHasher> {
    config: GridConfig,
    hasher: H,
}

impl SegmentInterpolator<GeohashHasher> {
    /// Create an interpolator tagging points with full-length geohashes.
    pub fn with_geohash(config: GridConfig) -> Result<Self> {
        Self::new(config, GeohashHasher::default())
    }
}

impl<H: SpatialHasher> SegmentInterpolator<H> {
    /// Create an interpolator. Fails if `config` does not validate.
    pub fn new(config: GridConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, hasher })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns true if `(current, next)` is a segment worth densifying.
    ///
    /// The segment must have a successor, start at or after the grid origin,
    /// move strictly forward in time, and keep both longitude and latitude
    /// within the configured tolerance.
    pub fn validate(&self, current: &RawSample, next: Option<&RawSample>) -> bool {
        let Some(next) = next else {
            log::trace!(
                "Rejecting segment at t={}: no next sample",
                current.timestamp()
            );
            return false;
        };

        if current.timestamp() < self.config.time_min {
            log::trace!(
                "Rejecting segment at t={}: before grid origin {}",
                current.timestamp(),
                self.config.time_min
            );
            return false;
        }

        if next.timestamp() <= current.timestamp() {
            log::trace!(
                "Rejecting segment at t={}: next sample at t={} is not later",
                current.timestamp(),
                next.timestamp()
            );
            return false;
        }

        let tolerance = self.config.tolerance;
        if !fuzzy_equals(current.longitude(), next.longitude(), tolerance)
            || !fuzzy_equals(current.latitude(), next.latitude(), tolerance)
        {
            log::trace!(
                "Rejecting segment at t={}: moved from ({}, {}) to ({}, {})",
                current.timestamp(),
                current.longitude(),
                current.latitude(),
                next.longitude(),
                next.latitude()
            );
            return false;
        }

        true
    }

    /// Grid indices covered by the segment, or `None` if there are none.
    ///
    /// The range starts at the first grid line at or after `current` and
    /// ends at the last grid line at or before `next`. Offsets that overflow
    /// `i64` also yield `None`.
    pub fn grid_range(&self, current: &RawSample, next: &RawSample) -> Option<RangeInclusive<i64>> {
        let time_min = self.config.time_min;
        let step = self.config.time_delta;

        let current_offset = current.timestamp().checked_sub(time_min)?;
        let next_offset = next.timestamp().checked_sub(time_min)?;

        let min_index = ceil_div(current_offset, step);
        let next_floor = next_offset.div_euclid(step);
        let next_rem = next_offset.rem_euclid(step);
        let next_ceil = next_floor + i64::from(next_rem != 0);

        // No grid line between the samples, and next is not on one either.
        if next_ceil == min_index && next_rem != 0 {
            return None;
        }

        let max_index = next_floor.max(min_index);
        if min_index < 0 || max_index < 0 {
            return None;
        }

        // Every index in range must map to a representable timestamp.
        max_index.checked_mul(step)?.checked_add(time_min)?;

        Some(min_index..=max_index)
    }

    /// Lazily interpolate the grid points between `current` and `next`.
    ///
    /// Call [`validate`](Self::validate) first: on a pair it rejects, the
    /// output follows the same arithmetic but carries no meaning.
    pub fn interpolate<'a>(
        &'a self,
        current: &'a RawSample,
        next: &'a RawSample,
    ) -> Interpolation<'a, H> {
        let indices = self.grid_range(current, next).unwrap_or(1..=0);

        let (len, _) = indices.size_hint();
        if len > LARGE_SEGMENT_THRESHOLD {
            log::warn!(
                "Segment from t={} to t={} spans {} grid points (time_delta={})",
                current.timestamp(),
                next.timestamp(),
                len,
                self.config.time_delta
            );
        }

        Interpolation {
            interpolator: self,
            current,
            next,
            indices,
        }
    }

    /// Parallel counterpart of [`interpolate`](Self::interpolate).
    ///
    /// Yields the same points in no particular order.
    #[cfg(feature = "parallel")]
    pub fn par_interpolate<'a>(
        &'a self,
        current: &'a RawSample,
        next: &'a RawSample,
    ) -> impl rayon::iter::ParallelIterator<Item = InterpolatedPoint<H::Code>> + 'a
    where
        H: Sync,
        H::Code: Send,
    {
        use rayon::prelude::*;

        self.grid_range(current, next)
            .unwrap_or(1..=0)
            .into_par_iter()
            .map(move |index| self.point_at(current, next, index))
    }

    pub(crate) fn point_at(
        &self,
        current: &RawSample,
        next: &RawSample,
        index: i64,
    ) -> InterpolatedPoint<H::Code> {
        let point_time = self.config.grid_time(index);
        let elapsed = i128::from(point_time) - i128::from(current.timestamp());
        let duration = i128::from(next.timestamp()) - i128::from(current.timestamp());
        let ratio = elapsed as f64 / duration as f64;

        let precision = self.config.precision;
        let longitude = round_half_even(
            current.longitude() + (next.longitude() - current.longitude()) * ratio,
            precision,
        );
        let latitude = round_half_even(
            current.latitude() + (next.latitude() - current.latitude()) * ratio,
            precision,
        );

        InterpolatedPoint::new(
            self.hasher.hash(latitude, longitude),
            longitude,
            latitude,
            point_time,
            current.entity_id(),
        )
    }
}

/// `ceil(a / b)` for `b > 0`.
fn ceil_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b) + i64::from(a.rem_euclid(b) != 0)
}

/// Lazy iterator over the grid points of one segment.
///
/// Created by [`SegmentInterpolator::interpolate`]. Points are computed on
/// demand in ascending timestamp order.
pub struct Interpolation<'a, H: SpatialHasher> {
    interpolator: &'a SegmentInterpolator<H>,
    current: &'a RawSample,
    next: &'a RawSample,
    indices: RangeInclusive<i64>,
}

impl<H: SpatialHasher> Interpolation<'_, H> {
    /// Grid indices not yet yielded.
    pub fn indices(&self) -> &RangeInclusive<i64> {
        &self.indices
    }
}

impl<H: SpatialHasher> Iterator for Interpolation<'_, H> {
    type Item = InterpolatedPoint<H::Code>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(self.interpolator.point_at(self.current, self.next, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<H: SpatialHasher> DoubleEndedIterator for Interpolation<'_, H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.indices.next_back()?;
        Some(self.interpolator.point_at(self.current, self.next, index))
    }
}

impl<H: SpatialHasher> ExactSizeIterator for Interpolation<'_, H> {}

impl<H: SpatialHasher> FusedIterator for Interpolation<'_, H> {}
