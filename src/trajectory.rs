//! Densification of whole sample chains.
//!
//! A chain is an ordered slice of samples. Adjacent samples of the same
//! entity form a segment; the last sample of each entity run terminates its
//! chain and pairs with `None`.

use crate::compute::interpolate::SegmentInterpolator;
use crate::hasher::SpatialHasher;
use gridtrace_types::point::InterpolatedPoint;
use gridtrace_types::sample::RawSample;
use std::iter::FusedIterator;

/// Counters collected while densifying a chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DensifyStats {
    /// Segments examined, including chain terminators
    pub segments: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Interpolated points emitted
    pub points: usize,
}

/// Points produced by [`SegmentInterpolator::densify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Densified<C> {
    pub points: Vec<InterpolatedPoint<C>>,
    pub stats: DensifyStats,
}

/// Iterate `samples` as `(current, next)` pairs.
///
/// `next` is `None` for the final sample and wherever the entity id changes.
///
/// # Examples
///
/// ```
/// use gridtrace::RawSample;
/// use gridtrace::trajectory::segments;
///
/// let samples = [
///     RawSample::new(0.0, 0.0, 0, 1),
///     RawSample::new(0.0, 0.0, 10, 1),
///     RawSample::new(5.0, 5.0, 0, 2),
/// ];
/// let terminators = segments(&samples).filter(|(_, next)| next.is_none()).count();
/// assert_eq!(terminators, 2);
/// ```
pub fn segments(samples: &[RawSample]) -> Segments<'_> {
    Segments { samples, pos: 0 }
}

/// Iterator returned by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    samples: &'a [RawSample],
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (&'a RawSample, Option<&'a RawSample>);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.samples.get(self.pos)?;
        self.pos += 1;
        let next = self
            .samples
            .get(self.pos)
            .filter(|next| next.entity_id() == current.entity_id());
        Some((current, next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}

impl<H: SpatialHasher> SegmentInterpolator<H> {
    /// Interpolate every valid segment of `samples`.
    ///
    /// Samples must be grouped by entity and ordered by timestamp within each
    /// group. Rejected segments are skipped and counted; this never fails.
    pub fn densify(&self, samples: &[RawSample]) -> Densified<H::Code> {
        let mut stats = DensifyStats::default();
        let mut points = Vec::new();

        for (current, next) in segments(samples) {
            stats.segments += 1;
            match next {
                Some(next) if self.validate(current, Some(next)) => {
                    stats.accepted += 1;
                    points.extend(self.interpolate(current, next));
                }
                _ => stats.rejected += 1,
            }
        }
        stats.points = points.len();

        log::debug!(
            "Densified {} samples: {} segments accepted, {} rejected, {} points",
            samples.len(),
            stats.accepted,
            stats.rejected,
            stats.points
        );

        Densified { points, stats }
    }
}
