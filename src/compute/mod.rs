//! Computation modules: rounding, validation and segment interpolation.

pub mod interpolate;
pub mod rounding;
pub mod validation;

pub use interpolate::{Interpolation, SegmentInterpolator};
