//! # gridtrace-types
//!
//! Data types shared by the gridtrace densifier:
//!
//! - **`RawSample`**: one observed location of an entity at a timestamp
//! - **`InterpolatedPoint`**: one synthesized, grid-aligned point tagged with a spatial hash
//!
//! Both are serializable with Serde and wrap a `geo::Point` holding
//! longitude as `x` and latitude as `y`.
//!
//! ## Examples
//!
//! ```rust
//! use gridtrace_types::sample::RawSample;
//!
//! let sample = RawSample::new(-74.0060, 40.7128, 1_700_000_000, 42);
//! assert_eq!(sample.entity_id(), 42);
//! ```

pub mod point;
pub mod sample;

pub use point::InterpolatedPoint;
pub use sample::RawSample;
