//! Tolerance comparison for stationary-segment detection.

/// Returns true if `a` and `b` are within `tolerance` of each other.
///
/// The comparison is symmetric and reflexive. Equal values (including equal
/// infinities) always match, as do two NaNs. A NaN tolerance only matches
/// equal values.
///
/// # Examples
///
/// ```
/// use gridtrace::compute::validation::fuzzy_equals;
///
/// assert!(fuzzy_equals(1.0, 1.00005, 1e-4));
/// assert!(!fuzzy_equals(1.0, 1.0002, 1e-4));
/// assert!(fuzzy_equals(f64::NAN, f64::NAN, 0.0));
/// ```
pub fn fuzzy_equals(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance || a == b || (a.is_nan() && b.is_nan())
}
