//! Exact decimal rounding of binary floating-point values.
//!
//! `round_half_even(x, p)` rounds the exact binary value of `x` (not its
//! shortest decimal representation) to `p` fractional digits, breaking exact
//! ties toward the even digit, then returns the nearest `f64` to the result.

/// Powers of ten that are exactly representable in both `u128` and `f64`.
const POW10: [u128; 23] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
    100_000_000_000_000_000_000,
    1_000_000_000_000_000_000_000,
    10_000_000_000_000_000_000_000,
];

/// Integers below this convert to `f64` without loss.
const F64_EXACT_INT_LIMIT: u128 = 1 << 53;

/// Round `value` to `precision` decimal digits, ties to even.
///
/// Non-finite values pass through unchanged. A result of zero is always
/// positive zero.
///
/// # Examples
///
/// ```
/// use gridtrace::compute::rounding::round_half_even;
///
/// assert_eq!(round_half_even(0.125, 2), 0.12);
/// assert_eq!(round_half_even(0.375, 2), 0.38);
/// // 2.675 is stored as 2.67499999999999982236431605997495353221893310546875
/// assert_eq!(round_half_even(2.675, 2), 2.67);
/// ```
pub fn round_half_even(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value == 0.0 {
        return 0.0;
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased_exp = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    // value = mantissa * 2^exp
    let (mantissa, exp) = if biased_exp == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exp - 1075)
    };

    // Integers already have no fractional digits.
    if exp >= 0 {
        return value;
    }

    // 2^-k has exactly k fractional decimal digits.
    let frac_bits = exp.unsigned_abs();
    if precision >= frac_bits {
        return value;
    }

    if precision as usize >= POW10.len() {
        return round_via_format(value, precision);
    }

    // scaled = mantissa * 10^p / 2^k, below 2^127 since mantissa < 2^53.
    let scaled = mantissa as u128 * POW10[precision as usize];
    let (quotient, round_up) = if frac_bits >= 128 {
        (0, false)
    } else {
        let quotient = scaled >> frac_bits;
        let remainder = scaled & ((1u128 << frac_bits) - 1);
        let half = 1u128 << (frac_bits - 1);
        let round_up = remainder > half || (remainder == half && quotient & 1 == 1);
        (quotient, round_up)
    };
    let digits = quotient + u128::from(round_up);

    if digits == 0 {
        return 0.0;
    }

    let magnitude = if digits < F64_EXACT_INT_LIMIT {
        // Both operands are exact, so one IEEE division rounds correctly.
        digits as f64 / POW10[precision as usize] as f64
    } else {
        format!("{}e-{}", digits, precision)
            .parse::<f64>()
            .unwrap_or(f64::NAN)
    };

    if negative { -magnitude } else { magnitude }
}

/// Slow path for precisions beyond the scaled-integer table.
///
/// `core::fmt` formats the exact binary value with ties to even, and
/// `str::parse` returns the nearest double.
fn round_via_format(value: f64, precision: u32) -> f64 {
    let rounded = format!("{:.*}", precision as usize, value)
        .parse::<f64>()
        .unwrap_or(value);
    if rounded == 0.0 { 0.0 } else { rounded }
}
