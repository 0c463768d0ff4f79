/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Returns
/// - `Ok(f64)`: The converted value if it is safe.
/// - `Err(error)`: If the value is too large.
///
/// ## Example
/// ```
/// use matcalc::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// // Works for safe values
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// // Fails for values outside safe range
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `i64` to a `usize` if and only if it can be represented
/// exactly.
///
/// ## Errors
/// Returns `Err(error)` if the value is negative or exceeds the maximum
/// representable `usize`.
///
/// ## Example
/// ```
/// use matcalc::util::num::i64_to_usize_checked;
///
/// assert_eq!(i64_to_usize_checked(42, "bad").unwrap(), 42);
/// assert!(i64_to_usize_checked(-1, "bad").is_err());
/// ```
pub fn i64_to_usize_checked<E>(value: i64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}

/// Rounds to the nearest integer, with halves going towards positive infinity.
///
/// This is the rounding applied whenever a number is stored with the
/// `Integer` element type. Ties round up (`2.5 -> 3`, `-2.5 -> -2`), so the
/// result never depends on the sign of the input.
///
/// ## Example
/// ```
/// use matcalc::util::num::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(1.2), 1.0);
/// assert_eq!(round_half_up(0.499_999_999_999_999_94), 0.0);
/// ```
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Formats an integral `f64` without a decimal point.
///
/// Negative zero prints as `0`.
///
/// ## Example
/// ```
/// use matcalc::util::num::format_integral;
///
/// assert_eq!(format_integral(42.0), "42");
/// assert_eq!(format_integral(-0.0), "0");
/// assert_eq!(format_integral(-7.0), "-7");
/// ```
#[must_use]
pub fn format_integral(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value:.0}")
}

/// Formats a `Float` value as the shortest string that reads back to the same
/// `f64`, always with a decimal point.
///
/// Very large and very small magnitudes use exponent form; the mantissa still
/// carries a point.
///
/// ## Example
/// ```
/// use matcalc::util::num::format_float;
///
/// assert_eq!(format_float(2.0), "2.0");
/// assert_eq!(format_float(0.75), "0.75");
/// assert_eq!(format_float(1e16), "1.0e16");
/// assert_eq!(format_float(-1.5e-7), "-1.5e-7");
/// assert_eq!(format_float(1e-5), "1.0e-5");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => format!("{mantissa}.0e{exponent}"),
        _ => repr,
    }
}
