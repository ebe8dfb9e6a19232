use crate::error::{CalcResult, ErrorKind};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Overflow` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use infixcalc::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(100).unwrap(), 100.0);
///
/// let too_big = (MAX_SAFE_U64_INT + 1) as usize;
/// assert!(usize_to_f64_checked(too_big).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize) -> CalcResult<f64> {
    if value as u64 > MAX_SAFE_U64_INT {
        return Err(ErrorKind::overflow(format!("{value} has no exact float representation")).into());
    }

    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// ## Errors
/// - `Overflow` for infinite or out-of-range values.
/// - `MathDomain` for NaN.
/// - `TypeError` for fractional values.
///
/// ## Example
/// ```
/// use infixcalc::{error::ErrorKind, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0).unwrap(), 1000);
///
/// let err = f64_to_i64_checked(1.5).unwrap_err();
/// assert!(matches!(err.kind, ErrorKind::TypeError { .. }));
///
/// let err = f64_to_i64_checked(1e20).unwrap_err();
/// assert!(matches!(err.kind, ErrorKind::Overflow { .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64) -> CalcResult<i64> {
    if value.is_nan() {
        return Err(ErrorKind::domain("float to integer conversion").into());
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if value.is_infinite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(ErrorKind::overflow(format!("cannot convert {value} to an integer")).into());
    }
    if value.fract() != 0.0 {
        return Err(ErrorKind::type_error(format!("{value} is not an integral value")).into());
    }
    Ok(value as i64)
}

/// Safely converts an `i64` to `u32` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Overflow` for values above `u32::MAX` and `MathDomain` for
/// negative values.
///
/// ## Example
/// ```
/// use infixcalc::util::num::i64_to_u32_checked;
///
/// assert_eq!(i64_to_u32_checked(45).unwrap(), 45);
/// assert!(i64_to_u32_checked(-1).is_err());
/// assert!(i64_to_u32_checked(i64::MAX).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn i64_to_u32_checked(value: i64) -> CalcResult<u32> {
    if value < 0 {
        return Err(ErrorKind::domain("negative exponent").into());
    }
    u32::try_from(value).map_err(|_| ErrorKind::overflow(format!("exponent {value} is too large")).into())
}
