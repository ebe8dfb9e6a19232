/// Numeric conversion helpers.
///
/// Safe conversions between integer and floating-point types. Each helper
/// returns an error instead of silently truncating, rounding or wrapping.
pub mod num;
