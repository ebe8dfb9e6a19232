/// Operand promotion shared by every operator.
pub mod core;

/// Addition, subtraction, multiplication and the three division operators.
///
/// Integer arithmetic is checked; `/` always yields a real; `//` and `%`
/// round toward negative infinity so the remainder takes the divisor's sign.
pub mod arithmetic;

/// Exponentiation.
pub mod power;

/// Relational and equality operators.
pub mod comparison;
