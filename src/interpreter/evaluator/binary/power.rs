use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::{
        evaluator::binary::core::{Operands, finite_result, promote},
        value::core::Value,
    },
    util::num::i64_to_u32_checked,
};

/// Evaluates `base ** exponent`.
///
/// Integer–integer exponentiation uses checked arithmetic. Negative integer
/// exponents are computed in floating-point form. Zero raised to a negative
/// power is a division by zero; a negative real base with a fractional
/// exponent has no real result.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{evaluator::binary::power::pow, value::core::Value};
///
/// assert_eq!(pow(&Value::Integer(2), &Value::Integer(10)).unwrap(), Value::Integer(1024));
/// assert_eq!(pow(&Value::Integer(2), &Value::Integer(-1)).unwrap(), Value::Real(0.5));
/// assert!(pow(&Value::Integer(0), &Value::Integer(-1)).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn pow(base: &Value, exponent: &Value) -> CalcResult<Value> {
    match promote("**", base, exponent)? {
        // Powers of 0, 1 and -1 never grow, whatever the exponent.
        Operands::Integers(b @ -1..=1, e) if e > 0 => {
            Ok(Value::Integer(if b == -1 && e % 2 == 0 { 1 } else { b }))
        },
        Operands::Integers(b, e) if e >= 0 => {
            b.checked_pow(i64_to_u32_checked(e)?)
             .map(Value::Integer)
             .ok_or_else(|| ErrorKind::overflow(format!("{b} ** {e} does not fit in 64 bits")).into())
        },
        Operands::Integers(b, e) => real_pow(b as f64, e as f64),
        Operands::Reals(b, e) => real_pow(b, e),
    }
}

fn real_pow(base: f64, exponent: f64) -> CalcResult<Value> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ErrorKind::DivisionByZero.into());
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(ErrorKind::domain("**").into());
    }
    finite_result("**", base, exponent, base.powf(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_bases_accept_huge_exponents() {
        let huge = Value::Integer(5_000_000_000);
        assert_eq!(pow(&Value::Integer(1), &huge).unwrap(), Value::Integer(1));
        assert_eq!(pow(&Value::Integer(0), &huge).unwrap(), Value::Integer(0));
        assert_eq!(pow(&Value::Integer(-1), &huge).unwrap(), Value::Integer(1));
        assert_eq!(pow(&Value::Integer(-1), &Value::Integer(5_000_000_001)).unwrap(), Value::Integer(-1));
        assert_eq!(pow(&Value::Integer(0), &Value::Integer(0)).unwrap(), Value::Integer(1));
    }

    #[test]
    fn other_bases_still_overflow() {
        let err = pow(&Value::Integer(2), &Value::Integer(5_000_000_000)).unwrap_err();
        assert_eq!(err.kind.name(), "Overflow");
        assert_eq!(pow(&Value::Integer(2), &Value::Integer(64)).unwrap_err().kind.name(), "Overflow");
    }
}
