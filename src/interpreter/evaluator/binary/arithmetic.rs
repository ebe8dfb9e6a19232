use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::{
        evaluator::binary::core::{Operands, promote},
        value::core::Value,
    },
};

fn integer_overflow(symbol: &str, a: i64, b: i64) -> crate::error::CalcError {
    ErrorKind::overflow(format!("{a} {symbol} {b} does not fit in 64 bits")).into()
}

/// `left + right`. Tuples concatenate.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{evaluator::binary::arithmetic::add, value::core::Value};
///
/// assert_eq!(add(&Value::Integer(3), &Value::Integer(4)).unwrap(), Value::Integer(7));
/// assert_eq!(add(&Value::Integer(1), &Value::Real(0.5)).unwrap(), Value::Real(1.5));
/// ```
pub fn add(left: &Value, right: &Value) -> CalcResult<Value> {
    if let (Value::Tuple(a), Value::Tuple(b)) = (left, right) {
        return Ok(Value::Tuple(a.iter().chain(b).cloned().collect()));
    }

    match promote("+", left, right)? {
        Operands::Integers(a, b) => a.checked_add(b)
                                     .map(Value::Integer)
                                     .ok_or_else(|| integer_overflow("+", a, b)),
        Operands::Reals(a, b) => Ok(Value::Real(a + b)),
    }
}

/// `left - right`.
pub fn sub(left: &Value, right: &Value) -> CalcResult<Value> {
    match promote("-", left, right)? {
        Operands::Integers(a, b) => a.checked_sub(b)
                                     .map(Value::Integer)
                                     .ok_or_else(|| integer_overflow("-", a, b)),
        Operands::Reals(a, b) => Ok(Value::Real(a - b)),
    }
}

/// `left * right`.
pub fn mul(left: &Value, right: &Value) -> CalcResult<Value> {
    match promote("*", left, right)? {
        Operands::Integers(a, b) => a.checked_mul(b)
                                     .map(Value::Integer)
                                     .ok_or_else(|| integer_overflow("*", a, b)),
        Operands::Reals(a, b) => Ok(Value::Real(a * b)),
    }
}

/// `left / right`. Always produces a real, even for two integers.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{evaluator::binary::arithmetic::true_div, value::core::Value};
///
/// assert_eq!(true_div(&Value::Integer(7), &Value::Integer(2)).unwrap(), Value::Real(3.5));
/// assert!(true_div(&Value::Integer(1), &Value::Integer(0)).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn true_div(left: &Value, right: &Value) -> CalcResult<Value> {
    let (a, b) = match promote("/", left, right)? {
        Operands::Integers(a, b) => (a as f64, b as f64),
        Operands::Reals(a, b) => (a, b),
    };
    if b == 0.0 {
        return Err(ErrorKind::DivisionByZero.into());
    }
    Ok(Value::Real(a / b))
}

/// `left // right`. Rounds the quotient toward negative infinity.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{evaluator::binary::arithmetic::floor_div, value::core::Value};
///
/// assert_eq!(floor_div(&Value::Integer(7), &Value::Integer(2)).unwrap(), Value::Integer(3));
/// assert_eq!(floor_div(&Value::Integer(-7), &Value::Integer(2)).unwrap(), Value::Integer(-4));
/// assert_eq!(floor_div(&Value::Real(7.5), &Value::Integer(2)).unwrap(), Value::Real(3.0));
/// ```
pub fn floor_div(left: &Value, right: &Value) -> CalcResult<Value> {
    match promote("//", left, right)? {
        Operands::Integers(_, 0) => Err(ErrorKind::DivisionByZero.into()),
        Operands::Integers(a, b) => {
            let quotient = a.checked_div(b).ok_or_else(|| integer_overflow("//", a, b))?;
            if a % b != 0 && ((a < 0) != (b < 0)) {
                Ok(Value::Integer(quotient - 1))
            } else {
                Ok(Value::Integer(quotient))
            }
        },
        Operands::Reals(_, b) if b == 0.0 => Err(ErrorKind::DivisionByZero.into()),
        Operands::Reals(a, b) => Ok(Value::Real((a / b).floor())),
    }
}

/// `left % right`. The remainder takes the sign of the divisor.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{evaluator::binary::arithmetic::modulo, value::core::Value};
///
/// assert_eq!(modulo(&Value::Integer(7), &Value::Integer(3)).unwrap(), Value::Integer(1));
/// assert_eq!(modulo(&Value::Integer(-7), &Value::Integer(3)).unwrap(), Value::Integer(2));
/// assert_eq!(modulo(&Value::Integer(7), &Value::Integer(-3)).unwrap(), Value::Integer(-2));
/// ```
pub fn modulo(left: &Value, right: &Value) -> CalcResult<Value> {
    match promote("%", left, right)? {
        Operands::Integers(_, 0) => Err(ErrorKind::DivisionByZero.into()),
        Operands::Integers(a, b) => {
            // i64::MIN % -1 overflows in Rust but is mathematically zero.
            let remainder = a.checked_rem(b).unwrap_or(0);
            if remainder != 0 && ((remainder < 0) != (b < 0)) {
                Ok(Value::Integer(remainder + b))
            } else {
                Ok(Value::Integer(remainder))
            }
        },
        Operands::Reals(_, b) if b == 0.0 => Err(ErrorKind::DivisionByZero.into()),
        Operands::Reals(a, b) => {
            let remainder = a % b;
            if remainder != 0.0 && ((remainder < 0.0) != (b < 0.0)) {
                Ok(Value::Real(remainder + b))
            } else {
                Ok(Value::Real(remainder))
            }
        },
    }
}
