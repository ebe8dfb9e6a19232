use std::cmp::Ordering;

use crate::{
    error::CalcResult,
    interpreter::{
        evaluator::binary::core::{Operands, promote},
        value::core::Value,
    },
};

/// Orders two numeric values. Integers compare exactly; anything involving a
/// real compares as floats, so NaN is unordered.
fn order(symbol: &str, left: &Value, right: &Value) -> CalcResult<Option<Ordering>> {
    Ok(match promote(symbol, left, right)? {
        Operands::Integers(a, b) => Some(a.cmp(&b)),
        Operands::Reals(a, b) => a.partial_cmp(&b),
    })
}

/// `left < right`.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{evaluator::binary::comparison::lt, value::core::Value};
///
/// assert_eq!(lt(&Value::Integer(2), &Value::Real(2.5)).unwrap(), Value::Bool(true));
/// ```
pub fn lt(left: &Value, right: &Value) -> CalcResult<Value> {
    Ok(Value::Bool(order("<", left, right)? == Some(Ordering::Less)))
}

/// `left <= right`.
pub fn le(left: &Value, right: &Value) -> CalcResult<Value> {
    Ok(Value::Bool(matches!(order("<=", left, right)?, Some(Ordering::Less | Ordering::Equal))))
}

/// `left > right`.
pub fn gt(left: &Value, right: &Value) -> CalcResult<Value> {
    Ok(Value::Bool(order(">", left, right)? == Some(Ordering::Greater)))
}

/// `left >= right`.
pub fn ge(left: &Value, right: &Value) -> CalcResult<Value> {
    Ok(Value::Bool(matches!(order(">=", left, right)?,
                            Some(Ordering::Greater | Ordering::Equal))))
}

/// `left == right`. Never fails: values of unrelated types are simply unequal.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{evaluator::binary::comparison::eq, value::core::Value};
///
/// assert_eq!(eq(&Value::Integer(1), &Value::Real(1.0)).unwrap(), Value::Bool(true));
/// assert_eq!(eq(&Value::Integer(1), &Value::Tuple(vec![])).unwrap(), Value::Bool(false));
/// ```
pub fn eq(left: &Value, right: &Value) -> CalcResult<Value> {
    Ok(Value::Bool(left.loosely_equals(right)))
}

/// `left != right`.
pub fn ne(left: &Value, right: &Value) -> CalcResult<Value> {
    Ok(Value::Bool(!left.loosely_equals(right)))
}
