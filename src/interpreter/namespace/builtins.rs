use std::cmp::Ordering;

use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::{
        evaluator::binary::{arithmetic, power},
        namespace::core::{Arity, Constant, spread, static_namespace},
        value::core::{Numeric, Value},
    },
    util::num::f64_to_i64_checked,
};

static_namespace! {
    /// The calculator's built-in names, consulted after `math`.
    pub static BUILTINS = "builtins" {
        constants: {
            "True"  => Constant::Bool(true),
            "False" => Constant::Bool(false),
        },
        functions: {
            "abs"    => { arity: Arity::Exact(1), func: abs },
            "round"  => { arity: Arity::OneOf(&[1, 2]), func: round },
            "min"    => { arity: Arity::AtLeast(1), func: |args| extremum("min", args, Ordering::Less) },
            "max"    => { arity: Arity::AtLeast(1), func: |args| extremum("max", args, Ordering::Greater) },
            "pow"    => { arity: Arity::OneOf(&[2, 3]), func: pow },
            "divmod" => { arity: Arity::Exact(2), func: divmod },
            "int"    => { arity: Arity::Exact(1), func: int },
            "float"  => { arity: Arity::Exact(1), func: |args| Ok(Value::Real(args[0].as_real()?)) },
            "bool"   => { arity: Arity::Exact(1), func: |args| Ok(Value::Bool(truthy(&args[0])?)) },
            "sum"    => { arity: Arity::AtLeast(0), func: sum },
            "len"    => { arity: Arity::Exact(1), func: len },
        },
    }
}

/// Absolute value, keeping integers integral.
pub fn abs(args: &[Value]) -> CalcResult<Value> {
    match args[0].numeric()? {
        Numeric::Integer(n) => n.checked_abs()
                                .map(Value::Integer)
                                .ok_or_else(|| ErrorKind::overflow(format!("abs({n}) does not fit in 64 bits")).into()),
        Numeric::Real(r) => Ok(Value::Real(r.abs())),
    }
}

/// Rounds half to even.
///
/// With one argument the result is an integer. With a digit count the
/// result keeps the argument's type; negative counts round to tens,
/// hundreds and so on.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{namespace::builtins::round, value::core::Value};
///
/// assert_eq!(round(&[Value::Real(2.5)]).unwrap(), Value::Integer(2));
/// assert_eq!(round(&[Value::Real(3.5)]).unwrap(), Value::Integer(4));
/// assert_eq!(round(&[Value::Real(1.23456), Value::Integer(2)]).unwrap(), Value::Real(1.23));
/// assert_eq!(round(&[Value::Integer(1250), Value::Integer(-2)]).unwrap(), Value::Integer(1200));
/// ```
pub fn round(args: &[Value]) -> CalcResult<Value> {
    let value = args[0].numeric()?;
    let Some(digits) = args.get(1) else {
        return match value {
            Numeric::Integer(n) => Ok(Value::Integer(n)),
            Numeric::Real(r) => Ok(Value::Integer(f64_to_i64_checked(r.round_ties_even())?)),
        };
    };

    let digits = digits.as_integer()?;
    match value {
        Numeric::Integer(n) if digits >= 0 => Ok(Value::Integer(n)),
        Numeric::Integer(n) => Ok(Value::Integer(round_integer(n, digits.unsigned_abs())?)),
        Numeric::Real(r) if !r.is_finite() => Ok(Value::Real(r)),
        Numeric::Real(r) => {
            let Ok(exponent) = i32::try_from(digits) else {
                return Ok(Value::Real(if digits > 0 { r } else { 0.0 }));
            };
            let scale = 10_f64.powi(exponent);
            let scaled = r * scale;
            if !scaled.is_finite() || scale == 0.0 {
                return Ok(Value::Real(if digits > 0 { r } else { 0.0 }));
            }
            Ok(Value::Real(scaled.round_ties_even() / scale))
        },
    }
}

/// Rounds an integer to a multiple of `10^places`, half to even.
fn round_integer(n: i64, places: u64) -> CalcResult<i64> {
    let Some(step) = u32::try_from(places).ok().and_then(|p| 10_i64.checked_pow(p)) else {
        return Ok(0);
    };
    let (quotient, remainder) = (n.div_euclid(step), n.rem_euclid(step));
    let round_up = match (remainder * 2).cmp(&step) {
        Ordering::Greater => true,
        Ordering::Equal => quotient % 2 != 0,
        Ordering::Less => false,
    };
    let quotient = if round_up { quotient + 1 } else { quotient };
    quotient.checked_mul(step)
            .ok_or_else(|| ErrorKind::overflow(format!("round({n}, -{places}) does not fit in 64 bits")).into())
}

/// The smallest or largest argument, or element of a single tuple
/// argument. The first of several equal candidates wins.
fn extremum(name: &str, args: &[Value], wanted: Ordering) -> CalcResult<Value> {
    let values = spread(args);
    let Some((first, rest)) = values.split_first() else {
        return Err(ErrorKind::type_error(format!("{name}() of an empty tuple")).into());
    };

    let mut best = first;
    let mut best_key = first.as_real()?;
    for value in rest {
        let key = value.as_real()?;
        if key.partial_cmp(&best_key) == Some(wanted) {
            best = value;
            best_key = key;
        }
    }
    Ok(best.clone())
}

/// `pow(x, y)` is `x ** y`; `pow(x, y, m)` is modular exponentiation over
/// integers.
pub fn pow(args: &[Value]) -> CalcResult<Value> {
    let [base, exponent, modulus] = args else {
        return power::pow(&args[0], &args[1]);
    };

    let (base, exponent, modulus) = (base.as_integer()?, exponent.as_integer()?, modulus.as_integer()?);
    if modulus == 0 || exponent < 0 {
        return Err(ErrorKind::domain("pow").into());
    }

    let modulus = i128::from(modulus);
    let mut result = 1_i128;
    let mut factor = i128::from(base).rem_euclid(modulus);
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = (result * factor).rem_euclid(modulus);
        }
        factor = (factor * factor).rem_euclid(modulus);
        exponent >>= 1;
    }
    // The result takes the sign of the modulus, like `%`.
    if modulus < 0 && result > 0 {
        result += modulus;
    }
    i64::try_from(result).map(Value::Integer)
                         .map_err(|_| ErrorKind::overflow("pow result does not fit in 64 bits").into())
}

/// `(a // b, a % b)`.
pub fn divmod(args: &[Value]) -> CalcResult<Value> {
    let quotient = arithmetic::floor_div(&args[0], &args[1])?;
    let remainder = arithmetic::modulo(&args[0], &args[1])?;
    Ok(Value::Tuple(vec![quotient, remainder]))
}

/// Converts to an integer, truncating reals toward zero.
pub fn int(args: &[Value]) -> CalcResult<Value> {
    match args[0].numeric()? {
        Numeric::Integer(n) => Ok(Value::Integer(n)),
        Numeric::Real(r) => Ok(Value::Integer(f64_to_i64_checked(r.trunc())?)),
    }
}

/// Zero and the empty tuple are false; everything else is true.
fn truthy(value: &Value) -> CalcResult<bool> {
    match value {
        Value::Tuple(items) => Ok(!items.is_empty()),
        _ => Ok(value.as_real()? != 0.0),
    }
}

/// Adds the arguments, or the elements of a single tuple argument.
pub fn sum(args: &[Value]) -> CalcResult<Value> {
    spread(args).iter()
                .try_fold(Value::Integer(0), |total, value| arithmetic::add(&total, value))
}

/// Number of elements of a tuple.
pub fn len(args: &[Value]) -> CalcResult<Value> {
    let items = args[0].as_tuple()?;
    i64::try_from(items.len()).map(Value::Integer)
                              .map_err(|_| ErrorKind::overflow("tuple length").into())
}
