use std::f64::consts;

use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::{
        namespace::core::{Arity, Constant, static_namespace},
        value::core::Value,
    },
    util::num::f64_to_i64_checked,
};

static_namespace! {
    /// The general-purpose math library, consulted for every evaluation.
    pub static MATH = "math" {
        constants: {
            "pi"  => Constant::Real(consts::PI),
            "e"   => Constant::Real(consts::E),
            "tau" => Constant::Real(consts::TAU),
            "inf" => Constant::Real(f64::INFINITY),
            "nan" => Constant::Real(f64::NAN),
        },
        functions: {
            "sin"      => { arity: Arity::Exact(1), func: sin },
            "cos"      => { arity: Arity::Exact(1), func: cos },
            "tan"      => { arity: Arity::Exact(1), func: tan },
            "asin"     => { arity: Arity::Exact(1), func: asin },
            "acos"     => { arity: Arity::Exact(1), func: acos },
            "atan"     => { arity: Arity::Exact(1), func: atan },
            "atan2"    => { arity: Arity::Exact(2), func: atan2 },
            "sinh"     => { arity: Arity::Exact(1), func: sinh },
            "cosh"     => { arity: Arity::Exact(1), func: cosh },
            "tanh"     => { arity: Arity::Exact(1), func: tanh },
            "asinh"    => { arity: Arity::Exact(1), func: asinh },
            "acosh"    => { arity: Arity::Exact(1), func: acosh },
            "atanh"    => { arity: Arity::Exact(1), func: atanh },
            "exp"      => { arity: Arity::Exact(1), func: exp },
            "expm1"    => { arity: Arity::Exact(1), func: expm1 },
            "log"      => { arity: Arity::OneOf(&[1, 2]), func: log },
            "log2"     => { arity: Arity::Exact(1), func: log2 },
            "log10"    => { arity: Arity::Exact(1), func: log10 },
            "log1p"    => { arity: Arity::Exact(1), func: log1p },
            "sqrt"     => { arity: Arity::Exact(1), func: sqrt },
            "pow"      => { arity: Arity::Exact(2), func: pow },
            "fabs"     => { arity: Arity::Exact(1), func: fabs },
            "hypot"    => { arity: Arity::AtLeast(0), func: hypot },
            "copysign" => { arity: Arity::Exact(2), func: copysign },
            "fmod"     => { arity: Arity::Exact(2), func: fmod },
            "degrees"  => { arity: Arity::Exact(1), func: degrees },
            "radians"  => { arity: Arity::Exact(1), func: radians },
            "ceil"     => { arity: Arity::Exact(1), func: |args| to_integer(&args[0], f64::ceil) },
            "floor"    => { arity: Arity::Exact(1), func: |args| to_integer(&args[0], f64::floor) },
            "trunc"    => { arity: Arity::Exact(1), func: |args| to_integer(&args[0], f64::trunc) },
            "factorial" => { arity: Arity::Exact(1), func: factorial },
            "gcd"      => { arity: Arity::AtLeast(0), func: gcd },
            "isclose"  => { arity: Arity::Exact(2), func: isclose },
            "isfinite" => { arity: Arity::Exact(1), func: |args| Ok(args[0].as_real()?.is_finite().into()) },
            "isinf"    => { arity: Arity::Exact(1), func: |args| Ok(args[0].as_real()?.is_infinite().into()) },
            "isnan"    => { arity: Arity::Exact(1), func: |args| Ok(args[0].as_real()?.is_nan().into()) },
        },
    }
}

/// Relative tolerance used by `isclose`.
pub const REL_TOLERANCE: f64 = 1e-9;
/// Absolute tolerance used by `isclose`.
pub const ABS_TOLERANCE: f64 = 0.0;

/// How an infinite result from a finite input is reported.
#[derive(Clone, Copy)]
enum OnInfinite {
    /// The input is a pole of the function: `log(0)`, `atanh(1)`.
    Domain,
    /// The result is too large: `exp(1000)`.
    Overflow,
}

/// Checks a real result against its input.
///
/// A NaN from a non-NaN input is a domain error; an infinite result from
/// finite input is reported according to `on_infinite`.
fn checked(name: &str, inputs: &[f64], result: f64, on_infinite: OnInfinite) -> CalcResult<Value> {
    if result.is_nan() && !inputs.iter().any(|x| x.is_nan()) {
        return Err(ErrorKind::domain(name).into());
    }
    if result.is_infinite() && inputs.iter().all(|x| x.is_finite()) {
        return Err(match on_infinite {
                       OnInfinite::Domain => ErrorKind::domain(name),
                       OnInfinite::Overflow => ErrorKind::overflow(format!("result of {name} is too large")),
                   }.into());
    }
    Ok(Value::Real(result))
}

/// Generates a one-argument real function.
///
/// The argument is converted to `f64`, the method of the same role on `f64`
/// is applied, and the result goes through [`checked`].
///
/// # Example
/// ```
/// use infixcalc::interpreter::{namespace::math::sin, value::core::Value};
///
/// let x = Value::Real(std::f64::consts::PI / 2.0);
/// assert_eq!(sin(&[x]).unwrap(), Value::Real(1.0));
/// ```
macro_rules! real_function {
    ($fname:ident, $real_fn:ident) => {
        real_function!($fname, $real_fn, OnInfinite::Domain);
    };
    ($fname:ident, $real_fn:ident, $on_infinite:expr) => {
        pub fn $fname(args: &[Value]) -> CalcResult<Value> {
            let x = args[0].as_real()?;
            checked(stringify!($fname), &[x], x.$real_fn(), $on_infinite)
        }
    };
}

real_function!(sin, sin);
real_function!(cos, cos);
real_function!(tan, tan);
real_function!(asin, asin);
real_function!(acos, acos);
real_function!(atan, atan);
real_function!(sinh, sinh, OnInfinite::Overflow);
real_function!(cosh, cosh, OnInfinite::Overflow);
real_function!(tanh, tanh);
real_function!(asinh, asinh);
real_function!(acosh, acosh);
real_function!(atanh, atanh);
real_function!(exp, exp, OnInfinite::Overflow);
real_function!(expm1, exp_m1, OnInfinite::Overflow);
real_function!(log2, log2);
real_function!(log10, log10);
real_function!(log1p, ln_1p);
real_function!(fabs, abs);
real_function!(degrees, to_degrees, OnInfinite::Overflow);
real_function!(radians, to_radians);

/// Square root. Negative arguments are a domain error.
pub fn sqrt(args: &[Value]) -> CalcResult<Value> {
    let x = args[0].as_real()?;
    if x < 0.0 {
        return Err(ErrorKind::domain("sqrt").into());
    }
    Ok(Value::Real(x.sqrt()))
}

/// Natural logarithm, or logarithm to `base` when a second argument is
/// given.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{namespace::math::log, value::core::Value};
///
/// assert_eq!(log(&[Value::Integer(1)]).unwrap(), Value::Real(0.0));
/// assert_eq!(log(&[Value::Integer(8), Value::Integer(2)]).unwrap(), Value::Real(3.0));
/// assert!(log(&[Value::Integer(0)]).is_err());
/// ```
pub fn log(args: &[Value]) -> CalcResult<Value> {
    let x = args[0].as_real()?;
    if x <= 0.0 {
        return Err(ErrorKind::domain("log").into());
    }

    let Some(base) = args.get(1) else {
        return Ok(Value::Real(x.ln()));
    };
    let base = base.as_real()?;
    if base <= 0.0 {
        return Err(ErrorKind::domain("log").into());
    }
    if base == 1.0 {
        return Err(ErrorKind::DivisionByZero.into());
    }
    // Exact powers of two stay exact through log2.
    Ok(Value::Real(x.log2() / base.log2()))
}

pub fn atan2(args: &[Value]) -> CalcResult<Value> {
    let (y, x) = (args[0].as_real()?, args[1].as_real()?);
    Ok(Value::Real(y.atan2(x)))
}

/// Real exponentiation. Always yields a real, even for integer arguments.
pub fn pow(args: &[Value]) -> CalcResult<Value> {
    let (x, y) = (args[0].as_real()?, args[1].as_real()?);
    if x == 0.0 && y < 0.0 {
        return Err(ErrorKind::domain("pow").into());
    }
    checked("pow", &[x, y], x.powf(y), OnInfinite::Overflow)
}

/// Euclidean norm of any number of coordinates.
pub fn hypot(args: &[Value]) -> CalcResult<Value> {
    let coordinates = args.iter().map(Value::as_real).collect::<CalcResult<Vec<_>>>()?;
    let norm = coordinates.iter().fold(0.0_f64, |acc, x| acc.hypot(*x));
    checked("hypot", &coordinates, norm, OnInfinite::Overflow)
}

pub fn copysign(args: &[Value]) -> CalcResult<Value> {
    let (x, y) = (args[0].as_real()?, args[1].as_real()?);
    Ok(Value::Real(x.copysign(y)))
}

/// Remainder of `x / y` with the sign of `x`. A zero divisor is a domain
/// error.
pub fn fmod(args: &[Value]) -> CalcResult<Value> {
    let (x, y) = (args[0].as_real()?, args[1].as_real()?);
    checked("fmod", &[x, y], x % y, OnInfinite::Domain)
}

/// Rounds with `round` and returns an integer. Integers pass through.
fn to_integer(value: &Value, round: fn(f64) -> f64) -> CalcResult<Value> {
    match value {
        Value::Integer(_) => Ok(value.clone()),
        Value::Bool(b) => Ok(Value::Integer(i64::from(*b))),
        _ => Ok(Value::Integer(f64_to_i64_checked(round(value.as_real()?))?)),
    }
}

/// `n!` for non-negative integers.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{namespace::math::factorial, value::core::Value};
///
/// assert_eq!(factorial(&[Value::Integer(5)]).unwrap(), Value::Integer(120));
/// assert_eq!(factorial(&[Value::Integer(0)]).unwrap(), Value::Integer(1));
/// assert!(factorial(&[Value::Integer(-1)]).is_err());
/// assert!(factorial(&[Value::Integer(21)]).is_err());
/// ```
pub fn factorial(args: &[Value]) -> CalcResult<Value> {
    let n = args[0].as_integer()?;
    if n < 0 {
        return Err(ErrorKind::domain("factorial").into());
    }
    (2..=n).try_fold(1_i64, i64::checked_mul)
           .map(Value::Integer)
           .ok_or_else(|| ErrorKind::overflow(format!("{n}! does not fit in 64 bits")).into())
}

/// Greatest common divisor of any number of integers; `gcd()` is `0`.
pub fn gcd(args: &[Value]) -> CalcResult<Value> {
    let mut result = 0_u64;
    for arg in args {
        let mut b = arg.as_integer()?.unsigned_abs();
        let mut a = result;
        while b != 0 {
            (a, b) = (b, a % b);
        }
        result = a;
    }
    i64::try_from(result).map(Value::Integer)
                         .map_err(|_| ErrorKind::overflow("gcd does not fit in 64 bits").into())
}

/// Approximate equality with the default tolerances.
pub fn isclose(args: &[Value]) -> CalcResult<Value> {
    let (a, b) = (args[0].as_real()?, args[1].as_real()?);
    if a == b {
        return Ok(Value::Bool(true));
    }
    if a.is_infinite() || b.is_infinite() {
        return Ok(Value::Bool(false));
    }
    let tolerance = (REL_TOLERANCE * a.abs().max(b.abs())).max(ABS_TOLERANCE);
    Ok(Value::Bool((a - b).abs() <= tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::namespace::core::{Namespace, Symbol};

    fn call(name: &str, args: &[Value]) -> CalcResult<Value> {
        match MATH.lookup(name) {
            Some(Symbol::Function(function)) => function.call(args),
            other => panic!("{name} is not a function: {other:?}"),
        }
    }

    fn kind(name: &str, args: &[Value]) -> &'static str {
        call(name, args).unwrap_err().kind.name()
    }

    #[test]
    fn trigonometry_at_zero() {
        assert_eq!(call("sin", &[0.into()]).unwrap(), Value::Real(0.0));
        assert_eq!(call("cos", &[0.into()]).unwrap(), Value::Real(1.0));
        assert_eq!(call("atan2", &[0.into(), 1.into()]).unwrap(), Value::Real(0.0));
    }

    #[test]
    fn domain_errors() {
        assert_eq!(kind("sqrt", &[(-1).into()]), "MathDomain");
        assert_eq!(kind("log", &[0.into()]), "MathDomain");
        assert_eq!(kind("asin", &[2.into()]), "MathDomain");
        assert_eq!(kind("atanh", &[1.into()]), "MathDomain");
        assert_eq!(kind("fmod", &[1.into(), 0.into()]), "MathDomain");
        assert_eq!(kind("pow", &[0.into(), (-1).into()]), "MathDomain");
    }

    #[test]
    fn overflow_errors() {
        assert_eq!(kind("exp", &[1000.into()]), "Overflow");
        assert_eq!(kind("pow", &[10.into(), 400.into()]), "Overflow");
        assert_eq!(kind("ceil", &[f64::INFINITY.into()]), "Overflow");
    }

    #[test]
    fn pow_is_always_real() {
        assert_eq!(call("pow", &[2.into(), 3.into()]).unwrap(), Value::Real(8.0));
    }

    #[test]
    fn rounding_functions_yield_integers() {
        assert_eq!(call("ceil", &[2.1.into()]).unwrap(), Value::Integer(3));
        assert_eq!(call("floor", &[(-2.1).into()]).unwrap(), Value::Integer(-3));
        assert_eq!(call("trunc", &[(-2.9).into()]).unwrap(), Value::Integer(-2));
        assert_eq!(call("floor", &[7.into()]).unwrap(), Value::Integer(7));
    }

    #[test]
    fn gcd_over_any_count() {
        assert_eq!(call("gcd", &[]).unwrap(), Value::Integer(0));
        assert_eq!(call("gcd", &[12.into(), (-18).into(), 27.into()]).unwrap(), Value::Integer(3));
    }

    #[test]
    fn wrong_argument_types_are_arity_mismatches() {
        assert_eq!(kind("factorial", &[2.5.into()]), "ArityMismatch");
        assert_eq!(kind("sin", &[Value::Tuple(vec![])]), "ArityMismatch");
        assert_eq!(kind("sin", &[1.into(), 2.into()]), "ArityMismatch");
    }

    #[test]
    fn predicates() {
        assert_eq!(call("isclose", &[0.1.into(), 0.100_000_000_01.into()]).unwrap(), Value::Bool(true));
        assert_eq!(call("isinf", &[f64::INFINITY.into()]).unwrap(), Value::Bool(true));
        assert_eq!(call("isnan", &[1.into()]).unwrap(), Value::Bool(false));
    }
}
