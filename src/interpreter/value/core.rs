use crate::error::{CalcResult, ErrorKind};

/// Represents a runtime value in the calculator.
///
/// Every literal, constant, function result and operator result is one of
/// these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64 bit integer value.
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A boolean value, produced by comparison operators and `bool()`.
    /// Takes part in arithmetic as `0` or `1`.
    Bool(bool),
    /// An ordered group of values. Produced by functions such as `divmod` and
    /// by a bracketed argument list that is not applied to a function.
    Tuple(Vec<Self>),
}

/// A value reduced to one of the two numeric representations.
///
/// Booleans collapse to integers; tuples have no numeric form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Real(f64),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Tuple(v)
    }
}

impl Value {
    /// Returns the numeric form of the value.
    ///
    /// # Returns
    /// - `Ok(Numeric)`: For integers, reals and booleans.
    /// - `Err(ErrorKind::TypeError)`: For tuples.
    pub fn numeric(&self) -> CalcResult<Numeric> {
        match self {
            Self::Integer(i) => Ok(Numeric::Integer(*i)),
            Self::Real(r) => Ok(Numeric::Real(*r)),
            Self::Bool(b) => Ok(Numeric::Integer(i64::from(*b))),
            Self::Tuple(_) => Err(ErrorKind::type_error(format!("expected a number, found {}", self.type_name())).into()),
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Integers convert the way a float cast does; values beyond `2^53` lose
    /// their lowest digits, exactly as they would in any float arithmetic.
    ///
    /// # Example
    /// ```
    /// use infixcalc::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real().unwrap(), 10.0);
    /// assert_eq!(Value::Bool(true).as_real().unwrap(), 1.0);
    /// assert!(Value::Tuple(vec![]).as_real().is_err());
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(&self) -> CalcResult<f64> {
        match self.numeric()? {
            Numeric::Integer(i) => Ok(i as f64),
            Numeric::Real(r) => Ok(r),
        }
    }

    /// Converts the value to `i64`, or returns an error if it is not an
    /// integer or a boolean.
    pub fn as_integer(&self) -> CalcResult<i64> {
        match self.numeric()? {
            Numeric::Integer(i) => Ok(i),
            Numeric::Real(r) => Err(ErrorKind::type_error(format!("expected an integer, found {r}")).into()),
        }
    }

    /// Returns the tuple elements, or an error if the value is not a tuple.
    pub fn as_tuple(&self) -> CalcResult<&[Self]> {
        match self {
            Self::Tuple(items) => Ok(items),
            _ => Err(ErrorKind::type_error(format!("expected a tuple, found {}", self.type_name())).into()),
        }
    }

    /// Returns a short name of the value's type for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Real(_) => "float",
            Self::Bool(_) => "bool",
            Self::Tuple(_) => "tuple",
        }
    }

    /// Compares two values by meaning rather than by representation:
    /// `1 == 1.0 == True`, and tuples compare element by element.
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Tuple(a), Self::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_equals(y))
            },
            (Self::Tuple(_), _) | (_, Self::Tuple(_)) => false,
            _ => match (self.numeric(), other.numeric()) {
                (Ok(Numeric::Integer(a)), Ok(Numeric::Integer(b))) => a == b,
                _ => matches!((self.as_real(), other.as_real()), (Ok(a), Ok(b)) if a == b),
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => {
                if r.is_nan() {
                    write!(f, "nan")
                } else if r.is_infinite() {
                    write!(f, "{}", if *r > 0.0 { "inf" } else { "-inf" })
                } else if *r != 0.0 && !(1e-4..1e16).contains(&r.abs()) {
                    write_scientific(f, *r)
                } else if r.fract() == 0.0 {
                    write!(f, "{r:.1}")
                } else {
                    write!(f, "{r}")
                }
            },
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Tuple(items) => {
                write!(f, "(")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Writes very large or very small reals in exponent form with a signed,
/// two-digit exponent: `1e+16`, `2.5e-07`.
fn write_scientific(f: &mut std::fmt::Formatter<'_>, r: f64) -> std::fmt::Result {
    let text = format!("{r:e}");
    match text.split_once('e').map(|(mantissa, exponent)| (mantissa, exponent.parse::<i32>())) {
        Some((mantissa, Ok(exponent))) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        },
        _ => write!(f, "{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_calculator_output() {
        assert_eq!(Value::Integer(512).to_string(), "512");
        assert_eq!(Value::Real(8.0).to_string(), "8.0");
        assert_eq!(Value::Real(-0.5).to_string(), "-0.5");
        assert_eq!(Value::Real(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Bool(false).to_string(), "False");
        assert_eq!(Value::Tuple(vec![3.into(), 1.into()]).to_string(), "(3, 1)");
        assert_eq!(Value::Tuple(vec![3.into()]).to_string(), "(3,)");
    }

    #[test]
    fn large_and_tiny_reals_use_exponent_form() {
        assert_eq!(Value::Real(1e16).to_string(), "1e+16");
        assert_eq!(Value::Real(-1.5e20).to_string(), "-1.5e+20");
        assert_eq!(Value::Real(2.5e-7).to_string(), "2.5e-07");
        assert_eq!(Value::Real(1e300).to_string(), "1e+300");
        assert_eq!(Value::Real(9_999_999_999_999_998.0).to_string(), "9999999999999998.0");
        assert_eq!(Value::Real(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Real(0.0).to_string(), "0.0");
    }

    #[test]
    fn loose_equality_crosses_numeric_types() {
        assert!(Value::Integer(1).loosely_equals(&Value::Real(1.0)));
        assert!(Value::Bool(true).loosely_equals(&Value::Integer(1)));
        assert!(!Value::Integer(1).loosely_equals(&Value::Tuple(vec![1.into()])));
        assert!(Value::Tuple(vec![1.into(), 2.5.into()]).loosely_equals(&Value::Tuple(vec![1.0.into(), 2.5.into()])));
    }
}
