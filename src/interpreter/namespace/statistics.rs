use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::{
        namespace::core::{Arity, reals, spread, static_namespace},
        value::core::Value,
    },
    util::num::usize_to_f64_checked,
};

static_namespace! {
    /// Descriptive statistics, available through `-m statistics`.
    ///
    /// Every function accepts its data either as separate arguments or as a
    /// single tuple: `mean(1, 2, 3)` and `mean((1, 2, 3))` agree.
    pub static STATISTICS = "statistics" {
        constants: {},
        functions: {
            "mean"      => { arity: Arity::AtLeast(1), func: mean },
            "median"    => { arity: Arity::AtLeast(1), func: median },
            "pvariance" => { arity: Arity::AtLeast(1), func: |args| variance_of(args, 0).map(Value::Real) },
            "variance"  => { arity: Arity::AtLeast(1), func: |args| variance_of(args, 1).map(Value::Real) },
            "pstdev"    => { arity: Arity::AtLeast(1), func: |args| variance_of(args, 0).map(|v| Value::Real(v.sqrt())) },
            "stdev"     => { arity: Arity::AtLeast(1), func: |args| variance_of(args, 1).map(|v| Value::Real(v.sqrt())) },
        },
    }
}

/// Collects the data points, requiring at least `minimum` of them.
fn data(name: &str, args: &[Value], minimum: usize) -> CalcResult<Vec<f64>> {
    let data = reals(spread(args))?;
    if data.len() < minimum {
        return Err(ErrorKind::type_error(format!("{name} requires at least {minimum} data point(s)")).into());
    }
    Ok(data)
}

fn average(data: &[f64]) -> CalcResult<f64> {
    Ok(data.iter().sum::<f64>() / usize_to_f64_checked(data.len())?)
}

/// Arithmetic mean.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{namespace::statistics::mean, value::core::Value};
///
/// let data = [Value::Integer(1), Value::Integer(2), Value::Integer(6)];
/// assert_eq!(mean(&data).unwrap(), Value::Real(3.0));
/// ```
pub fn mean(args: &[Value]) -> CalcResult<Value> {
    let data = data("mean", args, 1)?;
    Ok(Value::Real(average(&data)?))
}

/// Middle value. An odd count yields the middle data point itself; an even
/// count yields the mean of the two middle points.
pub fn median(args: &[Value]) -> CalcResult<Value> {
    let values = spread(args);
    let keys = data("median", args, 1)?;

    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));

    let middle = order.len() / 2;
    if order.len() % 2 == 1 {
        return Ok(values[order[middle]].clone());
    }
    Ok(Value::Real((keys[order[middle - 1]] + keys[order[middle]]) / 2.0))
}

/// Variance with `ddof` delta degrees of freedom: `0` for the population,
/// `1` for a sample.
fn variance_of(args: &[Value], ddof: usize) -> CalcResult<f64> {
    let name = if ddof == 0 { "pvariance" } else { "variance" };
    let data = data(name, args, ddof + 1)?;
    let mean = average(&data)?;
    let squares = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
    Ok(squares / usize_to_f64_checked(data.len() - ddof)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::namespace::core::{Namespace, Symbol};

    fn call(name: &str, args: &[Value]) -> CalcResult<Value> {
        match STATISTICS.lookup(name) {
            Some(Symbol::Function(function)) => function.call(args),
            other => panic!("{name} is not a function: {other:?}"),
        }
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_eq!(call("median", &ints(&[3, 1, 2])).unwrap(), Value::Integer(2));
        assert_eq!(call("median", &ints(&[4, 1, 3, 2])).unwrap(), Value::Real(2.5));
    }

    #[test]
    fn sample_and_population_variance() {
        let data = ints(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_eq!(call("pvariance", &data).unwrap(), Value::Real(4.0));
        assert_eq!(call("pstdev", &data).unwrap(), Value::Real(2.0));
        assert_eq!(call("variance", &ints(&[1, 3])).unwrap(), Value::Real(2.0));
    }

    #[test]
    fn tuple_argument_is_the_data() {
        let tuple = [Value::Tuple(ints(&[1, 2, 3]))];
        assert_eq!(call("mean", &tuple).unwrap(), Value::Real(2.0));
    }

    #[test]
    fn too_few_points_is_an_arity_mismatch() {
        let err = call("stdev", &ints(&[1])).unwrap_err();
        assert_eq!(err.kind.name(), "ArityMismatch");
        assert!(call("mean", &[Value::Tuple(vec![])]).is_err());
    }
}
