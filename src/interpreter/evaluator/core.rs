use tracing::debug;

use crate::{
    ast::Token,
    error::{CalcError, CalcResult, ErrorKind},
    interpreter::{
        evaluator::explore::Reduced,
        namespace::{
            core::Function,
            registry::{NamespaceRef, NamespaceRegistry, Namespaces},
        },
        value::core::Value,
    },
};

/// Default limit on bracket nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Highest nesting limit the command line accepts. Both stages recurse once
/// per level, so the limit also bounds stack use.
pub const MAX_DEPTH_CEILING: usize = 1024;

/// Options shared by the structurer and the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Deepest bracket nesting accepted before failing with
    /// `NestingTooDeep`.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Evaluates structured tokens into a single value.
///
/// A `Reducer` owns everything one evaluation mutates: the stack of functions
/// waiting for their argument list. The resolved namespace list is read-only.
/// Independent evaluations must each use their own `Reducer`, which makes
/// running them on separate threads safe.
///
/// ## Usage
///
/// Most callers use [`evaluate`] or [`crate::calculate`]. Build a `Reducer`
/// directly to supply a custom [`NamespaceRegistry`] or [`EvalOptions`].
#[derive(Debug)]
pub struct Reducer {
    pub(in crate::interpreter::evaluator) expression: String,
    pub(in crate::interpreter::evaluator) namespaces: Namespaces,
    /// Functions whose argument list has not been reduced yet, most recent
    /// last.
    pub(in crate::interpreter::evaluator) functions:  Vec<Function>,
    pub(in crate::interpreter::evaluator) options:    EvalOptions,
}

impl Reducer {
    /// Creates a reducer for one expression.
    ///
    /// `expression` is only used to annotate errors.
    #[must_use]
    pub fn new(expression: impl Into<String>, namespaces: Namespaces, options: EvalOptions) -> Self {
        Self { expression: expression.into(),
               namespaces,
               functions: Vec::new(),
               options }
    }

    /// Reduces a structured expression to its value.
    ///
    /// The token sequence is validated first, then explored depth-first and
    /// folded by operator priority. A top-level comma list becomes a tuple.
    ///
    /// # Errors
    /// - `EmptyExpression` if there are no tokens.
    /// - `MalformedExpression` for a dangling operator, an operator with a
    ///   single neighbor, unreadable literals or a function name with no
    ///   argument list.
    /// - `UnknownSymbol`, `ArityMismatch`, `MissingOperand` and the
    ///   arithmetic failures raised while folding.
    ///
    /// Every error except an empty input carries the expression text.
    pub fn evaluate(&mut self, tokens: &[Token]) -> CalcResult<Value> {
        self.functions.clear();

        let result = validate(tokens).and_then(|()| self.reduce_level(tokens, 0))
                                     .and_then(|reduced| match reduced {
                                         Reduced::Value(value) => Ok(value),
                                         Reduced::Args(values) => Ok(Value::Tuple(values)),
                                         Reduced::Empty => Err(ErrorKind::EmptyExpression.into()),
                                     });

        result.map_err(|err| self.annotate(err))
    }

    fn annotate(&self, err: CalcError) -> CalcError {
        debug!(expression = %self.expression, kind = err.kind.name(), "evaluation failed");
        if err.kind == ErrorKind::EmptyExpression && self.expression.trim().is_empty() {
            return err;
        }
        err.with_expression(&self.expression)
    }
}

/// Checks a top-level token sequence before any reduction.
fn validate(tokens: &[Token]) -> CalcResult<()> {
    match tokens {
        [] => Err(ErrorKind::EmptyExpression.into()),
        [.., Token::Operator(symbol)] => {
            Err(ErrorKind::malformed(format!("expression ends with operator '{symbol}'")).into())
        },
        [a, b] if a.is_operator() || b.is_operator() => {
            Err(ErrorKind::malformed("binary operator is missing an operand").into())
        },
        _ => Ok(()),
    }
}

/// Evaluates structured tokens against the standard namespaces.
///
/// `namespaces` are consulted first, in order, followed by `math` and
/// `builtins`. Named references are looked up in the standard registry.
///
/// # Errors
/// See [`Reducer::evaluate`]. An unregistered namespace name fails with
/// `UnknownNamespace`.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{
///     evaluator::core::evaluate,
///     parser::core::structure,
///     value::core::Value,
/// };
///
/// let expression = "2**3**2";
/// let tokens = structure(expression).unwrap();
/// assert_eq!(evaluate(expression, &tokens, &[]).unwrap(), Value::Integer(512));
///
/// let tokens = structure("1+").unwrap();
/// let err = evaluate("1+", &tokens, &[]).unwrap_err();
/// assert_eq!(err.to_string(),
///            "ERROR: Malformed expression: expression ends with operator '+': \"1+\"");
/// ```
pub fn evaluate(expression: &str, tokens: &[Token], namespaces: &[NamespaceRef]) -> CalcResult<Value> {
    let namespaces = Namespaces::resolve(namespaces, NamespaceRegistry::standard())
        .map_err(|err| err.with_expression(expression))?;
    Reducer::new(expression, namespaces, EvalOptions::default()).evaluate(tokens)
}
