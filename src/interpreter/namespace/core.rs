use std::fmt;

use crate::{
    error::{CalcError, CalcResult, ErrorKind},
    interpreter::value::core::Value,
};

/// Type alias for native function handlers.
///
/// A handler receives the evaluated argument values. The argument count has
/// already been checked against the function's [`Arity`].
pub type NativeFn = fn(&[Value]) -> CalcResult<Value>;

/// Specifies the allowed number of arguments for a function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means the function accepts any count listed in `slice`.
/// - `AtLeast(n)` means the function accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                let counts = counts.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}", counts.join(" or "))
            },
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A callable exposed by a namespace.
#[derive(Clone)]
pub struct Function {
    name:  String,
    arity: Arity,
    func:  NativeFn,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl Function {
    #[must_use]
    pub fn new(name: impl Into<String>, arity: Arity, func: NativeFn) -> Self {
        Self { name: name.into(),
               arity,
               func }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls the function.
    ///
    /// The argument count is checked first. A `TypeError` raised by the
    /// handler means the arguments have the wrong shape, which is reported
    /// the same way as a wrong count.
    ///
    /// # Errors
    /// - `ArityMismatch` for a wrong argument count or argument types.
    /// - Any other error raised by the handler, unchanged.
    ///
    /// # Example
    /// ```
    /// use infixcalc::interpreter::{
    ///     namespace::core::{Arity, Function},
    ///     value::core::Value,
    /// };
    ///
    /// let double = Function::new("double", Arity::Exact(1), |args| {
    ///     Ok(Value::Integer(args[0].as_integer()? * 2))
    /// });
    ///
    /// assert_eq!(double.call(&[Value::Integer(21)]).unwrap(), Value::Integer(42));
    /// assert_eq!(double.call(&[]).unwrap_err().kind.name(), "ArityMismatch");
    /// assert_eq!(double.call(&[Value::Real(0.5)]).unwrap_err().kind.name(), "ArityMismatch");
    /// ```
    pub fn call(&self, args: &[Value]) -> CalcResult<Value> {
        if !self.arity.check(args.len()) {
            return Err(ErrorKind::ArityMismatch { name:    self.name.clone(),
                                                  details: format!("expected {} argument(s), got {}",
                                                                   self.arity,
                                                                   args.len()), }.into());
        }

        (self.func)(args).map_err(|err| match err.kind {
                             ErrorKind::TypeError { details } => {
                                 CalcError::from(ErrorKind::ArityMismatch { name: self.name.clone(),
                                                                            details })
                             },
                             kind => CalcError { kind, ..err },
                         })
    }
}

/// What an identifier resolves to.
#[derive(Debug, Clone)]
pub enum Symbol {
    /// A named value such as `pi`.
    Constant(Value),
    /// A callable waiting for its argument list.
    Function(Function),
}

/// A named source of constants and functions.
///
/// Namespaces are shared between evaluations, possibly across threads, and
/// must not change once built.
pub trait Namespace: Send + Sync + fmt::Debug {
    /// The name the namespace is registered under.
    fn name(&self) -> &str;

    /// Resolves an identifier, or returns `None` if this namespace does not
    /// define it.
    fn lookup(&self, ident: &str) -> Option<Symbol>;
}

/// A constant stored in a static namespace table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Real(f64),
    Bool(bool),
}

impl From<Constant> for Value {
    fn from(constant: Constant) -> Self {
        match constant {
            Constant::Real(r) => Self::Real(r),
            Constant::Bool(b) => Self::Bool(b),
        }
    }
}

/// A function entry of a static namespace table.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDef {
    pub name:  &'static str,
    pub arity: Arity,
    pub func:  NativeFn,
}

/// A namespace whose contents are fixed at compile time.
///
/// Built with the `static_namespace!` macro.
#[derive(Debug, Clone, Copy)]
pub struct StaticNamespace {
    pub name:      &'static str,
    pub constants: &'static [(&'static str, Constant)],
    pub functions: &'static [FunctionDef],
}

impl StaticNamespace {
    /// Iterates over every identifier the namespace defines.
    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constants
            .iter()
            .map(|(name, _)| *name)
            .chain(self.functions.iter().map(|def| def.name))
    }
}

impl Namespace for StaticNamespace {
    fn name(&self) -> &str {
        self.name
    }

    fn lookup(&self, ident: &str) -> Option<Symbol> {
        if let Some((_, constant)) = self.constants.iter().find(|(name, _)| *name == ident) {
            return Some(Symbol::Constant((*constant).into()));
        }
        self.functions
            .iter()
            .find(|def| def.name == ident)
            .map(|def| Symbol::Function(Function::new(def.name, def.arity, def.func)))
    }
}

/// Defines a static namespace from tables of constants and functions.
///
/// Each function entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing it.
macro_rules! static_namespace {
    (
        $(#[$meta:meta])*
        $vis:vis static $ident:ident = $name:literal {
            constants: { $( $cname:literal => $cvalue:expr ),* $(,)? },
            functions: {
                $(
                    $fname:literal => {
                        arity: $arity:expr,
                        func: $func:expr $(,)?
                    }
                ),* $(,)?
            } $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis static $ident: $crate::interpreter::namespace::core::StaticNamespace =
            $crate::interpreter::namespace::core::StaticNamespace {
                name: $name,
                constants: &[ $( ($cname, $cvalue), )* ],
                functions: &[
                    $(
                        $crate::interpreter::namespace::core::FunctionDef {
                            name: $fname,
                            arity: $arity,
                            func: $func,
                        },
                    )*
                ],
            };
    };
}

pub(crate) use static_namespace;

/// A namespace assembled at runtime, for callers embedding the calculator.
///
/// # Example
/// ```
/// use std::sync::Arc;
///
/// use infixcalc::{
///     calculate,
///     interpreter::{
///         namespace::{
///             core::{Arity, TableNamespace},
///             registry::NamespaceRef,
///         },
///         value::core::Value,
///     },
/// };
///
/// let units = TableNamespace::new("units").constant("km", 1000_i64)
///                                         .function("half", Arity::Exact(1), |args| {
///                                             Ok(Value::Real(args[0].as_real()? / 2.0))
///                                         });
/// let refs = [NamespaceRef::from(Arc::new(units))];
///
/// assert_eq!(calculate("3km", &refs).unwrap_err().kind.name(), "MalformedExpression");
/// assert_eq!(calculate("3*km", &refs).unwrap(), Value::Integer(3000));
/// assert_eq!(calculate("half(km)", &refs).unwrap(), Value::Real(500.0));
/// ```
#[derive(Debug, Clone)]
pub struct TableNamespace {
    name:      String,
    constants: Vec<(String, Value)>,
    functions: Vec<Function>,
}

impl TableNamespace {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name:      name.into(),
               constants: Vec::new(),
               functions: Vec::new(), }
    }

    /// Adds a constant. A later definition of the same name wins.
    #[must_use]
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.insert(0, (name.into(), value.into()));
        self
    }

    /// Adds a function. A later definition of the same name wins.
    #[must_use]
    pub fn function(mut self, name: impl Into<String>, arity: Arity, func: NativeFn) -> Self {
        self.functions.insert(0, Function::new(name, arity, func));
        self
    }
}

impl Namespace for TableNamespace {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, ident: &str) -> Option<Symbol> {
        if let Some((_, value)) = self.constants.iter().find(|(name, _)| name == ident) {
            return Some(Symbol::Constant(value.clone()));
        }
        self.functions
            .iter()
            .find(|function| function.name() == ident)
            .cloned()
            .map(Symbol::Function)
    }
}

/// Returns the arguments of a variadic function, unpacking a single tuple
/// argument: `max(1, 2)` and `max((1, 2))` see the same values.
#[must_use]
pub fn spread(args: &[Value]) -> &[Value] {
    match args {
        [Value::Tuple(items)] => items.as_slice(),
        _ => args,
    }
}

/// Converts every argument to `f64`.
pub fn reals(args: &[Value]) -> CalcResult<Vec<f64>> {
    args.iter().map(Value::as_real).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    static_namespace! {
        static SAMPLE = "sample" {
            constants: { "answer" => Constant::Real(42.0) },
            functions: {
                "first" => { arity: Arity::AtLeast(1), func: |args| Ok(args[0].clone()) },
            },
        }
    }

    #[test]
    fn static_namespace_resolves_both_kinds() {
        assert!(matches!(SAMPLE.lookup("answer"), Some(Symbol::Constant(Value::Real(r))) if r == 42.0));
        assert!(matches!(SAMPLE.lookup("first"), Some(Symbol::Function(_))));
        assert!(SAMPLE.lookup("second").is_none());
        assert_eq!(SAMPLE.identifiers().collect::<Vec<_>>(), ["answer", "first"]);
    }

    #[test]
    fn arity_describes_itself() {
        assert_eq!(Arity::Exact(2).to_string(), "2");
        assert_eq!(Arity::OneOf(&[1, 2]).to_string(), "1 or 2");
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1");
        assert!(Arity::AtLeast(1).check(5));
        assert!(!Arity::OneOf(&[1, 2]).check(3));
    }

    #[test]
    fn call_checks_arity_before_running() {
        let function = Function::new("first", Arity::AtLeast(1), |args| Ok(args[0].clone()));
        let err = function.call(&[]).unwrap_err();
        assert_eq!(err.kind,
                   ErrorKind::ArityMismatch { name:    "first".to_string(),
                                              details: "expected at least 1 argument(s), got 0".to_string(), });
    }

    #[test]
    fn later_table_definitions_shadow_earlier_ones() {
        let table = TableNamespace::new("t").constant("x", 1_i64).constant("x", 2_i64);
        assert!(matches!(table.lookup("x"), Some(Symbol::Constant(Value::Integer(2)))));
    }

    #[test]
    fn single_tuple_argument_is_spread() {
        let tuple = [Value::Tuple(vec![1.into(), 2.into()])];
        assert_eq!(spread(&tuple).len(), 2);
        assert_eq!(spread(&[1.into(), 2.into(), 3.into()]).len(), 3);
    }
}
