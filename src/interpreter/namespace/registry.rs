use std::{collections::HashMap, fmt, sync::Arc};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::namespace::{
        builtins::BUILTINS,
        core::{Namespace, Symbol},
        math::MATH,
        statistics::STATISTICS,
    },
};

static STANDARD: Lazy<NamespaceRegistry> = Lazy::new(NamespaceRegistry::with_standard);

/// A reference to a namespace, either by registered name or as a handle.
#[derive(Clone)]
pub enum NamespaceRef {
    /// Looked up in a [`NamespaceRegistry`] during resolution.
    Named(String),
    /// Used as is.
    Handle(Arc<dyn Namespace>),
}

impl fmt::Debug for NamespaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Handle(namespace) => f.debug_tuple("Handle").field(&namespace.name()).finish(),
        }
    }
}

impl From<&str> for NamespaceRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for NamespaceRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl<N: Namespace + 'static> From<Arc<N>> for NamespaceRef {
    fn from(namespace: Arc<N>) -> Self {
        Self::Handle(namespace)
    }
}

/// Maps namespace names to namespaces.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    entries: HashMap<String, Arc<dyn Namespace>>,
}

impl NamespaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `math`, `builtins` and `statistics`.
    #[must_use]
    pub fn with_standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MATH));
        registry.register(Arc::new(BUILTINS));
        registry.register(Arc::new(STATISTICS));
        registry
    }

    /// Returns the process-wide registry of standard namespaces.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Registers a namespace under its own name, replacing any namespace
    /// already registered under that name.
    pub fn register(&mut self, namespace: Arc<dyn Namespace>) {
        self.entries.insert(namespace.name().to_string(), namespace);
    }

    /// Returns the namespace registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Namespace>> {
        self.entries.get(name).cloned()
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.entries.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

/// The ordered, resolved namespace list of one evaluation.
///
/// Built once by [`Namespaces::resolve`] and never changed afterwards.
#[derive(Debug, Clone)]
pub struct Namespaces {
    list: Vec<Arc<dyn Namespace>>,
}

impl Namespaces {
    /// Resolves namespace references into handles.
    ///
    /// Named references are looked up in `registry`. The `math` and
    /// `builtins` namespaces are always appended, so caller namespaces take
    /// precedence over them.
    ///
    /// # Errors
    /// `UnknownNamespace` if a name is not registered.
    ///
    /// # Example
    /// ```
    /// use infixcalc::interpreter::namespace::registry::{NamespaceRegistry, Namespaces};
    ///
    /// let resolved = Namespaces::resolve(&["statistics".into()], NamespaceRegistry::standard()).unwrap();
    /// assert_eq!(resolved.names().collect::<Vec<_>>(), ["statistics", "math", "builtins"]);
    ///
    /// let err = Namespaces::resolve(&["nope".into()], NamespaceRegistry::standard()).unwrap_err();
    /// assert_eq!(err.kind.name(), "UnknownNamespace");
    /// ```
    pub fn resolve(refs: &[NamespaceRef], registry: &NamespaceRegistry) -> CalcResult<Self> {
        let mut list = refs.iter()
                           .map(|reference| match reference {
                               NamespaceRef::Named(name) => {
                                   registry.get(name)
                                           .ok_or_else(|| ErrorKind::UnknownNamespace { name: name.clone() }.into())
                               },
                               NamespaceRef::Handle(namespace) => Ok(Arc::clone(namespace)),
                           })
                           .collect::<CalcResult<Vec<_>>>()?;

        list.push(Arc::new(MATH));
        list.push(Arc::new(BUILTINS));

        let resolved = Self { list };
        debug!(namespaces = ?resolved.names().collect::<Vec<_>>(), "resolved namespaces");
        Ok(resolved)
    }

    /// Returns the default list: `math` followed by `builtins`.
    #[must_use]
    pub fn standard() -> Self {
        Self { list: vec![Arc::new(MATH) as Arc<dyn Namespace>, Arc::new(BUILTINS)] }
    }

    /// Resolves an identifier against the list, first match wins.
    ///
    /// # Errors
    /// `UnknownSymbol` if no namespace defines the identifier.
    pub fn lookup(&self, ident: &str) -> CalcResult<Symbol> {
        self.list
            .iter()
            .find_map(|namespace| namespace.lookup(ident))
            .ok_or_else(|| ErrorKind::UnknownSymbol { name: ident.to_string() }.into())
    }

    /// Iterates over the namespace names in lookup order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|namespace| namespace.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{
        namespace::core::{Arity, TableNamespace},
        value::core::Value,
    };

    #[test]
    fn standard_registry_holds_three_namespaces() {
        assert_eq!(NamespaceRegistry::standard().names(), ["builtins", "math", "statistics"]);
    }

    #[test]
    fn caller_namespaces_shadow_defaults() {
        let shadow = TableNamespace::new("shadow").constant("pi", 3_i64)
                                                  .function("abs", Arity::Exact(1), |_| Ok(Value::Integer(-1)));
        let resolved = Namespaces::resolve(&[Arc::new(shadow).into()], &NamespaceRegistry::new()).unwrap();

        assert!(matches!(resolved.lookup("pi").unwrap(), Symbol::Constant(Value::Integer(3))));
        let Symbol::Function(abs) = resolved.lookup("abs").unwrap() else {
            panic!("abs should be a function");
        };
        assert_eq!(abs.call(&[Value::Integer(5)]).unwrap(), Value::Integer(-1));
        assert!(matches!(resolved.lookup("e").unwrap(), Symbol::Constant(Value::Real(_))));
    }

    #[test]
    fn custom_registry_provides_names() {
        let mut registry = NamespaceRegistry::new();
        registry.register(Arc::new(TableNamespace::new("units").constant("km", 1000_i64)));

        let resolved = Namespaces::resolve(&["units".into()], &registry).unwrap();
        assert_eq!(resolved.names().collect::<Vec<_>>(), ["units", "math", "builtins"]);
        assert!(Namespaces::resolve(&["statistics".into()], &registry).is_err());
    }

    #[test]
    fn unknown_identifier_is_unknown_symbol() {
        let err = Namespaces::standard().lookup("mean").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownSymbol { name: "mean".to_string() });
    }
}
