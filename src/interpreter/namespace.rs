/// Namespace building blocks.
///
/// Defines the `Namespace` trait, the `Symbol` an identifier resolves to,
/// functions with their arity checks, and the static and runtime-built
/// namespace tables.
pub mod core;

/// Namespace registry and resolution.
///
/// Maps names to namespaces and turns a caller's list of namespace
/// references into the ordered list one evaluation searches.
pub mod registry;

/// The `math` namespace: constants, trigonometry, logarithms, rounding and
/// number-theoretic helpers.
pub mod math;

/// The `builtins` namespace: `True`, `False` and general-purpose functions.
pub mod builtins;

/// The `statistics` namespace.
pub mod statistics;
