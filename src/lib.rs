//! # infixcalc
//!
//! infixcalc evaluates single-line infix arithmetic expressions such as
//! `2 * (sin(pi / 2) + 3)`.
//!
//! Evaluation runs in two stages. The structurer turns the expression text
//! into a nested token tree, one group per bracket pair. The reducer then
//! explores that tree depth first, resolves identifiers against an ordered
//! list of namespaces and folds the operators by priority.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// The structured token tree.
///
/// Declares the `Token` enum the structurer produces and the reducer
/// consumes. Bracketed sub-expressions become nested groups.
pub mod ast;
/// Error reporting for every stage.
///
/// # Responsibilities
/// - Names every failure category in one `ErrorKind` enum.
/// - Attaches the failing expression for the `ERROR: ...` message.
pub mod error;
/// The structurer, the reducer and the namespaces they rely on.
pub mod interpreter;
/// Safe numeric conversions shared by the operator and namespace functions.
pub mod util;

pub use crate::{
    error::{CalcError, CalcResult, ErrorKind},
    interpreter::{
        evaluator::core::{EvalOptions, Reducer, evaluate},
        namespace::registry::NamespaceRef,
        parser::core::{structure, structure_with},
        value::core::Value,
    },
};

/// Structures and evaluates an expression in one call.
///
/// `namespaces` are searched before the default `math` and `builtins`
/// namespaces. Names are looked up in the standard registry, which also
/// knows `statistics`.
///
/// # Examples
/// ```
/// use infixcalc::{Value, calculate};
///
/// assert_eq!(calculate("1 + 2 * 3", &[]).unwrap(), Value::Integer(7));
/// assert_eq!(calculate("mean(1, 2, 6)", &["statistics".into()]).unwrap(), Value::Real(3.0));
///
/// let err = calculate("mean(1, 2)", &[]).unwrap_err();
/// assert_eq!(err.to_string(), "ERROR: Unknown symbol \"mean\".: \"mean(1, 2)\"");
/// ```
pub fn calculate(expression: &str, namespaces: &[NamespaceRef]) -> CalcResult<Value> {
    let tokens = structure(expression)?;
    evaluate(expression, &tokens, namespaces)
}
