/// The reducer turns a structured token tree into a single value.
///
/// Evaluation is depth first: every nested group is reduced before the level
/// containing it, identifiers are resolved against the namespace list, and
/// the remaining flat sequence is folded by operator priority.
///
/// # Responsibilities
/// - Validates a token sequence before any work is done.
/// - Applies pending functions to the argument list that follows them.
/// - Folds operators by priority, honoring per-tier associativity.
pub mod evaluator;
/// Classifies the text of a single atom.
///
/// The structurer keeps literals and identifiers as raw text. This module
/// decides whether such text is an integer, a real or an identifier.
pub mod lexer;
/// Namespaces of constants and functions.
///
/// Identifiers are resolved against an ordered list of namespaces, the
/// caller's first and then the `math` and `builtins` defaults.
pub mod namespace;
/// The structurer builds the nested token tree from expression text.
///
/// # Responsibilities
/// - Splits operators, literals and identifiers apart.
/// - Opens one group per bracket pair and checks that brackets match.
/// - Escapes unary signs and inserts implicit multiplication.
pub mod parser;
/// The operator table: spellings, priorities and the functions they bind to.
pub mod rules;
/// Runtime values.
pub mod value;
