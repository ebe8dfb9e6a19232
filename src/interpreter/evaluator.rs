/// Binary operator evaluation logic.
///
/// Implements every operation bound in the operator table: arithmetic,
/// exponentiation and comparisons, with integer/real promotion and checked
/// integer arithmetic.
pub mod binary;

/// Reducer state and entry points.
///
/// Holds the evaluation options, the `Reducer` with its function stack, and
/// the validation applied to a token sequence before reduction begins.
pub mod core;

/// Depth-first exploration of a token tree.
///
/// Evaluates nested groups, resolves literals and identifiers, splits comma
/// lists into argument separators and applies pending functions to their
/// argument lists.
pub mod explore;

/// Priority folding.
///
/// Repeatedly replaces the highest-priority operator and its two neighbors
/// with the result until one value remains.
pub mod reduce;
