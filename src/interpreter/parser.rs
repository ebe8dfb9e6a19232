/// The structurer.
///
/// Scans the expression text once, character by character, and recursively
/// builds the nested token tree: one group per bracket pair, operators split
/// out, literals and identifiers left as trimmed text.
pub mod core;

/// Unary sign escaping.
///
/// Rewrites a leading `+` or `-` as multiplication by a signed unit so the
/// reducer only ever folds binary operators.
pub mod unary;

/// Helpers shared by the structurer.
pub mod utils;
