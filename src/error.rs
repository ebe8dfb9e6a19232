/// The error type surfaced to callers.
///
/// Wraps an [`ErrorKind`] together with the top-level expression that failed,
/// and renders the `ERROR: ...` message printed by the command-line shell.
pub mod calc_error;
/// Error categories.
///
/// Enumerates every failure the structurer, the reducer, the namespace
/// resolver and the operator functions can raise. Each kind carries the data
/// needed for a human-readable message.
pub mod error_kind;

pub use calc_error::{CalcError, CalcResult};
pub use error_kind::ErrorKind;
