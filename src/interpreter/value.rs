/// Runtime values.
///
/// Defines the `Value` enum produced by literals, constants, function calls
/// and operators, together with the conversions the operator and namespace
/// functions rely on.
pub mod core;
