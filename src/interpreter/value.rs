/// Element types and the promotion rule.
///
/// Defines the `ElementType` tag carried by every number and the `promote`
/// function that decides the result type of every binary operator.
pub mod element_type;
/// Dense matrix storage and arithmetic.
///
/// Defines the `Matrix` type with its elementwise operations, transpose and
/// the two interchangeable multiplication kernels.
pub mod matrix;

pub mod core;
