/// Operator dispatch on operand kinds.
pub mod core;

/// Scalar arithmetic.
///
/// `+ - * /` on two scalars, with promotion and division by zero checks.
pub mod scalar;

/// Elementwise matrix arithmetic and scaling by a scalar.
pub mod matrix;

/// Matrix multiplication for `@` and `producto`.
pub mod matmul;
