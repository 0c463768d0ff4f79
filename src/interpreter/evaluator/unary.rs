use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Scalar, Value},
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation of a scalar, keeping its type.
    ///
    /// Matrices cannot be negated; write `-1 * m` instead.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use matcalc::{
    ///     ast::UnaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         value::core::{Scalar, Value},
    ///     },
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::from(Scalar::integer(5.0)), 1);
    /// assert_eq!(v.unwrap(), Value::from(Scalar::integer(-5.0)));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Scalar(s)) => {
                Ok(Value::from(Scalar::new(s.element_type(), -s.value())))
            },
            (UnaryOperator::Negate, Value::Matrix(_)) => {
                Err(RuntimeError::TypeMismatch { details: format!("cannot negate a {}", value.describe()),
                                                 line })
            },
        }
    }
}
