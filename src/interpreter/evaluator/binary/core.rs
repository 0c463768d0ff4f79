use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator and operand kinds:
    /// - `+ - * /` on two scalars use `eval_scalar_op`.
    /// - `+ -` on two matrices use `eval_matrix_elementwise`.
    /// - `*` between a scalar and a matrix, in either order, uses
    ///   `eval_scale`.
    /// - `@` uses `eval_matmul`.
    ///
    /// Every other combination is a type error.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use matcalc::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         value::core::{Scalar, Value},
    ///     },
    /// };
    ///
    /// let context = Context::new();
    /// let left = Value::from(Scalar::integer(3.0));
    /// let right = Value::from(Scalar::float(0.5));
    ///
    /// let result = context.eval_binary(BinaryOperator::Add, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::from(Scalar::float(3.5)));
    /// ```
    pub fn eval_binary(&self,
                       op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, MatMul, Mul, Sub};
        use Value::{Matrix, Scalar};

        match (op, left, right) {
            (MatMul, ..) => self.eval_matmul(left, right, line),
            (Add | Sub | Mul | Div, Scalar(a), Scalar(b)) => Self::eval_scalar_op(op, *a, *b, line),
            (Add | Sub, Matrix(a), Matrix(b)) => Self::eval_matrix_elementwise(op, a, b, line),
            (Mul, Scalar(s), Matrix(m)) => Self::eval_scale(*s, m, line),
            (Mul, Matrix(m), Scalar(s)) => Self::eval_scale(*s, m, line),
            _ => Err(RuntimeError::TypeMismatch { details: format!("cannot apply '{op}' to {} and {}",
                                                                   left.describe(),
                                                                   right.describe()),
                                                  line }),
        }
    }
}
