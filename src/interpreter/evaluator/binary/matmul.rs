use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates matrix multiplication for `@` and `producto`.
    ///
    /// Both operands must be matrices and the inner dimensions must agree. The
    /// algorithm is taken from the context's [`EvalConfig`]; every strategy
    /// gives the same result.
    ///
    /// [`EvalConfig`]: crate::interpreter::evaluator::core::EvalConfig
    ///
    /// # Parameters
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `TypeMismatch` if either operand is a scalar or the element types do
    ///   not promote.
    /// - `DimensionMismatch` naming both shapes.
    ///
    /// # Example
    /// ```
    /// use matcalc::interpreter::{
    ///     evaluator::core::Context,
    ///     value::{core::Value, element_type::ElementType, matrix::Matrix},
    /// };
    ///
    /// let a = Value::from(Matrix::new(1, 2, ElementType::Integer, vec![1.0, 2.0]).unwrap());
    /// let b = Value::from(Matrix::new(2, 1, ElementType::Float, vec![3.0, 4.0]).unwrap());
    ///
    /// let product = Context::new().eval_matmul(&a, &b, 1).unwrap();
    /// assert_eq!(product,
    ///            Value::from(Matrix::new(1, 1, ElementType::Float, vec![11.0]).unwrap()));
    ///
    /// // 1x2 @ 1x2 does not fit.
    /// assert!(Context::new().eval_matmul(&a, &a, 1).is_err());
    /// ```
    pub fn eval_matmul(&self, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        let (Value::Matrix(a), Value::Matrix(b)) = (left, right) else {
            return Err(RuntimeError::TypeMismatch { details: format!("matrix product needs two matrices, got {} and {}",
                                                                     left.describe(),
                                                                     right.describe()),
                                                    line });
        };

        a.multiply(b, self.config.strategy)
         .map(Value::from)
         .map_err(|e| RuntimeError::from_matrix(&e, line))
    }
}
