use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            core::{Scalar, Value},
            matrix::Matrix,
        },
    },
};

impl Context {
    /// Adds or subtracts two matrices cell by cell.
    ///
    /// The shapes must be equal. The result has the promoted element type and
    /// integer results are rounded per cell.
    ///
    /// # Errors
    /// - `DimensionMismatch` naming both shapes.
    /// - `TypeMismatch` if the element types cannot be promoted or `op` is not
    ///   `+` or `-`.
    ///
    /// # Example
    /// ```
    /// use matcalc::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         value::{element_type::ElementType, matrix::Matrix},
    ///     },
    /// };
    ///
    /// let a = Matrix::new(1, 2, ElementType::Integer, vec![1.0, 2.0]).unwrap();
    /// let b = Matrix::new(2, 1, ElementType::Integer, vec![1.0, 2.0]).unwrap();
    ///
    /// assert!(Context::eval_matrix_elementwise(BinaryOperator::Add, &a, &b, 1).is_err());
    /// assert!(Context::eval_matrix_elementwise(BinaryOperator::Sub, &a, &a, 1).is_ok());
    /// ```
    pub fn eval_matrix_elementwise(op: BinaryOperator,
                                   left: &Matrix,
                                   right: &Matrix,
                                   line: usize)
                                   -> EvalResult<Value> {
        let result = match op {
            BinaryOperator::Add => left.add(right),
            BinaryOperator::Sub => left.sub(right),
            _ => {
                return Err(RuntimeError::TypeMismatch { details: format!("'{op}' is not an elementwise matrix operator"),
                                                        line });
            },
        };

        result.map(Value::from)
              .map_err(|e| RuntimeError::from_matrix(&e, line))
    }

    /// Multiplies every cell of `matrix` by `scalar`.
    ///
    /// Used for both `scalar * matrix` and `matrix * scalar`.
    ///
    /// # Errors
    /// Returns `TypeMismatch` if the element types cannot be promoted.
    pub fn eval_scale(scalar: Scalar, matrix: &Matrix, line: usize) -> EvalResult<Value> {
        matrix.scale(scalar.value(), scalar.element_type())
              .map(Value::from)
              .map_err(|e| RuntimeError::from_matrix(&e, line))
    }
}
