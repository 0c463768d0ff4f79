use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            core::{Scalar, Value},
            element_type::{ElementType, promote},
        },
    },
};

impl Context {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// The operand types are promoted first. `+ - *` keep the promoted type,
    /// so two integers give an integer. Division always gives a `Float`.
    /// The operator must be one of `Add`, `Sub`, `Mul` or `Div`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `DivisionByZero` if the divisor is zero.
    /// - `TypeMismatch` if the types cannot be promoted or `op` is `@`.
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
    /// let x = Scalar::integer(7.0);
    /// let y = Scalar::integer(2.0);
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Div, x, y, 1).unwrap();
    /// assert_eq!(result, Value::from(Scalar::float(3.5)));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: Scalar,
                          right: Scalar,
                          line: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, MatMul, Mul, Sub};

        let element_type = promote(left.element_type(), right.element_type()).ok_or_else(|| {
            RuntimeError::TypeMismatch { details: format!("cannot combine {} and {}",
                                                          left.element_type(),
                                                          right.element_type()),
                                         line }
        })?;
        let (a, b) = (left.value(), right.value());

        let result = match op {
            Add => Scalar::new(element_type, a + b),
            Sub => Scalar::new(element_type, a - b),
            Mul => Scalar::new(element_type, a * b),
            Div => {
                if b == 0.0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                Scalar::new(ElementType::Float, a / b)
            },
            MatMul => {
                return Err(RuntimeError::TypeMismatch { details: "'@' needs two matrices".to_string(),
                                                        line });
            },
        };

        Ok(Value::from(result))
    }
}
