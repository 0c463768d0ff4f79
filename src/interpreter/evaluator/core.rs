use std::num::NonZeroUsize;

use crate::{
    ast::{Expr, NumberLiteral},
    error::RuntimeError,
    interpreter::{
        evaluator::environment::Environment,
        value::{
            core::{Scalar, Value},
            element_type::{ElementType, promote},
            matrix::{Matrix, MultiplyStrategy},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Settings that change how a program is evaluated without changing what it
/// computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalConfig {
    /// Algorithm used for `@` and `producto`.
    pub strategy: MultiplyStrategy,
}

impl EvalConfig {
    /// Builds a configuration from command-line style switches.
    ///
    /// # Example
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use matcalc::interpreter::{evaluator::core::EvalConfig, value::matrix::MultiplyStrategy};
    ///
    /// let tile_size = NonZeroUsize::new(8).unwrap();
    ///
    /// assert_eq!(EvalConfig::new(false, tile_size).strategy, MultiplyStrategy::Naive);
    /// assert_eq!(EvalConfig::new(true, tile_size).strategy,
    ///            MultiplyStrategy::Blocked { tile_size });
    /// ```
    #[must_use]
    pub const fn new(blocked: bool, tile_size: NonZeroUsize) -> Self {
        let strategy = if blocked {
            MultiplyStrategy::Blocked { tile_size }
        } else {
            MultiplyStrategy::Naive
        };
        Self { strategy }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the variables bound so far and
/// the configuration every operation consults.
///
/// ## Usage
///
/// `Context` is created once per program run. Statements are fed to
/// [`Context::execute`] in source order; afterwards the final bindings are
/// available through [`Context::environment`].
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub(crate) environment: Environment,
    pub(crate) config:      EvalConfig,
}

impl Context {
    /// Creates a context with no variables and the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with no variables and the given configuration.
    #[must_use]
    pub fn with_config(config: EvalConfig) -> Self {
        Self { environment: Environment::new(),
               config }
    }

    /// The variables bound so far.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Each
    /// sub-expression is evaluated once, left operand first. Evaluation never
    /// modifies the context.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`], or the first error encountered.
    ///
    /// # Example
    /// ```
    /// use matcalc::{
    ///     ast::{BinaryOperator, Expr, NumberLiteral},
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         value::{
    ///             core::{Scalar, Value},
    ///             element_type::ElementType,
    ///         },
    ///     },
    /// };
    ///
    /// let number = |v| Box::new(Expr::Number { value: NumberLiteral::new(v, ElementType::Integer),
    ///                                          line:  1, });
    /// let expr = Expr::BinaryOp { left:  number(2.0),
    ///                             op:    BinaryOperator::Mul,
    ///                             right: number(3.0),
    ///                             line:  1, };
    ///
    /// let context = Context::new();
    /// assert_eq!(context.eval(&expr).unwrap(), Value::from(Scalar::integer(6.0)));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Self::eval_number(*value)),
            Expr::MatrixLiteral { rows, line } => Self::eval_matrix_literal(rows, *line),
            Expr::Variable { name, line } => self.environment.lookup(name, *line),
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.eval_binary(*op, &left, &right, *line)
            },
            Expr::ProductCall { left, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.eval_matmul(&left, &right, *line)
            },
        }
    }

    /// Turns a numeric literal into a scalar of the literal's type.
    #[must_use]
    pub fn eval_number(literal: NumberLiteral) -> Value {
        Value::from(Scalar::new(literal.element_type, literal.value))
    }

    /// Builds a matrix from the rows of a literal.
    ///
    /// Rows must all have the length of the first one; this is checked before
    /// any matrix is built. The element type is the promotion of every
    /// literal's type, so one decimal number makes the whole matrix `Float`.
    ///
    /// # Errors
    /// - `RaggedMatrixLiteral` naming the first row of a different length.
    /// - `TypeMismatch` if element types cannot be promoted.
    ///
    /// # Example
    /// ```
    /// use matcalc::{
    ///     ast::NumberLiteral,
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         value::{core::Value, element_type::ElementType},
    ///     },
    /// };
    ///
    /// let rows = vec![vec![NumberLiteral::new(1.0, ElementType::Integer),
    ///                      NumberLiteral::new(2.5, ElementType::Float)]];
    /// let value = Context::eval_matrix_literal(&rows, 1).unwrap();
    ///
    /// assert_eq!(value.element_type(), ElementType::Float);
    ///
    /// let ragged = vec![vec![NumberLiteral::new(1.0, ElementType::Integer); 2],
    ///                   vec![NumberLiteral::new(1.0, ElementType::Integer)]];
    /// assert!(Context::eval_matrix_literal(&ragged, 1).is_err());
    /// ```
    pub fn eval_matrix_literal(rows: &[Vec<NumberLiteral>], line: usize) -> EvalResult<Value> {
        let columns = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows.iter()
                                        .map(Vec::len)
                                        .enumerate()
                                        .find(|(_, len)| *len != columns)
        {
            return Err(RuntimeError::RaggedMatrixLiteral { row,
                                                           expected: columns,
                                                           found,
                                                           line });
        }

        let mut element_type = ElementType::Integer;
        for literal in rows.iter().flatten() {
            element_type = promote(element_type, literal.element_type).ok_or_else(|| {
                               RuntimeError::TypeMismatch { details: format!("cannot combine {element_type} and {} in a matrix literal",
                                                                             literal.element_type),
                                                            line }
                           })?;
        }

        let data = rows.iter().flatten().map(|literal| literal.value).collect();
        let matrix = Matrix::new(rows.len(), columns, element_type, data)
            .map_err(|e| RuntimeError::from_matrix(&e, line))?;

        Ok(Value::from(matrix))
    }
}
