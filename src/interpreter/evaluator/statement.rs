use crate::{
    ast::{Expr, Program, Statement, TypeAnnotation},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            report::{INVALID_PRINT, Reporter},
        },
        value::{
            core::{Scalar, Value},
            matrix::Matrix,
        },
    },
};

impl Context {
    /// Runs every statement of `program` in order.
    ///
    /// A failing statement is reported and skipped; the statements after it
    /// still run.
    pub fn run(&mut self, program: &Program, reporter: &mut impl Reporter) {
        tracing::debug!(statements = program.statements.len(),
                        strategy = %self.config.strategy,
                        "running program");
        for statement in &program.statements {
            self.execute(statement, reporter);
        }
    }

    /// Runs one statement and reports what it produced.
    ///
    /// Printed values go to [`Reporter::output`]. Failures go to
    /// [`Reporter::diagnostic`]; a failed print additionally outputs
    /// [`INVALID_PRINT`]. This is the only place where errors leave the
    /// evaluator.
    ///
    /// # Example
    /// ```
    /// use matcalc::{
    ///     interpreter::evaluator::{core::Context, report::Transcript},
    ///     parse_source,
    /// };
    ///
    /// let program = parse_source("imprimir(y)").unwrap();
    /// let mut context = Context::new();
    /// let mut transcript = Transcript::default();
    ///
    /// context.execute(&program.statements[0], &mut transcript);
    ///
    /// assert_eq!(transcript.output, vec!["Print: invalid value or error".to_string()]);
    /// assert_eq!(transcript.diagnostics.len(), 1);
    /// ```
    pub fn execute(&mut self, statement: &Statement, reporter: &mut impl Reporter) {
        tracing::debug!(line = statement.line_number(), "execute");

        match self.eval_statement(statement) {
            Ok(Some(value)) => reporter.output(&value.render()),
            Ok(None) => {},
            Err(e) => {
                tracing::debug!(error = %e, "statement failed");
                reporter.diagnostic(&e);
                if let Statement::Print { .. } = statement {
                    reporter.output(INVALID_PRINT);
                }
            },
        }
    }

    /// Evaluates a single statement.
    ///
    /// Declarations and assignments update the environment and yield `None`.
    /// A print yields the value to show. On error nothing is bound.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    ///
    /// # Returns
    /// `Some(Value)` for print statements, `None` otherwise.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Option<Value>> {
        match statement {
            Statement::Declaration { name,
                                     annotation,
                                     initializer,
                                     line, } => {
                self.eval_declaration(name, annotation.as_ref(), initializer.as_ref(), *line)?;
                Ok(None)
            },
            Statement::Assignment { name, value, line } => {
                self.eval_assignment(name, value, *line)?;
                Ok(None)
            },
            Statement::Print { expr, .. } => self.eval(expr).map(Some),
        }
    }

    /// Evaluates `declarar name [: annotation] [= initializer]`.
    ///
    /// - Without an annotation the initializer's value is bound unchanged.
    /// - `entero` / `flotante` need a scalar initializer, which is converted
    ///   to the declared type (`entero` rounds). Without one, zero is bound.
    /// - `matriz<t>[R, C]` needs an `R x C` matrix initializer. An `Integer`
    ///   matrix may initialize a `flotante` one, but not the other way round.
    ///   Without an initializer, an `R x C` zero matrix is bound.
    ///
    /// Redeclaring a name replaces its binding.
    ///
    /// # Errors
    /// - Any error from evaluating the initializer.
    /// - `TypeMismatch` when the initializer's kind or element type does not
    ///   fit the annotation.
    /// - `DimensionMismatch` when a matrix initializer has the wrong shape.
    pub fn eval_declaration(&mut self,
                            name: &str,
                            annotation: Option<&TypeAnnotation>,
                            initializer: Option<&Expr>,
                            line: usize)
                            -> EvalResult<()> {
        let initial = initializer.map(|expr| self.eval(expr)).transpose()?;

        let value = match (annotation, initial) {
            (None, Some(value)) => value,
            (None, None) => {
                return Err(RuntimeError::TypeMismatch { details: format!("declaration of '{name}' has neither a type nor a value"),
                                                        line });
            },
            (Some(TypeAnnotation::Scalar(element_type)), None) => {
                Value::from(Scalar::zero(*element_type))
            },
            (Some(TypeAnnotation::Scalar(element_type)), Some(Value::Scalar(s))) => {
                Value::from(Scalar::new(*element_type, s.value()))
            },
            (Some(TypeAnnotation::Matrix { element_type,
                                           rows,
                                           columns, }),
             None) => {
                let matrix = Matrix::zeros(*rows, *columns, *element_type)
                    .map_err(|e| RuntimeError::from_matrix(&e, line))?;
                Value::from(matrix)
            },
            (Some(TypeAnnotation::Matrix { element_type,
                                           rows,
                                           columns, }),
             Some(Value::Matrix(mut matrix))) => {
                if matrix.shape() != (*rows, *columns) {
                    return Err(RuntimeError::DimensionMismatch { details: format!("'{name}' is declared {rows}x{columns} but initialized with a {}x{} matrix",
                                                                                  matrix.rows(),
                                                                                  matrix.columns()),
                                                                 line });
                }
                let found = matrix.element_type();
                matrix.widen_to(*element_type).map_err(|_| {
                    RuntimeError::TypeMismatch { details: format!("'{name}' is declared matriz<{}>[{rows}, {columns}] but initialized with {found} values",
                                                                  element_type.keyword()),
                                                 line }
                })?;
                Value::from(matrix)
            },
            (Some(annotation), Some(value)) => {
                return Err(RuntimeError::TypeMismatch { details: format!("'{name}' is declared {annotation} but initialized with a {}",
                                                                         value.describe()),
                                                        line });
            },
        };

        self.environment.bind(name, value);
        Ok(())
    }

    /// Evaluates `name = value`.
    ///
    /// An unbound name is simply bound. A bound scalar accepts any scalar and
    /// takes its type. A bound matrix accepts a matrix of the same shape.
    ///
    /// # Errors
    /// - Any error from evaluating the right-hand side.
    /// - `DimensionMismatch` when a matrix is replaced by one of another
    ///   shape.
    /// - `TypeMismatch` when a scalar would replace a matrix or the other way
    ///   round.
    ///
    /// The old binding is kept whenever an error is returned.
    pub fn eval_assignment(&mut self, name: &str, expr: &Expr, line: usize) -> EvalResult<()> {
        let value = self.eval(expr)?;

        match (self.environment.get(name), &value) {
            (None, _) | (Some(Value::Scalar(_)), Value::Scalar(_)) => {},
            (Some(Value::Matrix(old)), Value::Matrix(new)) => {
                if old.shape() != new.shape() {
                    return Err(RuntimeError::DimensionMismatch { details: format!("cannot assign a {}x{} matrix to '{name}', which is {}x{}",
                                                                                  new.rows(),
                                                                                  new.columns(),
                                                                                  old.rows(),
                                                                                  old.columns()),
                                                                 line });
                }
            },
            (Some(old), new) => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot assign a {} to '{name}', which holds a {}",
                                                                         new.describe(),
                                                                         old.describe()),
                                                        line });
            },
        }

        self.environment.bind(name, value);
        Ok(())
    }
}
