use crate::interpreter::value::element_type::ElementType;

/// A numeric literal as written in source code.
///
/// The element type follows the spelling: `3` is `Integer`, `3.0` is `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberLiteral {
    /// The parsed value.
    pub value:        f64,
    /// The type inferred from the literal's text.
    pub element_type: ElementType,
}

impl NumberLiteral {
    /// Creates a literal from its value and inferred type.
    #[must_use]
    pub const fn new(value: f64, element_type: ElementType) -> Self {
        Self { value,
               element_type }
    }

    /// The same literal with its sign flipped.
    #[must_use]
    pub fn negated(self) -> Self {
        Self { value:        -self.value,
               element_type: self.element_type, }
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Binary operator chains such as `a + b - c` are left-nested, so `(a + b) - c`
/// is evaluated as a left fold.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `4` or `2.5`.
    Number {
        /// The literal value.
        value: NumberLiteral,
        /// Line number in the source code.
        line:  usize,
    },
    /// A matrix literal such as `[[1, 2], [3, 4]]`.
    ///
    /// Rows are kept as written; the evaluator checks that they are
    /// rectangular.
    MatrixLiteral {
        /// The literal's rows.
        rows: Vec<Vec<NumberLiteral>>,
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, subtraction, etc.).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// The built-in `producto(a, b)` call, equivalent to `a @ b`.
    ProductCall {
        /// First argument.
        left:  Box<Self>,
        /// Second argument.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use matcalc::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::MatrixLiteral { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::ProductCall { line, .. } => *line,
        }
    }
}

/// The optional type written after `:` in a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAnnotation {
    /// `entero` or `flotante`.
    Scalar(ElementType),
    /// `matriz<entero|flotante>[rows, columns]`.
    Matrix {
        /// Element type of the cells.
        element_type: ElementType,
        /// Declared row count.
        rows:         usize,
        /// Declared column count.
        columns:      usize,
    },
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(t) => write!(f, "{}", t.keyword()),
            Self::Matrix { element_type,
                           rows,
                           columns, } => {
                write!(f, "matriz<{}>[{rows}, {columns}]", element_type.keyword())
            },
        }
    }
}

/// Represents a single statement in a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `declarar name [: annotation] [= initializer]`.
    Declaration {
        /// The declared name.
        name:        String,
        /// The declared type, if any.
        annotation:  Option<TypeAnnotation>,
        /// The initial value, if any.
        initializer: Option<Expr>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `name = value`.
    Assignment {
        /// The target variable.
        name:  String,
        /// The assigned expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `imprimir(expr)`.
    Print {
        /// The expression to print.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Declaration { line, .. }
            | Self::Assignment { line, .. }
            | Self::Print { line, .. } => *line,
        }
    }
}

/// A whole parsed program: its statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The statements, executed one after another.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Matrix multiplication (`@`)
    MatMul,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::MatMul => "@",
        };
        write!(f, "{operator}")
    }
}
