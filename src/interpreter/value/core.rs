use crate::{
    interpreter::value::{element_type::ElementType, matrix::Matrix},
    util::num::{format_float, format_integral},
};

/// A single number together with its element type.
///
/// The payload is always an `f64`. When the type is `Integer` the payload is
/// rounded at construction, so it always holds a whole number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    element_type: ElementType,
    value:        f64,
}

impl Scalar {
    /// Creates a scalar, normalising `value` to `element_type`.
    ///
    /// # Example
    /// ```
    /// use matcalc::interpreter::value::{core::Scalar, element_type::ElementType};
    ///
    /// assert_eq!(Scalar::new(ElementType::Integer, 2.6).value(), 3.0);
    /// assert_eq!(Scalar::new(ElementType::Float, 2.6).value(), 2.6);
    /// ```
    #[must_use]
    pub fn new(element_type: ElementType, value: f64) -> Self {
        Self { element_type,
               value: element_type.normalize(value) }
    }

    /// An `Integer` scalar.
    #[must_use]
    pub fn integer(value: f64) -> Self {
        Self::new(ElementType::Integer, value)
    }

    /// A `Float` scalar.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::new(ElementType::Float, value)
    }

    /// The zero of the given type.
    #[must_use]
    pub fn zero(element_type: ElementType) -> Self {
        Self::new(element_type, 0.0)
    }

    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.element_type {
            ElementType::Integer => write!(f, "{}", format_integral(self.value)),
            ElementType::Float => write!(f, "{}", format_float(self.value)),
        }
    }
}

/// Represents a runtime value in the interpreter.
///
/// The language knows exactly two kinds of values. Every operator and every
/// statement handles both explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single number.
    Scalar(Scalar),
    /// A dense two-dimensional matrix.
    Matrix(Matrix),
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Self::Matrix(m)
    }
}

impl Value {
    /// The element type of the scalar or of the matrix cells.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Scalar(s) => s.element_type(),
            Self::Matrix(m) => m.element_type(),
        }
    }

    /// A short description used in error messages, e.g. `Integer scalar` or
    /// `2x3 Float matrix`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(s) => format!("{} scalar", s.element_type()),
            Self::Matrix(m) => format!("{}x{} {} matrix", m.rows(), m.columns(), m.element_type()),
        }
    }

    /// Renders the value the way the print statement shows it.
    ///
    /// Scalars render on one line. Matrices get a `Matrix R x C` header line
    /// followed by their rows.
    ///
    /// # Example
    /// ```
    /// use matcalc::interpreter::value::{
    ///     core::{Scalar, Value},
    ///     element_type::ElementType,
    ///     matrix::Matrix,
    /// };
    ///
    /// let s = Value::from(Scalar::float(2.0));
    /// assert_eq!(s.render(), "2.0");
    ///
    /// let m = Value::from(Matrix::zeros(1, 2, ElementType::Integer).unwrap());
    /// assert_eq!(m.render(), "Matrix 1 x 2\n[[0, 0]]");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Scalar(s) => s.to_string(),
            Self::Matrix(m) => format!("Matrix {} x {}\n{m}", m.rows(), m.columns()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Matrix(m) => write!(f, "{m}"),
        }
    }
}
