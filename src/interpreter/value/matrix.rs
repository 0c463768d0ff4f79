use std::num::NonZeroUsize;

use thiserror::Error;

use crate::{
    interpreter::value::element_type::{ElementType, promote},
    util::num::{format_float, format_integral},
};

/// Default edge length of the cubes used by [`MultiplyStrategy::Blocked`].
pub const DEFAULT_TILE_SIZE: usize = 32;

/// Largest number of cells a single matrix may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// Errors raised by the matrix engine itself.
///
/// These carry no source location; the evaluator attaches one when it turns
/// them into a [`RuntimeError`](crate::error::RuntimeError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The operand shapes do not fit the operation.
    #[error("{operation} needs compatible dimensions, got {}x{} and {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        /// Name of the operation that was attempted.
        operation: &'static str,
        /// `(rows, columns)` of the left operand.
        left:      (usize, usize),
        /// `(rows, columns)` of the right operand.
        right:     (usize, usize),
    },
    /// The element types cannot be promoted to a common type.
    #[error("incompatible element types {left} and {right}")]
    IncompatibleElementTypes {
        /// Element type of the left operand.
        left:  ElementType,
        /// Element type of the right operand.
        right: ElementType,
    },
    /// A buffer did not hold exactly `rows * columns` values.
    #[error("buffer of length {len} cannot back a {rows}x{columns} matrix")]
    BufferLength {
        /// Requested row count.
        rows:    usize,
        /// Requested column count.
        columns: usize,
        /// Length of the supplied buffer.
        len:     usize,
    },
    /// The requested shape holds more than [`MAX_CELLS`] cells.
    #[error("a {rows}x{columns} matrix exceeds the limit of {} cells", MAX_CELLS)]
    TooLarge {
        /// Requested row count.
        rows:    usize,
        /// Requested column count.
        columns: usize,
    },
}

/// Selects the algorithm used by [`Matrix::multiply`].
///
/// Both strategies have the same preconditions and produce bit-identical
/// results; they only differ in memory access pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiplyStrategy {
    /// Transposes the right operand once, then takes contiguous dot products.
    #[default]
    Naive,
    /// Walks the `(i, j, k)` iteration space in cubes of `tile_size` and
    /// accumulates straight into the output buffer.
    Blocked {
        /// Edge length of each cube.
        tile_size: NonZeroUsize,
    },
}

impl std::fmt::Display for MultiplyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Naive => write!(f, "naive"),
            Self::Blocked { tile_size } => write!(f, "blocked (tile {tile_size})"),
        }
    }
}

/// A dense, row-major matrix of `f64` cells tagged with an element type.
///
/// Cells of an `Integer` matrix always hold whole numbers. The buffer is owned
/// exclusively, so cloning a matrix yields an independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows:         usize,
    columns:      usize,
    element_type: ElementType,
    data:         Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from a row-major buffer.
    ///
    /// Every cell is normalised to `element_type`, so an `Integer` matrix built
    /// from fractional data holds the rounded values.
    ///
    /// # Errors
    /// Returns [`MatrixError::BufferLength`] if `data.len() != rows * columns`.
    ///
    /// # Example
    /// ```
    /// use matcalc::interpreter::value::{element_type::ElementType, matrix::Matrix};
    ///
    /// let m = Matrix::new(2, 2, ElementType::Integer, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    ///
    /// assert!(Matrix::new(2, 2, ElementType::Integer, vec![1.0]).is_err());
    /// ```
    pub fn new(rows: usize,
               columns: usize,
               element_type: ElementType,
               data: Vec<f64>)
               -> Result<Self, MatrixError> {
        if rows.checked_mul(columns) != Some(data.len()) {
            return Err(MatrixError::BufferLength { rows,
                                                   columns,
                                                   len: data.len() });
        }
        let data = data.into_iter().map(|cell| element_type.normalize(cell)).collect();
        Ok(Self { rows,
                  columns,
                  element_type,
                  data })
    }

    /// Creates a `rows x columns` matrix filled with zeros.
    ///
    /// # Errors
    /// Returns [`MatrixError::TooLarge`] if the shape holds more than
    /// [`MAX_CELLS`] cells.
    ///
    /// # Example
    /// ```
    /// use matcalc::interpreter::value::{
    ///     element_type::ElementType,
    ///     matrix::{Matrix, MatrixError},
    /// };
    ///
    /// assert_eq!(Matrix::zeros(2, 3, ElementType::Float).unwrap().data(), &[0.0; 6]);
    /// assert!(matches!(Matrix::zeros(usize::MAX, 2, ElementType::Integer),
    ///                  Err(MatrixError::TooLarge { .. })));
    /// ```
    pub fn zeros(rows: usize,
                 columns: usize,
                 element_type: ElementType)
                 -> Result<Self, MatrixError> {
        let cells = rows.checked_mul(columns)
                        .filter(|&cells| cells <= MAX_CELLS)
                        .ok_or(MatrixError::TooLarge { rows, columns })?;
        Ok(Self { rows,
                  columns,
                  element_type,
                  data: vec![0.0; cells] })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// The row-major cell buffer.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Reads the cell at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if the position lies outside the matrix.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.columns,
                "cell ({i}, {j}) outside {}x{} matrix",
                self.rows,
                self.columns);
        self.data[i * self.columns + j]
    }

    /// Writes the cell at row `i`, column `j`, normalised to the matrix's
    /// element type.
    ///
    /// # Panics
    /// Panics if the position lies outside the matrix.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.rows && j < self.columns,
                "cell ({i}, {j}) outside {}x{} matrix",
                self.rows,
                self.columns);
        self.data[i * self.columns + j] = self.element_type.normalize(value);
    }

    /// Changes the element type to `target` if that loses nothing.
    ///
    /// Only `Integer -> Float` (or no change at all) is allowed; every integral
    /// cell is already a valid float, so no data is touched.
    ///
    /// # Errors
    /// Returns [`MatrixError::IncompatibleElementTypes`] for `Float -> Integer`.
    pub fn widen_to(&mut self, target: ElementType) -> Result<(), MatrixError> {
        match (self.element_type, target) {
            (from, to) if from == to => Ok(()),
            (ElementType::Integer, ElementType::Float) => {
                self.element_type = ElementType::Float;
                Ok(())
            },
            (from, to) => Err(MatrixError::IncompatibleElementTypes { left:  from,
                                                                      right: to, }),
        }
    }

    /// Returns the transpose as a new matrix.
    ///
    /// # Example
    /// ```
    /// use matcalc::interpreter::value::{element_type::ElementType, matrix::Matrix};
    ///
    /// let m = Matrix::new(2, 3, ElementType::Integer, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let t = m.transpose();
    ///
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// ```
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.columns {
                data[j * self.rows + i] = self.data[i * self.columns + j];
            }
        }
        Self { rows: self.columns,
               columns: self.rows,
               element_type: self.element_type,
               data }
    }

    /// Combines two equally shaped matrices cell by cell.
    ///
    /// The result type is the promotion of both element types and every cell
    /// is normalised to it.
    ///
    /// # Errors
    /// - [`MatrixError::DimensionMismatch`] if the shapes differ.
    /// - [`MatrixError::IncompatibleElementTypes`] if promotion fails.
    pub fn zip_with(&self,
                    other: &Self,
                    operation: &'static str,
                    f: impl Fn(f64, f64) -> f64)
                    -> Result<Self, MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch { operation,
                                                        left: self.shape(),
                                                        right: other.shape() });
        }
        let element_type = promote_or_err(self.element_type, other.element_type)?;

        let data = self.data
                       .iter()
                       .zip(&other.data)
                       .map(|(&a, &b)| element_type.normalize(f(a, b)))
                       .collect();

        Ok(Self { rows: self.rows,
                  columns: self.columns,
                  element_type,
                  data })
    }

    /// Cellwise sum.
    ///
    /// # Errors
    /// See [`Matrix::zip_with`].
    pub fn add(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_with(other, "addition", |a, b| a + b)
    }

    /// Cellwise difference.
    ///
    /// # Errors
    /// See [`Matrix::zip_with`].
    pub fn sub(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_with(other, "subtraction", |a, b| a - b)
    }

    /// Multiplies every cell by a scalar of type `factor_type`.
    ///
    /// # Errors
    /// Returns [`MatrixError::IncompatibleElementTypes`] if promotion fails.
    pub fn scale(&self, factor: f64, factor_type: ElementType) -> Result<Self, MatrixError> {
        let element_type = promote_or_err(factor_type, self.element_type)?;
        let data = self.data
                       .iter()
                       .map(|&cell| element_type.normalize(cell * factor))
                       .collect();

        Ok(Self { rows: self.rows,
                  columns: self.columns,
                  element_type,
                  data })
    }

    /// Computes the matrix product `self @ other`.
    ///
    /// The result is `self.rows() x other.columns()` with the promoted element
    /// type. For `Integer` results every cell is rounded once, after the whole
    /// sum has been accumulated, so both strategies agree exactly.
    ///
    /// # Errors
    /// - [`MatrixError::DimensionMismatch`] if `self.columns() !=
    ///   other.rows()`.
    /// - [`MatrixError::IncompatibleElementTypes`] if promotion fails.
    /// - [`MatrixError::TooLarge`] if the product would exceed [`MAX_CELLS`].
    ///
    /// # Example
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use matcalc::interpreter::value::{
    ///     element_type::ElementType,
    ///     matrix::{Matrix, MultiplyStrategy},
    /// };
    ///
    /// let a = Matrix::new(2, 2, ElementType::Integer, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = Matrix::new(2, 1, ElementType::Integer, vec![5.0, 6.0]).unwrap();
    ///
    /// let naive = a.multiply(&b, MultiplyStrategy::Naive).unwrap();
    /// assert_eq!(naive.data(), &[17.0, 39.0]);
    ///
    /// let tile_size = NonZeroUsize::new(1).unwrap();
    /// let blocked = a.multiply(&b, MultiplyStrategy::Blocked { tile_size }).unwrap();
    /// assert_eq!(naive, blocked);
    /// ```
    pub fn multiply(&self, other: &Self, strategy: MultiplyStrategy) -> Result<Self, MatrixError> {
        if self.columns != other.rows {
            return Err(MatrixError::DimensionMismatch { operation: "matrix product",
                                                        left:      self.shape(),
                                                        right:     other.shape(), });
        }
        let element_type = promote_or_err(self.element_type, other.element_type)?;

        tracing::debug!(left = ?self.shape(), right = ?other.shape(), %strategy, "matrix product");

        let mut product = Self::zeros(self.rows, other.columns, element_type)?;
        match strategy {
            MultiplyStrategy::Naive => self.multiply_transposed(other, &mut product),
            MultiplyStrategy::Blocked { tile_size } => {
                self.multiply_blocked(other, &mut product, tile_size.get());
            },
        }

        if element_type == ElementType::Integer {
            for cell in &mut product.data {
                *cell = element_type.normalize(*cell);
            }
        }
        Ok(product)
    }

    fn multiply_transposed(&self, other: &Self, product: &mut Self) {
        let (m, n, p) = (self.rows, self.columns, other.columns);
        let other_t = other.transpose();

        for i in 0..m {
            let row = &self.data[i * n..(i + 1) * n];
            for j in 0..p {
                let column = &other_t.data[j * n..(j + 1) * n];
                let mut sum = 0.0;
                for (a, b) in row.iter().zip(column) {
                    sum += a * b;
                }
                product.data[i * p + j] = sum;
            }
        }
    }

    fn multiply_blocked(&self, other: &Self, product: &mut Self, tile: usize) {
        let (m, n, p) = (self.rows, self.columns, other.columns);

        for ii in (0..m).step_by(tile) {
            let i_end = (ii + tile).min(m);
            for jj in (0..p).step_by(tile) {
                let j_end = (jj + tile).min(p);
                for kk in (0..n).step_by(tile) {
                    let k_end = (kk + tile).min(n);
                    for i in ii..i_end {
                        for k in kk..k_end {
                            let a = self.data[i * n + k];
                            let out = &mut product.data[i * p + jj..i * p + j_end];
                            let row = &other.data[k * p + jj..k * p + j_end];
                            for (c, b) in out.iter_mut().zip(row) {
                                *c += a * b;
                            }
                        }
                    }
                }
            }
        }
    }
}

fn promote_or_err(left: ElementType, right: ElementType) -> Result<ElementType, MatrixError> {
    promote(left, right).ok_or(MatrixError::IncompatibleElementTypes { left, right })
}

impl std::fmt::Display for Matrix {
    /// Renders the matrix as a bracketed list of rows, e.g. `[[1, 2], [3, 4]]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for j in 0..self.columns {
                if j > 0 {
                    write!(f, ", ")?;
                }
                let cell = self.data[i * self.columns + j];
                match self.element_type {
                    ElementType::Integer => write!(f, "{}", format_integral(cell))?,
                    ElementType::Float => write!(f, "{}", format_float(cell))?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
