use std::num::NonZeroUsize;

use matcalc::interpreter::value::{
    element_type::{ElementType, promote},
    matrix::{MAX_CELLS, Matrix, MatrixError, MultiplyStrategy},
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn matrix(rows: usize, columns: usize, element_type: ElementType, data: &[f64]) -> Matrix {
    Matrix::new(rows, columns, element_type, data.to_vec()).unwrap()
}

fn blocked(tile: usize) -> MultiplyStrategy {
    MultiplyStrategy::Blocked { tile_size: NonZeroUsize::new(tile).unwrap() }
}

#[test]
fn promotion_rule() {
    use ElementType::{Float, Integer};

    assert_eq!(promote(Integer, Integer), Some(Integer));
    assert_eq!(promote(Float, Float), Some(Float));
    assert_eq!(promote(Integer, Float), Some(Float));
    assert_eq!(promote(Float, Integer), Some(Float));
}

#[test]
fn integer_cells_are_rounded_half_up() {
    let m = matrix(1, 4, ElementType::Integer, &[2.5, -2.5, 1.4, -1.6]);
    assert_eq!(m.data(), &[3.0, -2.0, 1.0, -2.0]);

    let mut m = Matrix::zeros(1, 1, ElementType::Integer).unwrap();
    m.set(0, 0, 7.5);
    assert_eq!(m.get(0, 0), 8.0);
}

#[test]
fn buffer_length_must_match_shape() {
    assert_eq!(Matrix::new(2, 3, ElementType::Float, vec![0.0; 5]),
               Err(MatrixError::BufferLength { rows:    2,
                                               columns: 3,
                                               len:     5, }));
}

#[test]
fn widening_only_goes_from_integer_to_float() {
    let mut m = matrix(1, 2, ElementType::Integer, &[1.0, 2.0]);
    assert_eq!(m.widen_to(ElementType::Float), Ok(()));
    assert_eq!(m.element_type(), ElementType::Float);

    assert_eq!(m.widen_to(ElementType::Integer),
               Err(MatrixError::IncompatibleElementTypes { left:  ElementType::Float,
                                                           right: ElementType::Integer, }));
    assert_eq!(m.element_type(), ElementType::Float);
}

#[test]
fn elementwise_operations_check_shapes() {
    let a = matrix(2, 2, ElementType::Integer, &[1.0, 2.0, 3.0, 4.0]);
    let b = matrix(2, 2, ElementType::Float, &[0.5, 0.5, 0.5, 0.5]);

    let sum = a.add(&b).unwrap();
    assert_eq!(sum.element_type(), ElementType::Float);
    assert_eq!(sum.data(), &[1.5, 2.5, 3.5, 4.5]);

    let difference = a.sub(&a).unwrap();
    assert_eq!(difference.element_type(), ElementType::Integer);
    assert_eq!(difference.data(), &[0.0; 4]);

    let c = matrix(1, 4, ElementType::Integer, &[1.0, 2.0, 3.0, 4.0]);
    assert!(matches!(a.add(&c),
                     Err(MatrixError::DimensionMismatch { left: (2, 2),
                                                          right: (1, 4),
                                                          .. })));
}

#[test]
fn scaling_rounds_integer_results() {
    let a = matrix(1, 3, ElementType::Integer, &[1.0, 2.0, 3.0]);

    let doubled = a.scale(2.0, ElementType::Integer).unwrap();
    assert_eq!(doubled.element_type(), ElementType::Integer);
    assert_eq!(doubled.data(), &[2.0, 4.0, 6.0]);

    let halved = a.scale(0.5, ElementType::Float).unwrap();
    assert_eq!(halved.element_type(), ElementType::Float);
    assert_eq!(halved.data(), &[0.5, 1.0, 1.5]);
}

#[test]
fn multiply_rejects_incompatible_shapes() {
    let a = matrix(2, 3, ElementType::Integer, &[0.0; 6]);
    let b = matrix(2, 3, ElementType::Integer, &[0.0; 6]);

    for strategy in [MultiplyStrategy::Naive, blocked(1), blocked(32)] {
        assert_eq!(a.multiply(&b, strategy),
                   Err(MatrixError::DimensionMismatch { operation: "matrix product",
                                                        left:      (2, 3),
                                                        right:     (2, 3), }));
    }
}

#[test]
fn multiply_promotes_element_types() {
    let a = matrix(1, 2, ElementType::Integer, &[1.0, 2.0]);
    let b = matrix(2, 1, ElementType::Float, &[0.25, 0.25]);

    let product = a.multiply(&b, MultiplyStrategy::Naive).unwrap();
    assert_eq!(product.shape(), (1, 1));
    assert_eq!(product.element_type(), ElementType::Float);
    assert_eq!(product.get(0, 0), 0.75);
}

#[test]
fn multiply_handles_empty_inner_dimension() {
    let a = Matrix::zeros(2, 0, ElementType::Integer).unwrap();
    let b = Matrix::zeros(0, 3, ElementType::Integer).unwrap();

    for strategy in [MultiplyStrategy::Naive, blocked(2)] {
        let product = a.multiply(&b, strategy).unwrap();
        assert_eq!(product, Matrix::zeros(2, 3, ElementType::Integer).unwrap());
    }
}

#[test]
fn zeros_rejects_oversized_shapes() {
    assert_eq!(Matrix::zeros(1 << 32, 1 << 32, ElementType::Integer),
               Err(MatrixError::TooLarge { rows:    1 << 32,
                                           columns: 1 << 32, }));
    assert!(matches!(Matrix::zeros(MAX_CELLS + 1, 1, ElementType::Float),
                     Err(MatrixError::TooLarge { .. })));
    assert_eq!(Matrix::zeros(MAX_CELLS / 2, 0, ElementType::Float).unwrap().shape(),
               (MAX_CELLS / 2, 0));
}

#[test]
fn multiply_rejects_oversized_products() {
    let a = Matrix::zeros(1 << 13, 1, ElementType::Integer).unwrap();
    let b = Matrix::zeros(1, 1 << 12, ElementType::Integer).unwrap();

    for strategy in [MultiplyStrategy::Naive, blocked(16)] {
        assert_eq!(a.multiply(&b, strategy),
                   Err(MatrixError::TooLarge { rows:    1 << 13,
                                               columns: 1 << 12, }));
    }
}

#[test]
fn transpose_of_transpose_is_identity() {
    let m = matrix(2, 3, ElementType::Float, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(m.transpose().transpose(), m);
}

#[test]
fn display_uses_element_type() {
    assert_eq!(matrix(2, 1, ElementType::Integer, &[1.0, -2.0]).to_string(), "[[1], [-2]]");
    assert_eq!(matrix(1, 2, ElementType::Float, &[1.0, 0.5]).to_string(), "[[1.0, 0.5]]");
    assert_eq!(matrix(1, 2, ElementType::Float, &[1e-5, 2.5e20]).to_string(),
               "[[1.0e-5, 2.5e20]]");
}

fn element_type() -> impl Strategy<Value = ElementType> {
    prop_oneof![Just(ElementType::Integer), Just(ElementType::Float)]
}

/// Two matrices `m x n` and `n x p` with arbitrary element types.
fn compatible_pair() -> impl Strategy<Value = (Matrix, Matrix)> {
    (1usize..9, 0usize..9, 1usize..9, element_type(), element_type()).prop_flat_map(|(m, n, p, ta, tb)| {
        (prop::collection::vec(-100.0f64..100.0, m * n),
         prop::collection::vec(-100.0f64..100.0, n * p))
            .prop_map(move |(a, b)| {
                (Matrix::new(m, n, ta, a).unwrap(), Matrix::new(n, p, tb, b).unwrap())
            })
    })
}

proptest! {
    #[test]
    fn blocked_matches_naive((a, b) in compatible_pair(), tile in 1usize..12) {
        let naive = a.multiply(&b, MultiplyStrategy::Naive).unwrap();
        let tiled = a.multiply(&b, blocked(tile)).unwrap();

        prop_assert_eq!(naive.shape(), (a.rows(), b.columns()));
        prop_assert_eq!(naive.element_type(), promote(a.element_type(), b.element_type()).unwrap());
        prop_assert_eq!(naive, tiled);
    }

    #[test]
    fn integer_products_hold_whole_numbers((a, b) in compatible_pair()) {
        let product = a.multiply(&b, blocked(3)).unwrap();
        if product.element_type() == ElementType::Integer {
            prop_assert!(product.data().iter().all(|cell| cell.fract() == 0.0));
        }
    }

    #[test]
    fn mismatched_inner_dimensions_fail(m in 1usize..6, n in 1usize..6, k in 1usize..6, tile in 1usize..8) {
        prop_assume!(n != k);
        let a = Matrix::zeros(m, n, ElementType::Float).unwrap();
        let b = Matrix::zeros(k, m, ElementType::Float).unwrap();

        let is_mismatch = |r: Result<Matrix, MatrixError>| matches!(r, Err(MatrixError::DimensionMismatch { .. }));
        prop_assert!(is_mismatch(a.multiply(&b, MultiplyStrategy::Naive)));
        prop_assert!(is_mismatch(a.multiply(&b, blocked(tile))));
    }
}
