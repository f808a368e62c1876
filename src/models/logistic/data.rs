//! Design-matrix construction for the logistic model.
//!
//! - [`design_from_rows`] turns row-major sample data into an `Array2`,
//!   rejecting ragged input.
//! - [`augment_with_bias`] prepends the constant 1.0 column; the caller's
//!   matrix is never modified, a new one is returned.
use crate::models::errors::{ModelError, ModelResult};
use ndarray::{Array2, ArrayView2, s};

/// Copy `x` into a new matrix with a leading column of ones.
///
/// The result has shape `[n_samples, n_features + 1]`; column 0 is the bias.
pub fn augment_with_bias(x: ArrayView2<'_, f64>) -> Array2<f64> {
    let (n, k) = x.dim();
    let mut out = Array2::<f64>::ones((n, k + 1));
    out.slice_mut(s![.., 1..]).assign(&x);
    out
}

/// Build a design matrix from row-major samples.
///
/// # Errors
/// - [`ModelError::EmptyDesign`] when there are no rows or the first row is
///   empty.
/// - [`ModelError::RaggedDesign`] for the first row whose length differs
///   from row 0.
pub fn design_from_rows(rows: &[Vec<f64>]) -> ModelResult<Array2<f64>> {
    let n_features = rows.first().map_or(0, Vec::len);
    if rows.is_empty() || n_features == 0 {
        return Err(ModelError::EmptyDesign { n_samples: rows.len(), n_features });
    }
    for (row, values) in rows.iter().enumerate() {
        if values.len() != n_features {
            return Err(ModelError::RaggedDesign {
                row,
                expected: n_features,
                actual: values.len(),
            });
        }
    }
    Ok(Array2::from_shape_fn((rows.len(), n_features), |(i, j)| rows[i][j]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Augmentation prepends ones and leaves the source untouched.
    //
    // Given
    // -----
    // - A 2x2 matrix.
    //
    // Expect
    // ------
    // - A 2x3 matrix with column 0 all ones and the original values shifted
    //   right by one column.
    fn augment_prepends_bias_column() {
        // Arrange
        let x = array![[2.0, 3.0], [4.0, 5.0]];

        // Act
        let aug = augment_with_bias(x.view());

        // Assert
        assert_eq!(aug, array![[1.0, 2.0, 3.0], [1.0, 4.0, 5.0]]);
        assert_eq!(x, array![[2.0, 3.0], [4.0, 5.0]]);
    }

    #[test]
    fn rows_become_a_matrix() {
        let rows = vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]];
        let x = design_from_rows(&rows).expect("rectangular rows");
        assert_eq!(x, array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected_with_position() {
        let rows = vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0]];
        assert_eq!(
            design_from_rows(&rows),
            Err(ModelError::RaggedDesign { row: 2, expected: 2, actual: 1 })
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            design_from_rows(&[]),
            Err(ModelError::EmptyDesign { n_samples: 0, n_features: 0 })
        );
        assert_eq!(
            design_from_rows(&[vec![], vec![]]),
            Err(ModelError::EmptyDesign { n_samples: 2, n_features: 0 })
        );
    }
}
