use std::collections::HashMap;
use std::ops;

use crate::error::{MatrixError, Result};
use crate::matrix::matrix::{Element, Matrix};
use crate::utils::dot;

/// Matrix product `lhs * rhs`, requires `lhs.cols() == rhs.rows()`.
pub fn matmul<T: Element>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    if lhs.cols != rhs.rows {
        return Err(MatrixError::ShapeMismatch {
            op: "matmul",
            left: lhs.shape(),
            right: rhs.shape(),
        });
    }

    let mut res = Matrix::zeroed(lhs.rows, rhs.cols);
    // columns of rhs, extracted on first use
    let mut col_map: HashMap<usize, Vec<T>> = HashMap::with_capacity(rhs.cols);

    for (i, row) in lhs.cells.chunks(lhs.cols).enumerate() {
        for j in 0..rhs.cols {
            let col = col_map
                .entry(j)
                .or_insert_with(|| rhs.column_unchecked(j));
            let offset = res.raw_index(i, j);
            res.cells[offset] = dot(row, col);
        }
    }

    Ok(res)
}

impl<T: Element> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        matmul(self, rhs)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
