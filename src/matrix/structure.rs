use crate::error::{MatrixError, Result};
use crate::matrix::matrix::{check_dims, Element, Matrix};
use crate::matrix::reduction::Tolerance;

/// Direction of a structural operation.
///
/// `RowWise` works along rows (stacking, one row for `arg_max`), `ColumnWise`
/// along columns (side by side, one column for `arg_max`), `Both` over the
/// whole matrix and is only meaningful for `arg_max`.
#[cfg_attr(feature = "python", pyo3::pyclass(eq, eq_int))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    RowWise,
    ColumnWise,
    Both,
}

impl<T: Element> Matrix<T> {
    /// `n x n` identity.
    pub fn identity(n: usize) -> Result<Self> {
        Matrix::identity_with_shape((n, n))
    }

    pub fn identity_with_shape(shape: (usize, usize)) -> Result<Self> {
        if shape.0 != shape.1 {
            return Err(MatrixError::ShapeMismatch {
                op: "identity",
                left: shape,
                right: (shape.0, shape.0),
            });
        }
        check_dims::<T>(shape.0, shape.1)?;
        Ok(Matrix::eye(shape.0))
    }

    pub(crate) fn eye(n: usize) -> Self {
        let mut res = Matrix::zeroed(n, n);
        for i in 0..n {
            res.cells[i * n + i] = T::one();
        }
        res
    }

    pub fn is_identity(&self) -> bool {
        self.is_identity_with(&Tolerance::exact())
    }

    pub fn is_identity_with(&self, tol: &Tolerance<T>) -> bool {
        self.rows == self.cols
            && self.cells.iter().enumerate().all(|(offset, &x)| {
                let expected = if offset / self.cols == offset % self.cols {
                    T::one()
                } else {
                    T::zero()
                };
                tol.is_negligible(x - expected)
            })
    }

    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<()> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        self.swap_rows_unchecked(row1, row2);
        Ok(())
    }

    pub(crate) fn swap_rows_unchecked(&mut self, row1: usize, row2: usize) {
        if row1 == row2 {
            return;
        }
        for k in 0..self.cols {
            self.cells.swap(row1 * self.cols + k, row2 * self.cols + k);
        }
    }

    /// Offset in the flat storage of the largest value of row `index`
    /// (`RowWise`), column `index` (`ColumnWise`) or the whole matrix (`Both`,
    /// `index` is ignored). Ties go to the first occurrence.
    pub fn arg_max(&self, axis: Axis, index: usize) -> Result<usize> {
        match axis {
            Axis::RowWise => {
                self.check_row(index)?;
                Ok(self.first_max(index * self.cols..(index + 1) * self.cols))
            }
            Axis::ColumnWise => {
                self.check_col(index)?;
                Ok(self.first_max((index..self.cells.len()).step_by(self.cols)))
            }
            Axis::Both => Ok(self.first_max(0..self.cells.len())),
        }
    }

    fn first_max(&self, offsets: impl Iterator<Item = usize>) -> usize {
        offsets
            .fold(None, |best: Option<usize>, offset| match best {
                Some(b)
                    if !(self.cells[offset] > self.cells[b]
                        || self.cells[b].is_nan() && !self.cells[offset].is_nan()) =>
                {
                    best
                }
                _ => Some(offset),
            })
            .unwrap_or(0)
    }

    /// Splits into two non-empty parts at `index`: the first `index` rows
    /// (`RowWise`) or columns (`ColumnWise`) and the rest.
    pub fn split(&self, index: usize, axis: Axis) -> Result<(Matrix<T>, Matrix<T>)> {
        match axis {
            Axis::RowWise => {
                self.check_split(Some(index), None, self.rows)?;
                let (top, bottom) = self.cells.split_at(index * self.cols);
                Ok((
                    Matrix {
                        rows: index,
                        cols: self.cols,
                        cells: top.to_vec(),
                    },
                    Matrix {
                        rows: self.rows - index,
                        cols: self.cols,
                        cells: bottom.to_vec(),
                    },
                ))
            }
            Axis::ColumnWise => {
                self.check_split(None, Some(index), self.cols)?;
                let lines = self.cells.chunks(self.cols);
                Ok((
                    Matrix {
                        rows: self.rows,
                        cols: index,
                        cells: lines.clone().flat_map(|l| &l[..index]).copied().collect(),
                    },
                    Matrix {
                        rows: self.rows,
                        cols: self.cols - index,
                        cells: lines.flat_map(|l| &l[index..]).copied().collect(),
                    },
                ))
            }
            Axis::Both => Err(MatrixError::InvalidArgument(
                "cannot split along both axes".into(),
            )),
        }
    }

    // Both halves of a split must be non-empty.
    fn check_split(&self, row: Option<usize>, col: Option<usize>, len: usize) -> Result<()> {
        let index = row.or(col).unwrap_or(0);
        if index == 0 || index >= len {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(())
    }

    /// Inverse through RREF of `[self | I]`.
    ///
    /// Pivots are compared against exact zero, so only exactly singular input
    /// reports `SingularMatrix`. A numerically singular matrix yields huge
    /// entries instead; use [`Matrix::inverse_with`] with a tolerance to reject it.
    pub fn inverse(&self) -> Result<Matrix<T>> {
        self.inverse_with(&Tolerance::exact())
    }

    pub fn inverse_with(&self, tol: &Tolerance<T>) -> Result<Matrix<T>> {
        if self.rows != self.cols {
            return Err(MatrixError::ShapeMismatch {
                op: "inverse",
                left: self.shape(),
                right: (self.rows, self.rows),
            });
        }

        let n = self.rows;
        let mut augmented = concat(self, &Matrix::eye(n), Axis::ColumnWise)?;
        augmented.to_rref_with(tol);

        let (left, right) = augmented.split(n, Axis::ColumnWise)?;
        if !left.is_identity_with(tol) {
            log::debug!("inverse: {}x{} matrix has rank {}", n, n, left.rank_with(tol));
            return Err(MatrixError::SingularMatrix);
        }

        Ok(right)
    }
}

/// Joins two matrices: `ColumnWise` puts `rhs` to the right of `lhs`,
/// `RowWise` stacks it below.
pub fn concat<T: Element>(lhs: &Matrix<T>, rhs: &Matrix<T>, axis: Axis) -> Result<Matrix<T>> {
    match axis {
        Axis::ColumnWise => {
            if lhs.rows != rhs.rows {
                return Err(MatrixError::ShapeMismatch {
                    op: "concat",
                    left: lhs.shape(),
                    right: rhs.shape(),
                });
            }
            Ok(Matrix {
                rows: lhs.rows,
                cols: lhs.cols + rhs.cols,
                cells: lhs
                    .cells
                    .chunks(lhs.cols)
                    .zip(rhs.cells.chunks(rhs.cols))
                    .flat_map(|(a, b)| a.iter().chain(b))
                    .copied()
                    .collect(),
            })
        }
        Axis::RowWise => {
            if lhs.cols != rhs.cols {
                return Err(MatrixError::ShapeMismatch {
                    op: "concat",
                    left: lhs.shape(),
                    right: rhs.shape(),
                });
            }
            let mut cells = Vec::with_capacity(lhs.cells.len() + rhs.cells.len());
            cells.extend_from_slice(&lhs.cells);
            cells.extend_from_slice(&rhs.cells);
            Ok(Matrix {
                rows: lhs.rows + rhs.rows,
                cols: lhs.cols,
                cells,
            })
        }
        Axis::Both => Err(MatrixError::InvalidArgument(
            "cannot concatenate along both axes".into(),
        )),
    }
}

pub fn inverse<T: Element>(matrix: &Matrix<T>) -> Result<Matrix<T>> {
    matrix.inverse()
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
