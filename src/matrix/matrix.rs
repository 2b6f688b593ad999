use approx::{AbsDiffEq, RelativeEq};
use itertools::Itertools;
use num_traits::Float;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;

use crate::error::{MatrixError, Result};

pub trait Element:  // Avoid repeating all the traits
    Float
    + fmt::Display
    + fmt::Debug
    + 'static
{
}

impl<T> Element for T where T: Float + fmt::Display + fmt::Debug + 'static {}

/// Dense row-major matrix, element `(i, j)` lives at `cells[i * cols + j]`.
///
/// The shape is fixed at construction and both dimensions are positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        check_dims::<T>(rows, cols)?;
        Ok(Matrix::zeroed(rows, cols))
    }

    // Callers guarantee a shape that passed `check_dims`.
    pub(crate) fn zeroed(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            cells: vec![T::zero(); rows * cols],
        }
    }

    /// Builds a matrix from row-major values; `values.len()` must equal `rows * cols`.
    pub fn from_flat(values: Vec<T>, shape: (usize, usize)) -> Result<Self> {
        let (rows, cols) = shape;
        let len = check_dims::<T>(rows, cols)?;
        if values.len() != len {
            return Err(MatrixError::ShapeMismatch {
                op: "from_flat",
                left: (1, values.len()),
                right: shape,
            });
        }
        Ok(Matrix {
            rows,
            cols,
            cells: values,
        })
    }

    /// Builds a matrix from a list of rows, all of the same length.
    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);
        check_dims::<T>(rows, cols)?;
        if let Some(bad) = lines.iter().find(|l| l.len() != cols) {
            return Err(MatrixError::ShapeMismatch {
                op: "from_list",
                left: (1, cols),
                right: (1, bad.len()),
            });
        }

        Ok(Matrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    /// Matrix with entries drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self>
    where
        Standard: Distribution<T>,
    {
        let len = check_dims::<T>(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            cells: (0..len).map(|_| rng.sample(Standard)).collect(),
        })
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        self.cells.chunks(self.cols).map(|line| line.into()).collect()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    pub fn same_shape(&self, other: &Matrix<T>) -> bool {
        self.shape() == other.shape()
    }

    /// Row-major offset of `(i, j)`, or `OutOfBounds` unless `i < rows` and `j < cols`.
    pub fn checked_index(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.rows || j >= self.cols {
            return Err(MatrixError::OutOfBounds {
                row: Some(i),
                col: Some(j),
                shape: self.shape(),
            });
        }
        Ok(self.raw_index(i, j))
    }

    /// Row-major offset of `(i, j)` without any bounds check.
    #[inline(always)]
    pub fn raw_index(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        Ok(self.cells[self.checked_index(i, j)?])
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        let offset = self.checked_index(i, j)?;
        self.cells[offset] = value;
        Ok(())
    }

    /// Unchecked read; panics through slice indexing when `(i, j)` is past the storage.
    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> T {
        self.cells[self.raw_index(i, j)]
    }

    pub fn row(&self, i: usize) -> Result<&[T]> {
        self.check_row(i)?;
        Ok(&self.cells[i * self.cols..(i + 1) * self.cols])
    }

    pub fn column(&self, j: usize) -> Result<Vec<T>> {
        self.check_col(j)?;
        Ok(self.column_unchecked(j))
    }

    pub(crate) fn column_unchecked(&self, j: usize) -> Vec<T> {
        self.cells.iter().skip(j).step_by(self.cols).copied().collect()
    }

    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }

    pub(crate) fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(MatrixError::OutOfBounds {
                row: Some(row),
                col: None,
                shape: self.shape(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.cols {
            return Err(MatrixError::OutOfBounds {
                row: None,
                col: Some(col),
                shape: self.shape(),
            });
        }
        Ok(())
    }
}

/// Number of cells of a `rows x cols` matrix of `T`; both dimensions must be
/// positive and the storage size must fit in an `isize`.
pub(crate) fn check_dims<T>(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        log::debug!("rejecting empty {}x{} matrix", rows, cols);
        return Err(MatrixError::InvalidArgument(format!(
            "matrix dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }
    let max_len = isize::MAX as usize / std::mem::size_of::<T>().max(1);
    rows.checked_mul(cols)
        .filter(|&len| len <= max_len)
        .ok_or_else(|| {
            log::debug!("rejecting oversized {}x{} matrix", rows, cols);
            MatrixError::InvalidArgument(format!(
                "matrix dimensions {}x{} exceed the addressable storage",
                rows, cols
            ))
        })
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for line in self.cells.chunks(self.cols) {
            writeln!(f, "\t{}", line.iter().join(", "))?;
        }
        write!(f, "]")
    }
}

impl<T: Element + AbsDiffEq<Epsilon = T>> AbsDiffEq for Matrix<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.same_shape(other)
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Element + RelativeEq<Epsilon = T>> RelativeEq for Matrix<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.same_shape(other)
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
