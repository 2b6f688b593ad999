//! Dense row-major matrices over floating-point scalars: shape-checked
//! arithmetic, Gaussian elimination (REF / RREF), concatenation, splitting
//! and inversion.
//!
//! ```
//! use dense_matrix::matrix::matrix::Matrix;
//!
//! let a: Matrix<f64> = Matrix::from_flat(vec![1.0, 2.0, 3.0, 4.0], (2, 2)).unwrap();
//! let inv = a.inverse().unwrap();
//! assert!((inv.get(0, 0).unwrap() + 2.0).abs() < 1e-12);
//! ```
#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod matrix {
    pub mod arithmetic;
    pub mod matrix;
    pub mod multiply;
    pub mod reduction;
    pub mod structure;
}

pub mod error;
pub mod utils;

#[cfg(feature = "python")]
pub mod python;

pub use error::{MatrixError, Result};
pub use matrix::arithmetic::{scale, sub, sum};
pub use matrix::matrix::{Element, Matrix};
pub use matrix::multiply::matmul;
pub use matrix::reduction::{reduced_row_echelon, row_echelon, Tolerance};
pub use matrix::structure::{concat, inverse, Axis};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn dense_matrix(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyMatrix>()?;
    m.add_class::<Axis>()?;
    Ok(())
}
