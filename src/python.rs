use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;
use crate::matrix::multiply::matmul;
use crate::matrix::reduction::Tolerance;
use crate::matrix::structure::{concat, Axis};

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        if error.is_out_of_bounds() {
            PyIndexError::new_err(error.to_string())
        } else {
            PyValueError::new_err(error.to_string())
        }
    }
}

/// `Matrix<f64>` as seen from Python.
#[derive(Debug, Clone)]
#[pyclass(name = "Matrix")]
pub struct PyMatrix {
    inner: Matrix<f64>,
}

#[derive(Debug, FromPyObject)]
pub enum MatrixOrScalar {
    Matrix(PyMatrix),
    Scalar(f64),
}

impl From<Matrix<f64>> for PyMatrix {
    fn from(inner: Matrix<f64>) -> Self {
        PyMatrix { inner }
    }
}

impl PyMatrix {
    pub fn inner(&self) -> &Matrix<f64> {
        &self.inner
    }
}

#[pymethods]
impl PyMatrix {
    #[staticmethod]
    pub fn from_list(lines: Vec<Vec<f64>>) -> PyResult<PyMatrix> {
        Ok(Matrix::from_list(lines)?.into())
    }

    #[staticmethod]
    pub fn from_flat(values: Vec<f64>, shape: (usize, usize)) -> PyResult<PyMatrix> {
        Ok(Matrix::from_flat(values, shape)?.into())
    }

    #[staticmethod]
    pub fn zeros(rows: usize, cols: usize) -> PyResult<PyMatrix> {
        Ok(Matrix::new(rows, cols)?.into())
    }

    #[staticmethod]
    pub fn identity(n: usize) -> PyResult<PyMatrix> {
        Ok(Matrix::identity(n)?.into())
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    #[getter]
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    pub fn get(&self, i: usize, j: usize) -> PyResult<f64> {
        Ok(self.inner.get(i, j)?)
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> PyResult<()> {
        Ok(self.inner.set(i, j, value)?)
    }

    pub fn __add__(&self, rhs: PyRef<PyMatrix>) -> PyResult<PyMatrix> {
        Ok((&self.inner + &rhs.inner)?.into())
    }

    pub fn __sub__(&self, rhs: PyRef<PyMatrix>) -> PyResult<PyMatrix> {
        Ok((&self.inner - &rhs.inner)?.into())
    }

    pub fn __mul__(&self, rhs: MatrixOrScalar) -> PyResult<PyMatrix> {
        match rhs {
            MatrixOrScalar::Matrix(rhs) => Ok(matmul(&self.inner, &rhs.inner)?.into()),
            MatrixOrScalar::Scalar(scalar) => Ok((&self.inner * scalar).into()),
        }
    }

    pub fn __rmul__(&self, scalar: f64) -> PyMatrix {
        (&self.inner * scalar).into()
    }

    pub fn __eq__(&self, other: PyRef<PyMatrix>) -> bool {
        self.inner == other.inner
    }

    pub fn __repr__(&self) -> String {
        self.inner.to_string()
    }

    #[pyo3(signature = (epsilon = 0.0))]
    pub fn to_ref(&mut self, epsilon: f64) -> PyResult<()> {
        self.inner.to_ref_with(&Tolerance::new(epsilon)?);
        Ok(())
    }

    #[pyo3(signature = (epsilon = 0.0))]
    pub fn to_rref(&mut self, epsilon: f64) -> PyResult<()> {
        self.inner.to_rref_with(&Tolerance::new(epsilon)?);
        Ok(())
    }

    #[pyo3(signature = (epsilon = 0.0))]
    pub fn is_rref(&self, epsilon: f64) -> PyResult<bool> {
        Ok(self.inner.is_rref_with(&Tolerance::new(epsilon)?))
    }

    #[pyo3(signature = (epsilon = 0.0))]
    pub fn rank(&self, epsilon: f64) -> PyResult<usize> {
        Ok(self.inner.rank_with(&Tolerance::new(epsilon)?))
    }

    #[pyo3(signature = (epsilon = 0.0))]
    pub fn inverse(&self, epsilon: f64) -> PyResult<PyMatrix> {
        Ok(self.inner.inverse_with(&Tolerance::new(epsilon)?)?.into())
    }

    pub fn transpose(&self) -> PyMatrix {
        self.inner.transpose().into()
    }

    pub fn concat(&self, other: PyRef<PyMatrix>, axis: Axis) -> PyResult<PyMatrix> {
        Ok(concat(&self.inner, &other.inner, axis)?.into())
    }

    pub fn split(&self, index: usize, axis: Axis) -> PyResult<(PyMatrix, PyMatrix)> {
        let (first, second) = self.inner.split(index, axis)?;
        Ok((first.into(), second.into()))
    }

    #[pyo3(signature = (axis, index = 0))]
    pub fn arg_max(&self, axis: Axis, index: usize) -> PyResult<usize> {
        Ok(self.inner.arg_max(axis, index)?)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
