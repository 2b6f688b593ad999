use std::ops;

use crate::error::{MatrixError, Result};
use crate::matrix::matrix::{Element, Matrix};

impl<T: Element> Matrix<T> {
    /// Adds `rhs` into `self` element by element.
    pub fn sum_assign(&mut self, rhs: &Matrix<T>) -> Result<()> {
        self.zip_assign(rhs, "sum", |a, b| a + b)
    }

    /// Subtracts `rhs` from `self` element by element.
    pub fn sub_assign(&mut self, rhs: &Matrix<T>) -> Result<()> {
        self.zip_assign(rhs, "sub", |a, b| a - b)
    }

    pub fn scale_mut(&mut self, scalar: T) {
        self.cells.iter_mut().for_each(|x| *x = *x * scalar);
    }

    fn zip_assign(
        &mut self,
        rhs: &Matrix<T>,
        op: &'static str,
        f: impl Fn(T, T) -> T,
    ) -> Result<()> {
        check_same_shape(self, rhs, op)?;
        self.cells
            .iter_mut()
            .zip(rhs.cells.iter())
            .for_each(|(a, b)| *a = f(*a, *b));
        Ok(())
    }
}

pub(crate) fn check_same_shape<T: Element>(
    lhs: &Matrix<T>,
    rhs: &Matrix<T>,
    op: &'static str,
) -> Result<()> {
    if !lhs.same_shape(rhs) {
        return Err(MatrixError::ShapeMismatch {
            op,
            left: lhs.shape(),
            right: rhs.shape(),
        });
    }
    Ok(())
}

pub fn sum<T: Element>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    let mut res = lhs.clone();
    res.sum_assign(rhs)?;
    Ok(res)
}

pub fn sub<T: Element>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>> {
    let mut res = lhs.clone();
    res.sub_assign(rhs)?;
    Ok(res)
}

pub fn scale<T: Element>(matrix: &Matrix<T>, scalar: T) -> Matrix<T> {
    let mut res = matrix.clone();
    res.scale_mut(scalar);
    res
}

impl<T: Element> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        sum(self, rhs)
    }
}

impl<T: Element> ops::Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn sub(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        sub(self, rhs)
    }
}

// Spelled out per scalar type so it does not overlap with `&Matrix<T> * &Matrix<T>`
macro_rules! impl_scalar_mul {
    ($($scalar:ty),*) => {
        $(
            impl ops::Mul<$scalar> for &Matrix<$scalar> {
                type Output = Matrix<$scalar>;

                fn mul(self, rhs: $scalar) -> Matrix<$scalar> {
                    scale(self, rhs)
                }
            }
        )*
    };
}

impl_scalar_mul!(f32, f64);

/// # Panics
///
/// Panics when the shapes differ; use [`Matrix::sum_assign`] to get the error instead.
impl<T: Element> ops::AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        if let Err(error) = self.sum_assign(rhs) {
            panic!("{}", error);
        }
    }
}

/// # Panics
///
/// Panics when the shapes differ; use [`Matrix::sub_assign`] to get the error instead.
impl<T: Element> ops::SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        if let Err(error) = Matrix::sub_assign(self, rhs) {
            panic!("{}", error);
        }
    }
}

impl<T: Element> ops::MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale_mut(rhs);
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn m(values: &[f64], shape: (usize, usize)) -> Matrix<f64> {
        Matrix::from_flat(values.to_vec(), shape).unwrap()
    }

    #[test]
    fn test_sum_sub() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], (2, 3));
        let b = m(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0], (2, 3));

        let c = sum(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[7.0; 6]);
        let c = sub(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[-5.0, -3.0, -1.0, 1.0, 3.0, 5.0]);

        // operands untouched
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!((&a + &b).unwrap(), sum(&a, &b).unwrap());
        assert_eq!((&a - &b).unwrap(), sub(&a, &b).unwrap());
    }

    #[test]
    fn test_shape_mismatch() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], (2, 3));
        let b = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], (3, 2));

        assert_eq!(
            sum(&a, &b).unwrap_err(),
            MatrixError::ShapeMismatch {
                op: "sum",
                left: (2, 3),
                right: (3, 2)
            }
        );
        assert!(sub(&a, &b).is_err());

        let mut c = a.clone();
        assert!(c.sum_assign(&b).is_err());
        assert!(c.sub_assign(&b).is_err());
        assert_eq!(c, a);
    }

    #[test]
    fn test_in_place() {
        let mut a = m(&[1.0, 2.0, 3.0, 4.0], (2, 2));
        let b = m(&[0.5, 0.5, 0.5, 0.5], (2, 2));

        a.sum_assign(&b).unwrap();
        assert_eq!(a.as_slice(), &[1.5, 2.5, 3.5, 4.5]);
        a -= &b;
        a -= &b;
        assert_eq!(a.as_slice(), &[0.5, 1.5, 2.5, 3.5]);
        a += &b;
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        a.scale_mut(2.0);
        assert_eq!(a.as_slice(), &[2.0, 4.0, 6.0, 8.0]);
        a *= 0.5;
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_scale() {
        let a = m(&[1.0, -2.0, 3.0], (1, 3));
        assert_eq!(scale(&a, -3.0).as_slice(), &[-3.0, 6.0, -9.0]);
        assert_eq!(&a * 0.0, Matrix::new(1, 3).unwrap());
        assert_eq!(a.as_slice(), &[1.0, -2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "Shape mismatch in sum")]
    fn test_add_assign_panics() {
        let mut a = m(&[1.0, 2.0], (1, 2));
        a += &m(&[1.0, 2.0], (2, 1));
    }
}
