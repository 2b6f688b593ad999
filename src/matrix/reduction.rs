//! Gaussian elimination: row-echelon form (REF) and reduced row-echelon form (RREF).
//!
//! Pivot tests go through a [`Tolerance`]. The plain methods use
//! [`Tolerance::exact`], which only treats `0` as zero; the `_with` variants
//! take an explicit threshold for inputs carrying rounding residue.

use crate::error::{MatrixError, Result};
use crate::matrix::matrix::{Element, Matrix};

/// Threshold under which a value counts as zero during pivoting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<T> {
    epsilon: T,
}

impl<T: Element> Tolerance<T> {
    /// Only an exact zero is negligible.
    pub fn exact() -> Self {
        Tolerance { epsilon: T::zero() }
    }

    pub fn new(epsilon: T) -> Result<Self> {
        if epsilon.is_nan() || epsilon < T::zero() {
            return Err(MatrixError::InvalidArgument(format!(
                "tolerance must be a non-negative number, got {}",
                epsilon
            )));
        }
        Ok(Tolerance { epsilon })
    }

    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    #[inline(always)]
    pub fn is_negligible(&self, x: T) -> bool {
        x.abs() <= self.epsilon
    }
}

impl<T: Element> Default for Tolerance<T> {
    fn default() -> Self {
        Tolerance::exact()
    }
}

impl<T: Element> Matrix<T> {
    /// Forward elimination with partial pivoting, in place.
    pub fn to_ref(&mut self) {
        self.to_ref_with(&Tolerance::exact())
    }

    pub fn to_ref_with(&mut self, tol: &Tolerance<T>) {
        let (mut h, mut k) = (0, 0);

        while h < self.rows && k < self.cols {
            // largest magnitude wins, first one on ties
            let pivot_row = (h + 1..self.rows).fold(h, |best, r| {
                if self.at(r, k).abs() > self.at(best, k).abs() {
                    r
                } else {
                    best
                }
            });

            let pivot = self.at(pivot_row, k);
            if tol.is_negligible(pivot) {
                log::trace!("ref: no pivot in column {}", k);
                k += 1;
                continue;
            }

            log::trace!("ref: pivot {} at ({}, {})", pivot, pivot_row, k);
            self.swap_rows_unchecked(h, pivot_row);

            for r in h + 1..self.rows {
                let factor = self.at(r, k) / pivot;
                let offset = self.raw_index(r, k);
                self.cells[offset] = T::zero();
                self.combine_rows(r, h, factor, k + 1);
            }

            h += 1;
            k += 1;
        }
    }

    /// Full reduction to RREF, in place. Returns `self` for chaining.
    pub fn to_rref(&mut self) -> &mut Self {
        self.to_rref_with(&Tolerance::exact())
    }

    pub fn to_rref_with(&mut self, tol: &Tolerance<T>) -> &mut Self {
        let mut r = 0;

        for j in 0..self.cols {
            if r == self.rows {
                break;
            }

            let Some(i) = (r..self.rows).find(|&i| !tol.is_negligible(self.at(i, j))) else {
                log::trace!("rref: no pivot in column {}", j);
                continue;
            };

            self.swap_rows_unchecked(i, r);

            let inv = T::one() / self.at(r, j);
            self.scale_row(r, inv);
            let offset = self.raw_index(r, j);
            self.cells[offset] = T::one();

            for k in 0..self.rows {
                let factor = self.at(k, j);
                if k == r || factor == T::zero() {
                    continue;
                }
                self.combine_rows(k, r, factor, j);
                let offset = self.raw_index(k, j);
                self.cells[offset] = T::zero();
            }

            r += 1;
        }

        self
    }

    pub fn is_ref(&self) -> bool {
        self.is_ref_with(&Tolerance::exact())
    }

    /// Leading entries move strictly right and zero rows sit at the bottom.
    pub fn is_ref_with(&self, tol: &Tolerance<T>) -> bool {
        self.pivot_columns(tol).is_some()
    }

    pub fn is_rref(&self) -> bool {
        self.is_rref_with(&Tolerance::exact())
    }

    pub fn is_rref_with(&self, tol: &Tolerance<T>) -> bool {
        let Some(pivots) = self.pivot_columns(tol) else {
            return false;
        };

        pivots.iter().enumerate().all(|(row, &col)| {
            tol.is_negligible(self.at(row, col) - T::one())
                && (0..self.rows).all(|r| r == row || tol.is_negligible(self.at(r, col)))
        })
    }

    /// Number of non-zero rows of the RREF.
    pub fn rank(&self) -> usize {
        self.rank_with(&Tolerance::exact())
    }

    pub fn rank_with(&self, tol: &Tolerance<T>) -> usize {
        let mut reduced = self.clone();
        reduced.to_rref_with(tol);
        reduced
            .cells
            .chunks(reduced.cols)
            .filter(|line| line.iter().any(|x| !tol.is_negligible(*x)))
            .count()
    }

    // Pivot column of each non-zero row, or None if the rows are not in echelon order.
    fn pivot_columns(&self, tol: &Tolerance<T>) -> Option<Vec<usize>> {
        let mut pivots: Vec<usize> = vec![];
        let mut seen_zero_row = false;

        for line in self.cells.chunks(self.cols) {
            match line.iter().position(|x| !tol.is_negligible(*x)) {
                None => seen_zero_row = true,
                Some(col) => {
                    if seen_zero_row || pivots.last().is_some_and(|&last| col <= last) {
                        return None;
                    }
                    pivots.push(col);
                }
            }
        }

        Some(pivots)
    }

    fn scale_row(&mut self, row: usize, factor: T) {
        let start = self.raw_index(row, 0);
        self.cells[start..start + self.cols]
            .iter_mut()
            .for_each(|x| *x = *x * factor);
    }

    // target[from..] -= factor * source[from..]
    fn combine_rows(&mut self, target: usize, source: usize, factor: T, from: usize) {
        for c in from..self.cols {
            let value = self.at(source, c);
            let offset = self.raw_index(target, c);
            self.cells[offset] = self.cells[offset] - factor * value;
        }
    }
}

pub fn row_echelon<T: Element>(matrix: &Matrix<T>) -> Matrix<T> {
    let mut res = matrix.clone();
    res.to_ref();
    res
}

pub fn reduced_row_echelon<T: Element>(matrix: &Matrix<T>) -> Matrix<T> {
    let mut res = matrix.clone();
    res.to_rref();
    res
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::init_test_logger;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn m(values: &[f64], shape: (usize, usize)) -> Matrix<f64> {
        Matrix::from_flat(values.to_vec(), shape).unwrap()
    }

    #[test]
    fn test_rref_invertible() {
        init_test_logger();
        let mut a = m(&[1.0, 2.0, 3.0, 4.0], (2, 2));
        a.to_rref();
        assert_abs_diff_eq!(a, m(&[1.0, 0.0, 0.0, 1.0], (2, 2)), epsilon = 1e-12);
        assert!(a.is_rref());
    }

    #[test]
    fn test_rref_singular() {
        let mut a = m(&[1.0, 2.0, 2.0, 4.0], (2, 2));
        a.to_rref();
        assert_eq!(a, m(&[1.0, 2.0, 0.0, 0.0], (2, 2)));
        assert_eq!(a.rank(), 1);
    }

    #[test]
    fn test_rref_non_contiguous_pivots() {
        let a = m(
            &[
                1.0, 2.0, 5.0, 77.0, //
                3.0, 6.0, 7.0, 11.0, //
                4.0, 8.0, 12.0, 88.0,
            ],
            (3, 4),
        );
        let reduced = reduced_row_echelon(&a);

        assert!(reduced.is_rref());
        assert_eq!(reduced.rank(), 2);
        // column 1 is twice column 0 so it carries no pivot
        assert_eq!(reduced.at(0, 0), 1.0);
        assert_eq!(reduced.at(1, 1), 0.0);
        assert_eq!(reduced.at(1, 2), 1.0);
        assert_eq!(reduced.row(2).unwrap(), &[0.0; 4]);
        assert!(!a.is_rref());
    }

    #[test]
    fn test_rref_chaining_and_idempotence() {
        let mut rng = StdRng::seed_from_u64(42);
        for (rows, cols) in [(3, 3), (3, 5), (5, 3), (1, 4)] {
            let mut a = Matrix::<f64>::random(rows, cols, &mut rng).unwrap();
            let once = a.to_rref().clone();
            a.to_rref();
            assert_eq!(a, once);
            assert!(once.is_rref());
        }
    }

    #[test]
    fn test_ref_partial_pivoting() {
        let mut a = m(&[1.0, 2.0, 1.0, 3.0, 8.0, 1.0, 0.0, 4.0, 1.0], (3, 3));
        a.to_ref();

        // row with 3 in column 0 moves up first
        assert_eq!(a.row(0).unwrap(), &[3.0, 8.0, 1.0]);
        assert!(a.is_ref());
        assert_eq!(a.at(1, 0), 0.0);
        assert_eq!(a.at(2, 0), 0.0);
        assert_eq!(a.at(2, 1), 0.0);
        assert_eq!(a.rank(), 3);
    }

    #[test]
    fn test_ref_skips_zero_column() {
        let mut a = m(&[0.0, 1.0, 2.0, 0.0, 2.0, 3.0], (2, 3));
        a.to_ref();
        assert_eq!(a, m(&[0.0, 2.0, 3.0, 0.0, 0.0, 0.5], (2, 3)));
        assert!(a.is_ref());
        assert!(!a.is_rref());

        let e = row_echelon(&m(&[0.0, 0.0, 0.0, 0.0], (2, 2)));
        assert!(e.is_rref());
        assert_eq!(e.rank(), 0);
    }

    #[test]
    fn test_ref_tolerance() {
        let tol = Tolerance::new(1e-12).unwrap();
        let a = m(&[1e-17, 1.0, 0.0, 1.0], (2, 2));

        // a tiny pivot is still a pivot in exact mode
        let strict = row_echelon(&a);
        assert_eq!(strict, a);
        assert_eq!(strict.rank(), 2);

        // tolerant mode skips column 0 and eliminates with column 1
        let mut tolerant = a.clone();
        tolerant.to_ref_with(&tol);
        assert_eq!(tolerant, m(&[1e-17, 1.0, 0.0, 0.0], (2, 2)));
        assert!(tolerant.is_ref_with(&tol));
        assert_eq!(tolerant.rank_with(&tol), 1);
    }

    #[test]
    fn test_tolerance() {
        assert!(Tolerance::<f64>::new(-1.0).is_err());
        assert!(Tolerance::<f64>::new(f64::NAN).is_err());
        assert_eq!(Tolerance::<f64>::default(), Tolerance::exact());

        let tol = Tolerance::new(1e-12).unwrap();
        assert!(tol.is_negligible(-1e-13));
        assert!(!Tolerance::exact().is_negligible(1e-300));

        let a = m(&[1.0, 1.0, 0.0, 1e-17], (2, 2));
        assert_eq!(a.rank(), 2);
        assert_eq!(a.rank_with(&tol), 1);

        let mut strict = a.clone();
        strict.to_rref();
        assert_eq!(strict, m(&[1.0, 0.0, 0.0, 1.0], (2, 2)));

        let mut tolerant = a.clone();
        tolerant.to_rref_with(&tol);
        assert_eq!(tolerant, a);
        assert!(tolerant.is_rref_with(&tol));
        assert!(!tolerant.is_rref());
    }

    #[test]
    fn test_is_ref() {
        assert!(m(&[1.0, 2.0, 0.0, 3.0], (2, 2)).is_ref());
        assert!(!m(&[0.0, 0.0, 0.0, 3.0], (2, 2)).is_ref());
        assert!(!m(&[0.0, 1.0, 1.0, 0.0], (2, 2)).is_ref());
        assert!(!m(&[1.0, 2.0, 0.0, 3.0], (2, 2)).is_rref());
    }
}
