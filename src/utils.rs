use num_traits::Float;
use std::iter::zip;

pub fn dot<T: Float>(a: &[T], b: &[T]) -> T {
    assert_eq!(a.len(), b.len());
    zip(a.iter(), b.iter()).fold(T::zero(), |acc, (x, y)| acc + *x * *y)
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::utils::dot;

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]), 12.0);
        assert_eq!(dot::<f32>(&[0.5], &[4.0]), 2.0);
    }

    #[test]
    #[should_panic]
    fn test_dot_length_mismatch() {
        dot(&[1.0, 2.0], &[1.0]);
    }
}
