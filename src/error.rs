use thiserror::Error;

/// Failures reported by matrix operations.
///
/// Every error is raised before the target matrix is touched, so a failed
/// in-place operation leaves its operand unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Index {} out of bounds for a {}x{} matrix", describe_index(.row, .col), .shape.0, .shape.1)]
    OutOfBounds {
        row: Option<usize>,
        col: Option<usize>,
        shape: (usize, usize),
    },
    #[error("Shape mismatch in {}: {}x{} and {}x{}", .op, .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Matrix is singular")]
    SingularMatrix,
}

impl MatrixError {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, MatrixError::OutOfBounds { .. })
    }
}

fn describe_index(row: &Option<usize>, col: &Option<usize>) -> String {
    match (*row, *col) {
        (Some(row), Some(col)) => format!("({}, {})", row, col),
        (Some(row), None) => format!("row {}", row),
        (None, Some(col)) => format!("column {}", col),
        (None, None) => "<none>".into(),
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
