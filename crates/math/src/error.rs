use thiserror::Error;

/// Error generated by checked element access on a 2x2 matrix
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatrixError {
    #[error("Matrix index out of bounds (row: {row}, col: {col}, size: 2x2)")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
    },
}
