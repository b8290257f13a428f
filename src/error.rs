//! Errors raised by the gradebook engine.

/// Data-integrity failures. Statistics over empty populations never error;
/// they fall back to defined defaults instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("student `{0}` not found")]
    StudentNotFound(String),
}

pub type GradeResult<T> = Result<T, GradeError>;
