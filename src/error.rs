use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    #[error(
        "{left} and {right} disagree at ({row}, {col}): {expected} vs {actual} (difference {})",
        .expected - .actual
    )]
    Mismatch {
        left: &'static str,
        right: &'static str,
        row: usize,
        col: usize,
        expected: f32,
        actual: f32,
    },
    #[error("buffer of {got} elements cannot hold a {side}x{side} matrix")]
    DimensionMismatch { side: usize, got: usize },
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BenchError>;
