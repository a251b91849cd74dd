use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Score may overflow for sequences of length {len_a} and {len_b}")]
    ScoreOverflow { len_a: usize, len_b: usize },
    #[error("Score matrix too large for sequences of length {len_a} and {len_b}")]
    MatrixTooLarge { len_a: usize, len_b: usize },
}
