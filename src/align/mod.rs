mod aligner;
mod error;
mod matrix;
mod result;
mod score_model;
mod traceback;

pub use aligner::PairwiseAligner;
pub use error::AlignError;
pub use matrix::{build_matrix, score_only, ScoreMatrix};
pub use result::{AlignOp, AlignmentResult, AlignmentStats};
pub use score_model::{
    ScoreModel, DEFAULT_GAP_SCORE, DEFAULT_GAP_SYMBOL, DEFAULT_MATCH_SCORE,
    DEFAULT_MISMATCH_SCORE,
};
pub use traceback::traceback;
