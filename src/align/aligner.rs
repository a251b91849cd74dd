use super::{
    build_matrix, score_only, traceback, AlignError, AlignmentResult, ScoreMatrix, ScoreModel,
};

/// Global pairwise aligner with linear gap costs.
///
/// The aligner only holds its immutable [`ScoreModel`]; every call allocates
/// its own score matrix, so a single instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairwiseAligner {
    model: ScoreModel,
}

impl PairwiseAligner {
    pub fn new(model: ScoreModel) -> Self {
        Self { model }
    }

    pub fn score_model(&self) -> &ScoreModel {
        &self.model
    }

    pub fn gap_symbol(&self) -> u8 {
        self.model.gap_symbol
    }

    pub fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<AlignmentResult, AlignError> {
        self.align_with_matrix(seq_a, seq_b).map(|(_, result)| result)
    }

    /// Same as [`align`](Self::align) but also hands back the filled score matrix.
    pub fn align_with_matrix(
        &self,
        seq_a: &[u8],
        seq_b: &[u8],
    ) -> Result<(ScoreMatrix, AlignmentResult), AlignError> {
        self.model.validate_sequences(seq_a, seq_b)?;
        let matrix = build_matrix(seq_a, seq_b, &self.model)?;
        let result = traceback(&matrix, seq_a, seq_b, &self.model);
        log::trace!(
            "Aligned {}x{} symbols: score={} length={}",
            seq_a.len(),
            seq_b.len(),
            result.score,
            result.len()
        );
        Ok((matrix, result))
    }

    /// Optimal score only, computed in linear space.
    pub fn score(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<i64, AlignError> {
        self.model.validate_sequences(seq_a, seq_b)?;
        score_only(seq_a, seq_b, &self.model)
    }
}
