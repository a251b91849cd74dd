use super::AlignError;
use std::str::FromStr;

pub const DEFAULT_MATCH_SCORE: i32 = 1;
pub const DEFAULT_MISMATCH_SCORE: i32 = -1;
pub const DEFAULT_GAP_SCORE: i32 = -1;
pub const DEFAULT_GAP_SYMBOL: u8 = b'-';

/// Linear gap scoring scheme used for a single alignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreModel {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_score: i32,
    pub gap_symbol: u8,
}

impl Default for ScoreModel {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH_SCORE,
            mismatch_score: DEFAULT_MISMATCH_SCORE,
            gap_score: DEFAULT_GAP_SCORE,
            gap_symbol: DEFAULT_GAP_SYMBOL,
        }
    }
}

impl ScoreModel {
    pub fn new(
        match_score: i32,
        mismatch_score: i32,
        gap_score: i32,
        gap_symbol: u8,
    ) -> Result<Self, AlignError> {
        check_gap_symbol(gap_symbol)?;
        Ok(Self {
            match_score,
            mismatch_score,
            gap_score,
            gap_symbol,
        })
    }

    pub fn with_gap_symbol(self, gap_symbol: u8) -> Result<Self, AlignError> {
        check_gap_symbol(gap_symbol)?;
        Ok(Self { gap_symbol, ..self })
    }

    #[inline]
    pub fn weight(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    pub fn max_abs_score(&self) -> i64 {
        [self.match_score, self.mismatch_score, self.gap_score]
            .iter()
            .map(|s| (*s as i64).abs())
            .max()
            .unwrap_or(0)
    }

    /// Rejects inputs that already contain the gap symbol, since the
    /// resulting alignment could not be told apart from inserted gaps.
    pub fn validate_sequences(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<(), AlignError> {
        for (name, seq) in [("A", seq_a), ("B", seq_b)] {
            if let Some(pos) = seq.iter().position(|&c| c == self.gap_symbol) {
                return Err(AlignError::InvalidConfiguration(format!(
                    "gap symbol '{}' found in sequence {} at position {}",
                    self.gap_symbol as char,
                    name,
                    pos + 1
                )));
            }
        }
        Ok(())
    }
}

fn check_gap_symbol(gap_symbol: u8) -> Result<(), AlignError> {
    if gap_symbol.is_ascii_graphic() {
        Ok(())
    } else {
        Err(AlignError::InvalidConfiguration(format!(
            "gap symbol must be a printable ASCII character, got byte {}",
            gap_symbol
        )))
    }
}

/// Parses `MATCH,MISMATCH,GAP`, keeping the default gap symbol.
impl FromStr for ScoreModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NUM_EXPECTED_VALUES: usize = 3;
        let values = s
            .split(',')
            .map(|x| x.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid scoring value in {}: {}", s, e))?;
        if values.len() != NUM_EXPECTED_VALUES {
            return Err(format!(
                "Expected {} comma-separated values in scoring. Got {} -> {}",
                NUM_EXPECTED_VALUES,
                values.len(),
                s
            ));
        }
        ScoreModel::new(values[0], values[1], values[2], DEFAULT_GAP_SYMBOL)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_uses_unit_scores() {
        let model = ScoreModel::default();
        assert_eq!(model.match_score, 1);
        assert_eq!(model.mismatch_score, -1);
        assert_eq!(model.gap_score, -1);
        assert_eq!(model.gap_symbol, b'-');
    }

    #[test]
    fn weight_distinguishes_match_and_mismatch() {
        let model = ScoreModel::new(2, -3, -1, b'-').unwrap();
        assert_eq!(model.weight(b'A', b'A'), 2);
        assert_eq!(model.weight(b'A', b'C'), -3);
    }

    #[test]
    fn non_printable_gap_symbol_is_rejected() {
        assert!(matches!(
            ScoreModel::new(1, -1, -1, b' '),
            Err(AlignError::InvalidConfiguration(_))
        ));
        assert!(ScoreModel::default().with_gap_symbol(b'\n').is_err());
        assert_eq!(
            ScoreModel::default().with_gap_symbol(b'.').unwrap().gap_symbol,
            b'.'
        );
    }

    #[test]
    fn gap_symbol_inside_sequence_is_rejected() {
        let model = ScoreModel::default();
        assert!(model.validate_sequences(b"ACGT", b"AC").is_ok());
        assert_eq!(
            model.validate_sequences(b"ACGT", b"AC-T"),
            Err(AlignError::InvalidConfiguration(
                "gap symbol '-' found in sequence B at position 3".to_string()
            ))
        );
    }

    #[test]
    fn max_abs_score_picks_largest_magnitude() {
        let model = ScoreModel::new(2, -7, -3, b'-').unwrap();
        assert_eq!(model.max_abs_score(), 7);
        let model = ScoreModel::new(i32::MIN, 0, 0, b'-').unwrap();
        assert_eq!(model.max_abs_score(), 2_147_483_648);
    }

    #[test]
    fn parse_scoring_string() {
        let model: ScoreModel = "2,-1,-2".parse().unwrap();
        assert_eq!(model, ScoreModel::new(2, -1, -2, b'-').unwrap());
    }

    #[test]
    fn parse_scoring_string_wrong_count() {
        assert_eq!(
            "1,-1".parse::<ScoreModel>(),
            Err("Expected 3 comma-separated values in scoring. Got 2 -> 1,-1".to_string())
        );
        assert!("1,x,-1".parse::<ScoreModel>().is_err());
    }
}
