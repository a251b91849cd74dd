use super::{AlignmentResult, ScoreMatrix, ScoreModel};

/// Walks `matrix` back from `(m, n)` to the origin and returns one optimal
/// alignment. Ties are broken diagonal first, then left (gap in A), then up
/// (gap in B).
pub fn traceback(
    matrix: &ScoreMatrix,
    seq_a: &[u8],
    seq_b: &[u8],
    model: &ScoreModel,
) -> AlignmentResult {
    debug_assert_eq!(matrix.rows(), seq_a.len() + 1);
    debug_assert_eq!(matrix.cols(), seq_b.len() + 1);

    let score = matrix.final_score();
    let gap = model.gap_score as i64;
    let gap_symbol = model.gap_symbol;
    let capacity = seq_a.len() + seq_b.len();
    let mut aligned_a = Vec::with_capacity(capacity);
    let mut aligned_b = Vec::with_capacity(capacity);

    let (mut i, mut j) = (seq_a.len(), seq_b.len());
    while i > 0 && j > 0 {
        let (a, b) = (seq_a[i - 1], seq_b[j - 1]);
        let cell = matrix.get(i, j);
        if cell == matrix.get(i - 1, j - 1) + model.weight(a, b) as i64 {
            aligned_a.push(a);
            aligned_b.push(b);
            i -= 1;
            j -= 1;
        } else if cell == matrix.get(i, j - 1) + gap {
            aligned_a.push(gap_symbol);
            aligned_b.push(b);
            j -= 1;
        } else {
            aligned_a.push(a);
            aligned_b.push(gap_symbol);
            i -= 1;
        }
    }
    while j > 0 {
        aligned_a.push(gap_symbol);
        aligned_b.push(seq_b[j - 1]);
        j -= 1;
    }
    while i > 0 {
        aligned_a.push(seq_a[i - 1]);
        aligned_b.push(gap_symbol);
        i -= 1;
    }

    aligned_a.reverse();
    aligned_b.reverse();
    AlignmentResult {
        aligned_a,
        aligned_b,
        score,
        gap_symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::build_matrix;

    fn run(a: &[u8], b: &[u8], model: &ScoreModel) -> AlignmentResult {
        let matrix = build_matrix(a, b, model).unwrap();
        traceback(&matrix, a, b, model)
    }

    #[test]
    fn empty_sequences() {
        let res = run(b"", b"", &ScoreModel::default());
        assert!(res.is_empty());
        assert_eq!(res.score, 0);
    }

    #[test]
    fn one_side_empty_consumes_other_as_gaps() {
        let res = run(b"", b"ACG", &ScoreModel::default());
        assert_eq!(res.aligned_a, b"---");
        assert_eq!(res.aligned_b, b"ACG");
        assert_eq!(res.score, -3);

        let res = run(b"TT", b"", &ScoreModel::default());
        assert_eq!(res.aligned_a, b"TT");
        assert_eq!(res.aligned_b, b"--");
        assert_eq!(res.score, -2);
    }

    #[test]
    fn left_move_preferred_over_up() {
        let res = run(b"A", b"AT", &ScoreModel::default());
        assert_eq!(res.aligned_a, b"A-");
        assert_eq!(res.aligned_b, b"AT");
        assert_eq!(res.score, 0);
    }

    #[test]
    fn tie_break_on_textbook_case() {
        let res = run(b"GCAT", b"GATTACA", &ScoreModel::default());
        assert_eq!(res.aligned_a_str(), "GCA-T---");
        assert_eq!(res.aligned_b_str(), "G-ATTACA");
        assert_eq!(res.score, -2);

        let res = run(b"GATTACA", b"GCAT", &ScoreModel::default());
        assert_eq!(res.aligned_a_str(), "GATTACA-");
        assert_eq!(res.aligned_b_str(), "G----CAT");
        assert_eq!(res.score, -2);
    }

    #[test]
    fn configured_gap_score_drives_left_move() {
        let model = ScoreModel::new(5, -4, -3, b'-').unwrap();
        let res = run(b"ACGT", b"ACT", &model);
        assert_eq!(res.aligned_a_str(), "ACGT");
        assert_eq!(res.aligned_b_str(), "AC-T");
        assert_eq!(res.score, 12);

        let model = ScoreModel::new(2, -1, -2, b'-').unwrap();
        let res = run(b"GCAT", b"GATTACA", &model);
        assert_eq!(res.aligned_a_str(), "G--CA-T");
        assert_eq!(res.aligned_b_str(), "GATTACA");
        assert_eq!(res.score, -4);
        assert_eq!(res.rescore(&model), res.score);
    }

    #[test]
    fn custom_gap_symbol_is_emitted() {
        let model = ScoreModel::default().with_gap_symbol(b'.').unwrap();
        let res = run(b"AT", b"A", &model);
        assert_eq!(res.aligned_a, b"AT");
        assert_eq!(res.aligned_b, b"A.");
    }
}
