use super::ScoreModel;
use itertools::Itertools;
use std::fmt;

/// Classification of a single alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignOp {
    Match,
    Mismatch,
    /// Symbol present only in sequence B (gap in A).
    Insertion,
    /// Symbol present only in sequence A (gap in B).
    Deletion,
}

impl AlignOp {
    fn cigar_char(&self) -> char {
        match self {
            AlignOp::Match => '=',
            AlignOp::Mismatch => 'X',
            AlignOp::Insertion => 'I',
            AlignOp::Deletion => 'D',
        }
    }

    fn marker(&self) -> char {
        match self {
            AlignOp::Match => '|',
            AlignOp::Mismatch => '.',
            AlignOp::Insertion | AlignOp::Deletion => ' ',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub length: usize,
    pub identity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub aligned_a: Vec<u8>,
    pub aligned_b: Vec<u8>,
    /// Optimal global score, equal to the bottom-right cell of the score matrix.
    pub score: i64,
    pub(crate) gap_symbol: u8,
}

impl AlignmentResult {
    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    pub fn gap_symbol(&self) -> u8 {
        self.gap_symbol
    }

    pub fn aligned_a_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_a).into_owned()
    }

    pub fn aligned_b_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_b).into_owned()
    }

    pub fn ops(&self) -> Vec<AlignOp> {
        let gap = self.gap_symbol;
        self.aligned_a
            .iter()
            .zip(self.aligned_b.iter())
            .map(|(&a, &b)| match (a == gap, b == gap) {
                (true, _) => AlignOp::Insertion,
                (_, true) => AlignOp::Deletion,
                _ if a == b => AlignOp::Match,
                _ => AlignOp::Mismatch,
            })
            .collect()
    }

    pub fn stats(&self) -> AlignmentStats {
        let mut stats = AlignmentStats {
            length: self.len(),
            ..Default::default()
        };
        for op in self.ops() {
            match op {
                AlignOp::Match => stats.matches += 1,
                AlignOp::Mismatch => stats.mismatches += 1,
                AlignOp::Insertion => stats.insertions += 1,
                AlignOp::Deletion => stats.deletions += 1,
            }
        }
        if stats.length > 0 {
            stats.identity = stats.matches as f64 / stats.length as f64;
        }
        stats
    }

    /// Extended CIGAR string (`=`, `X`, `I`, `D`) describing B relative to A.
    pub fn cigar(&self) -> String {
        self.ops()
            .into_iter()
            .dedup_with_count()
            .map(|(count, op)| format!("{}{}", count, op.cigar_char()))
            .collect()
    }

    /// CIGAR for tabular output, with `*` standing in for an empty alignment.
    pub fn cigar_or_placeholder(&self) -> String {
        match self.cigar() {
            cigar if cigar.is_empty() => "*".to_string(),
            cigar => cigar,
        }
    }

    /// Aligned A, a marker line and aligned B, ready to print one above the other.
    pub fn matching(&self) -> (String, String, String) {
        let markers = self.ops().iter().map(AlignOp::marker).collect();
        (self.aligned_a_str(), markers, self.aligned_b_str())
    }

    /// Sums column contributions under `model`.
    pub fn rescore(&self, model: &ScoreModel) -> i64 {
        self.ops()
            .iter()
            .map(|op| match op {
                AlignOp::Match => model.match_score as i64,
                AlignOp::Mismatch => model.mismatch_score as i64,
                AlignOp::Insertion | AlignOp::Deletion => model.gap_score as i64,
            })
            .sum()
    }
}

impl fmt::Display for AlignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, markers, b) = self.matching();
        write!(f, "{}\n{}\n{}", a, markers, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(a: &str, b: &str, score: i64) -> AlignmentResult {
        AlignmentResult {
            aligned_a: a.as_bytes().to_vec(),
            aligned_b: b.as_bytes().to_vec(),
            score,
            gap_symbol: b'-',
        }
    }

    #[test]
    fn ops_classify_columns() {
        let res = result("AC-T", "AGTA", 0);
        assert_eq!(
            res.ops(),
            vec![
                AlignOp::Match,
                AlignOp::Mismatch,
                AlignOp::Insertion,
                AlignOp::Mismatch
            ]
        );
        let res = result("AT", "A-", 0);
        assert_eq!(res.ops(), vec![AlignOp::Match, AlignOp::Deletion]);
    }

    #[test]
    fn cigar_run_length_encodes_ops() {
        assert_eq!(result("GCA-T---", "G-ATTACA", -2).cigar(), "1=1D1=1I1=3I");
        assert_eq!(result("ATCG", "ATCG", 4).cigar(), "4=");
        assert_eq!(result("", "", 0).cigar(), "");
        assert_eq!(result("", "", 0).cigar_or_placeholder(), "*");
        assert_eq!(result("ATCG", "ATCG", 4).cigar_or_placeholder(), "4=");
    }

    #[test]
    fn matching_draws_marker_line() {
        let res = result("GCA-T---", "G-ATTACA", -2);
        let (a, markers, b) = res.matching();
        assert_eq!(a, "GCA-T---");
        assert_eq!(markers, "| | |   ");
        assert_eq!(b, "G-ATTACA");
        assert_eq!(
            format!("{}", result("AC", "AG", 0)),
            "AC\n|.\nAG"
        );
    }

    #[test]
    fn stats_count_columns() {
        let stats = result("AC-T", "AGTA", 0).stats();
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.mismatches, 2);
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.deletions, 0);
        assert_eq!(stats.length, 4);
        assert!((stats.identity - 0.25).abs() < f64::EPSILON);
        assert_eq!(result("", "", 0).stats().identity, 0.0);
    }

    #[test]
    fn rescore_sums_column_scores() {
        let model = ScoreModel::new(2, -1, -3, b'-').unwrap();
        assert_eq!(result("AC-T", "AGTA", 0).rescore(&model), 2 - 1 - 3 - 1);
    }
}
