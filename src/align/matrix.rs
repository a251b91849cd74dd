use super::{AlignError, ScoreModel};

/// Dense `(m + 1) x (n + 1)` dynamic-programming matrix stored row-major.
/// Cell `(i, j)` holds the best score of aligning `seq_a[..i]` with `seq_b[..j]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl ScoreMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.cells[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[i64] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    pub fn final_score(&self) -> i64 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

fn check_bounds(len_a: usize, len_b: usize, model: &ScoreModel) -> Result<(), AlignError> {
    let overflow = || AlignError::ScoreOverflow { len_a, len_b };
    let total_len = len_a
        .checked_add(len_b)
        .and_then(|n| i64::try_from(n).ok())
        .ok_or_else(overflow)?;
    model
        .max_abs_score()
        .checked_mul(total_len)
        .ok_or_else(overflow)?;
    Ok(())
}

pub fn build_matrix(
    seq_a: &[u8],
    seq_b: &[u8],
    model: &ScoreModel,
) -> Result<ScoreMatrix, AlignError> {
    check_bounds(seq_a.len(), seq_b.len(), model)?;
    let (rows, cols) = (seq_a.len() + 1, seq_b.len() + 1);
    let num_cells = rows
        .checked_mul(cols)
        .ok_or(AlignError::MatrixTooLarge {
            len_a: seq_a.len(),
            len_b: seq_b.len(),
        })?;

    let gap = model.gap_score as i64;
    let mut cells = vec![0i64; num_cells];
    for j in 1..cols {
        cells[j] = j as i64 * gap;
    }
    for i in 1..rows {
        let (prev, cur) = cells[(i - 1) * cols..(i + 1) * cols].split_at_mut(cols);
        cur[0] = i as i64 * gap;
        let a = seq_a[i - 1];
        for j in 1..cols {
            let diag = prev[j - 1] + model.weight(a, seq_b[j - 1]) as i64;
            let left = cur[j - 1] + gap;
            let up = prev[j] + gap;
            cur[j] = diag.max(left).max(up);
        }
    }

    Ok(ScoreMatrix { rows, cols, cells })
}

/// Final alignment score computed with two rows of memory instead of the full matrix.
pub fn score_only(seq_a: &[u8], seq_b: &[u8], model: &ScoreModel) -> Result<i64, AlignError> {
    check_bounds(seq_a.len(), seq_b.len(), model)?;
    let gap = model.gap_score as i64;
    let mut prev: Vec<i64> = (0..=seq_b.len()).map(|j| j as i64 * gap).collect();
    let mut cur = vec![0i64; prev.len()];
    for (i, &a) in seq_a.iter().enumerate() {
        cur[0] = (i + 1) as i64 * gap;
        for (j, &b) in seq_b.iter().enumerate() {
            let diag = prev[j] + model.weight(a, b) as i64;
            let left = cur[j] + gap;
            let up = prev[j + 1] + gap;
            cur[j + 1] = diag.max(left).max(up);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    Ok(prev[seq_b.len()])
}
