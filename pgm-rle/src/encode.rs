//! Run-length encoder
//!
//! Each row is scanned left to right. At every position the maximal run of
//! equal samples is measured; runs of at least [`MIN_RUN_LEN`] become a single
//! `@ value count` token, shorter runs are written sample by sample. Runs never
//! continue into the next row.

use std::fmt;
use std::io::Write;

use crate::plain::{header, join_tokens};
use crate::{Grid, MIN_RUN_LEN, PgmError, RLE_MAGIC, RUN_MARKER, Result};

/// One token of a compacted row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RleToken {
    /// A single sample written as-is
    Sample(u8),
    /// `count` copies of `value`
    Run { value: u8, count: usize },
}

impl RleToken {
    /// Number of samples this token expands to
    pub fn len(&self) -> usize {
        match self {
            RleToken::Sample(_) => 1,
            RleToken::Run { count, .. } => *count,
        }
    }

    /// True only for a zero-length run
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for RleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RleToken::Sample(value) => write!(f, "{value}"),
            RleToken::Run { value, count } => write!(f, "{RUN_MARKER} {value} {count}"),
        }
    }
}

/// Tokenize one row with greedy leftmost maximal runs
pub fn encode_row(row: &[u8]) -> Vec<RleToken> {
    let mut tokens = Vec::new();
    let mut x = 0;

    while x < row.len() {
        let value = row[x];
        let run = row[x..].iter().take_while(|&&s| s == value).count();

        if run >= MIN_RUN_LEN {
            tracing::trace!(value, run, "Run token");
            tokens.push(RleToken::Run { value, count: run });
        } else {
            tokens.extend(std::iter::repeat_n(RleToken::Sample(value), run));
        }
        x += run;
    }

    tokens
}

/// Write a grid in compacted format, one line per row
pub fn write_rle<W: Write>(writer: &mut W, grid: &Grid) -> Result<()> {
    writer
        .write_all(header(RLE_MAGIC, grid).as_bytes())
        .map_err(PgmError::Write)?;
    for row in grid.rows() {
        let mut line = join_tokens(encode_row(row));
        line.push('\n');
        writer.write_all(line.as_bytes()).map_err(PgmError::Write)?;
    }
    Ok(())
}

/// Render a grid in compacted format
pub fn encode_to_string(grid: &Grid) -> String {
    let mut out = header(RLE_MAGIC, grid);
    for row in grid.rows() {
        out.push_str(&join_tokens(encode_row(row)));
        out.push('\n');
    }
    out
}

/// Token counts for a grid's compacted form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of run tokens
    pub runs: usize,
    /// Samples covered by run tokens
    pub run_samples: usize,
    /// Samples written as plain tokens
    pub literals: usize,
}

impl RunStats {
    /// Total tokens in the compacted body (a run counts as one)
    pub fn tokens(&self) -> usize {
        self.runs + self.literals
    }
}

/// Count runs and literals without rendering any text
pub fn run_stats(grid: &Grid) -> RunStats {
    let mut stats = RunStats::default();
    for token in grid.rows().flat_map(encode_row) {
        match token {
            RleToken::Sample(_) => stats.literals += 1,
            RleToken::Run { count, .. } => {
                stats.runs += 1;
                stats.run_samples += count;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::RleToken::{Run, Sample};

    fn row_text(row: &[u8]) -> String {
        join_tokens(encode_row(row))
    }

    #[test]
    fn test_three_equal_stay_plain() {
        assert_eq!(
            encode_row(&[8, 8, 8, 1]),
            vec![Sample(8), Sample(8), Sample(8), Sample(1)]
        );
        assert_eq!(row_text(&[8, 8, 8, 1]), "8 8 8 1");
    }

    #[test]
    fn test_four_equal_become_run() {
        assert_eq!(encode_row(&[8, 8, 8, 8]), vec![Run { value: 8, count: 4 }]);
        assert_eq!(row_text(&[8, 8, 8, 8]), "@ 8 4");
    }

    #[test]
    fn test_five_equal_single_run() {
        assert_eq!(row_text(&[3, 3, 3, 3, 3]), "@ 3 5");
    }

    #[test]
    fn test_mixed_row() {
        assert_eq!(
            encode_row(&[5, 5, 5, 5, 9, 9, 2]),
            vec![Run { value: 5, count: 4 }, Sample(9), Sample(9), Sample(2)]
        );
        assert_eq!(row_text(&[5, 5, 5, 5, 9, 9, 2]), "@ 5 4 9 9 2");
    }

    #[test]
    fn test_run_at_end_of_row() {
        assert_eq!(row_text(&[1, 2, 0, 0, 0, 0, 0, 0]), "1 2 @ 0 6");
    }

    #[test]
    fn test_runs_do_not_cross_rows() {
        let grid = Grid::new(3, 2, 255, vec![4; 6]).unwrap();
        assert_eq!(encode_to_string(&grid), "P8\n3 2\n255\n4 4 4\n4 4 4\n");
    }

    #[test]
    fn test_write_rle_matches_string() {
        let grid = Grid::new(7, 1, 255, vec![5, 5, 5, 5, 9, 9, 2]).unwrap();
        let mut buf = Vec::new();
        write_rle(&mut buf, &grid).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "P8\n7 1\n255\n@ 5 4 9 9 2\n");
        assert_eq!(text, encode_to_string(&grid));
    }

    #[test]
    fn test_single_pixel_is_plain() {
        assert_eq!(encode_row(&[200]), vec![Sample(200)]);
    }

    #[test]
    fn test_token_len() {
        assert_eq!(Sample(1).len(), 1);
        assert_eq!(Run { value: 1, count: 9 }.len(), 9);
        assert!(!Run { value: 1, count: 9 }.is_empty());
    }

    #[test]
    fn test_run_stats() {
        let grid = Grid::new(7, 2, 255, vec![5, 5, 5, 5, 9, 9, 2, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        let stats = run_stats(&grid);
        assert_eq!(stats.runs, 2);
        assert_eq!(stats.run_samples, 11);
        assert_eq!(stats.literals, 3);
        assert_eq!(stats.tokens(), 5);
    }
}
