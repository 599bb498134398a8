//! Run-length decoder
//!
//! The header is read as whitespace-separated tokens: magic, width, height,
//! maxValue. The body is consumed as a flat token stream until
//! `width * height` samples have been produced; row breaks in the compacted
//! text are ignored and rows are rebuilt purely from `width`.
//!
//! A run whose count overshoots the remaining samples is clipped rather than
//! rejected, and anything after the last sample is ignored.

use std::io::Read;

use crate::scan::{
    Scanner, expect_magic, parse_dimensions, parse_max_value, parse_sample, read_text,
};
use crate::{Grid, PgmError, RLE_MAGIC, RUN_MARKER, Result};

/// Upper bound on the initial sample buffer reservation
const MAX_PREALLOC: usize = 1 << 24;

/// Decode compacted text into a grid
pub fn decode_str(src: &str) -> Result<Grid> {
    let mut scan = Scanner::new(src);

    expect_magic(scan.next_token(), RLE_MAGIC)?;
    let (width, height) = match (scan.next_token(), scan.next_token()) {
        (Some(w), Some(h)) => parse_dimensions(w, h)?,
        _ => return Err(PgmError::MissingHeader),
    };
    let max_value = parse_max_value(scan.next_token())?;

    // parse_dimensions rejects overflowing products
    let total = width * height;
    let mut samples = Vec::with_capacity(total.min(MAX_PREALLOC));

    while samples.len() < total {
        let index = samples.len();
        let truncated = || PgmError::MissingSamples {
            expected: total,
            found: index,
        };

        let (value, count) = if scan.eat(RUN_MARKER) {
            let value = scan.next_token().ok_or_else(truncated)?;
            let value = parse_sample(value).ok_or_else(|| invalid_run(index, value))?;
            let count = scan.next_token().ok_or_else(truncated)?;
            let count = count
                .parse::<usize>()
                .map_err(|_| invalid_run(index, count))?;
            (value, count)
        } else {
            let token = scan.next_token_before(RUN_MARKER).ok_or_else(truncated)?;
            let value = parse_sample(token).ok_or_else(|| PgmError::InvalidSample {
                index,
                token: token.to_string(),
            })?;
            (value, 1)
        };

        let remaining = total - index;
        if count > remaining {
            tracing::debug!(index, count, remaining, "Clipping run that overshoots image");
        }
        samples.extend(std::iter::repeat_n(value, count.min(remaining)));
    }

    tracing::debug!(width, height, max_value, "Decoded compacted image");
    Grid::new(width, height, max_value, samples)
}

/// Decode compacted data from any reader
pub fn read_rle<R: Read>(reader: R) -> Result<Grid> {
    decode_str(&read_text(reader)?)
}

fn invalid_run(index: usize, token: &str) -> PgmError {
    PgmError::InvalidRun {
        index,
        token: token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorStage, encode_to_string, write_to_string};

    #[test]
    fn test_decode_mixed_row() {
        let grid = decode_str("P8\n7 1\n255\n@ 5 4 9 9 2\n").unwrap();
        assert_eq!(grid.samples(), &[5, 5, 5, 5, 9, 9, 2]);
    }

    #[test]
    fn test_decode_writes_plain_layout() {
        let grid = decode_str("P8\n3 2\n255\n@ 1 4 2 3\n").unwrap();
        assert_eq!(write_to_string(&grid), "P2\n3 2\n255\n1 1 1\n1 2 3\n");
    }

    #[test]
    fn test_decode_ignores_row_boundaries() {
        // Original rows: [7 7 7 7 7] [7 7 0 0 0]
        let by_row = decode_str("P8\n5 2\n255\n@ 7 5\n7 7 0 0 0\n").unwrap();
        let straddled = decode_str("P8\n5 2\n255\n@ 7 7 0\n0 0").unwrap();
        let one_line = decode_str("P8 5 2 255 @ 7 7 @ 0 3").unwrap();
        assert_eq!(by_row, straddled);
        assert_eq!(by_row, one_line);
        assert_eq!(by_row.samples(), &[7, 7, 7, 7, 7, 7, 7, 0, 0, 0]);
    }

    #[test]
    fn test_marker_without_space() {
        let grid = decode_str("P8\n4 1\n9\n@3 4\n").unwrap();
        assert_eq!(grid.samples(), &[3, 3, 3, 3]);
    }

    #[test]
    fn test_marker_directly_after_sample() {
        let grid = decode_str("P8\n5 1\n255\n5@ 3 4\n").unwrap();
        assert_eq!(grid.samples(), &[5, 3, 3, 3, 3]);
    }

    #[test]
    fn test_overshooting_run_is_clipped() {
        let grid = decode_str("P8\n3 1\n255\n1 @ 2 10\n").unwrap();
        assert_eq!(grid.samples(), &[1, 2, 2]);
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let grid = decode_str("P8\n2 1\n255\n1 2 3 garbage\n").unwrap();
        assert_eq!(grid.samples(), &[1, 2]);
    }

    #[test]
    fn test_zero_count_run_expands_to_nothing() {
        let grid = decode_str("P8\n2 1\n255\n@ 9 0 1 2\n").unwrap();
        assert_eq!(grid.samples(), &[1, 2]);
    }

    #[test]
    fn test_roundtrip() {
        let samples: Vec<u8> = (0..60u32).map(|i| ((i / 5) % 3 * 40) as u8).collect();
        let grid = Grid::new(12, 5, 255, samples).unwrap();
        let decoded = decode_str(&encode_to_string(&grid)).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_single_pixel_roundtrip() {
        let grid = Grid::new(1, 1, 255, vec![17]).unwrap();
        let text = encode_to_string(&grid);
        assert_eq!(text, "P8\n1 1\n255\n17\n");
        assert_eq!(decode_str(&text).unwrap(), grid);
    }

    #[test]
    fn test_truncated_body() {
        let err = decode_str("P8\n4 4\n255\n@ 1 4 @ 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            PgmError::MissingSamples {
                expected: 16,
                found: 8
            }
        ));
        assert_eq!(err.stage(), ErrorStage::Body);

        assert!(matches!(
            decode_str("P8\n4 1\n255\n@ 1"),
            Err(PgmError::MissingSamples { found: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(matches!(
            decode_str("P8\n2 1\n255\n1 z\n"),
            Err(PgmError::InvalidSample { index: 1, .. })
        ));
        assert!(matches!(
            decode_str("P8\n4 1\n255\n@ 1 many\n"),
            Err(PgmError::InvalidRun { index: 0, .. })
        ));
        assert!(matches!(
            decode_str("P8\n4 1\n255\n@ 999 4\n"),
            Err(PgmError::InvalidRun { index: 0, .. })
        ));
    }

    #[test]
    fn test_bad_header() {
        assert!(matches!(decode_str(""), Err(PgmError::MissingMagic)));
        assert!(matches!(
            decode_str("P2\n1 1\n255\n0\n"),
            Err(PgmError::UnexpectedMagic { expected: "P8", .. })
        ));
        assert!(matches!(decode_str("P8\n4"), Err(PgmError::MissingHeader)));
        assert!(matches!(
            decode_str("P8\n4 x\n255\n"),
            Err(PgmError::InvalidDimensions(_))
        ));
        assert!(matches!(
            decode_str("P8\n4 1\n"),
            Err(PgmError::MissingMaxValue)
        ));
    }

    #[test]
    fn test_read_rle_from_reader() {
        let grid = read_rle("P8\n4 1\n255\n@ 0 4\n".as_bytes()).unwrap();
        assert_eq!(grid.samples(), &[0, 0, 0, 0]);
    }
}
