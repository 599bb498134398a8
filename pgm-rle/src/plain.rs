//! Plain-text grayscale format (P2) reader and writer

use std::fmt::{Display, Write as _};
use std::io::{Read, Write};

use crate::grid::sample_count;
use crate::scan::{
    Scanner, expect_magic, parse_dimensions, parse_max_value, parse_sample, read_text,
};
use crate::{Grid, PLAIN_MAGIC, PgmError, Result};

/// Parse a plain image from text
///
/// Layout: magic line, any number of `#` comment lines, a `width height`
/// line, the maxValue token, then `width * height` sample tokens. Line
/// breaks inside the sample body are not significant.
pub fn parse_plain(src: &str) -> Result<Grid> {
    let mut scan = Scanner::new(src);

    let magic_line = scan.next_line().ok_or(PgmError::MissingMagic)?;
    expect_magic(magic_line.split_whitespace().next(), PLAIN_MAGIC)?;

    let dims_line = loop {
        match scan.next_line() {
            None => return Err(PgmError::MissingHeader),
            Some(line) if line.starts_with('#') => continue,
            Some(line) => break line,
        }
    };
    let mut dims = dims_line.split_whitespace();
    let (width, height) = match (dims.next(), dims.next()) {
        (Some(w), Some(h)) => parse_dimensions(w, h)?,
        _ => return Err(PgmError::InvalidDimensions(dims_line.trim().to_string())),
    };

    let max_value = parse_max_value(scan.next_token())?;

    let expected = sample_count(width, height)?;
    // Every sample needs at least one byte of text
    let mut samples = Vec::with_capacity(expected.min(src.len()));
    for index in 0..expected {
        let token = scan.next_token().ok_or(PgmError::MissingSamples {
            expected,
            found: index,
        })?;
        let sample = parse_sample(token).ok_or_else(|| PgmError::InvalidSample {
            index,
            token: token.to_string(),
        })?;
        samples.push(sample);
    }

    tracing::debug!(width, height, max_value, "Parsed plain image");
    Grid::new(width, height, max_value, samples)
}

/// Read a plain image from any reader
pub fn read_plain<R: Read>(reader: R) -> Result<Grid> {
    parse_plain(&read_text(reader)?)
}

/// Write a grid in plain format, one line per row
pub fn write_plain<W: Write>(writer: &mut W, grid: &Grid) -> Result<()> {
    writer
        .write_all(header(PLAIN_MAGIC, grid).as_bytes())
        .map_err(PgmError::Write)?;
    for row in grid.rows() {
        let mut line = join_tokens(row);
        line.push('\n');
        writer.write_all(line.as_bytes()).map_err(PgmError::Write)?;
    }
    Ok(())
}

/// Render a grid in plain format
pub fn write_to_string(grid: &Grid) -> String {
    let mut out = header(PLAIN_MAGIC, grid);
    for row in grid.rows() {
        out.push_str(&join_tokens(row));
        out.push('\n');
    }
    out
}

/// `magic`, `width height` and maxValue lines
pub(crate) fn header(magic: &str, grid: &Grid) -> String {
    format!(
        "{magic}\n{} {}\n{}\n",
        grid.width(),
        grid.height(),
        grid.max_value()
    )
}

/// Tokens separated by single spaces, no trailing separator
pub(crate) fn join_tokens<T: Display>(tokens: impl IntoIterator<Item = T>) -> String {
    let mut out = String::new();
    for (i, token) in tokens.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{token}");
    }
    out
}
