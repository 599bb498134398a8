//! Text scanning shared by the plain reader and the run-length decoder
//!
//! Both formats are whitespace-separated ASCII. The plain header is
//! line-oriented (magic line, comment lines, dimensions line) while every
//! body is a flat token stream where line breaks carry no meaning.
//!
//! Input is read as bytes and decoded lossily: comment lines may hold any
//! encoding, and a non-ASCII byte anywhere else fails token parsing.

use std::io::Read;

use crate::grid::sample_count;
use crate::{MAX_SAMPLE, PgmError, Result};

/// Read all of `reader` as text, replacing invalid UTF-8
pub(crate) fn read_text<R: Read>(mut reader: R) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(PgmError::Read)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Cursor over the source text
pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Next line without its terminator (`\n` or `\r\n`), `None` at end of input
    pub(crate) fn next_line(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let (line, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    pub(crate) fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume `c` if it is the next non-whitespace character
    pub(crate) fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Next maximal run of non-whitespace characters
    pub(crate) fn next_token(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }

    /// Like [`next_token`](Self::next_token) but also ends before `stop`,
    /// so `5@` yields `5` and leaves `@` for the next read
    pub(crate) fn next_token_before(&mut self, stop: char) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c.is_whitespace() || c == stop)
            .map_or(rest.len(), |(i, _)| i);
        self.pos += end;
        Some(&rest[..end])
    }
}

pub(crate) fn expect_magic(token: Option<&str>, expected: &'static str) -> Result<()> {
    match token {
        None => Err(PgmError::MissingMagic),
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(PgmError::UnexpectedMagic {
            expected,
            found: found.to_string(),
        }),
    }
}

/// Parse a width/height pair, rejecting zero and overflowing sizes
pub(crate) fn parse_dimensions(width: &str, height: &str) -> Result<(usize, usize)> {
    let invalid = || PgmError::InvalidDimensions(format!("{width} {height}"));
    let w = width.parse::<usize>().map_err(|_| invalid())?;
    let h = height.parse::<usize>().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(PgmError::ZeroDimensions);
    }
    sample_count(w, h)?;
    Ok((w, h))
}

pub(crate) fn parse_max_value(token: Option<&str>) -> Result<u32> {
    let token = token.ok_or(PgmError::MissingMaxValue)?;
    match token.parse::<u32>() {
        Ok(value) if (1..=MAX_SAMPLE).contains(&value) => Ok(value),
        _ => Err(PgmError::InvalidMaxValue(token.to_string())),
    }
}

pub(crate) fn parse_sample(token: &str) -> Option<u8> {
    token.parse::<u8>().ok()
}
