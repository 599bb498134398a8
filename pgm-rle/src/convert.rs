//! File-level conversion
//!
//! The input is read and validated in full before the output file is
//! created, so a malformed input never creates or truncates the destination.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::scan::read_text;
use crate::{
    Grid, PLAIN_EXT, PLAIN_MAGIC, PgmError, RLE_EXT, RLE_MAGIC, Result, decode_str, parse_plain,
    write_plain, write_rle,
};

/// The two textual image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// One token per sample (`P2`)
    Plain,
    /// Run-length compacted (`P8`)
    Compacted,
}

impl ImageFormat {
    pub fn magic(self) -> &'static str {
        match self {
            ImageFormat::Plain => PLAIN_MAGIC,
            ImageFormat::Compacted => RLE_MAGIC,
        }
    }

    /// Conventional file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Plain => PLAIN_EXT,
            ImageFormat::Compacted => RLE_EXT,
        }
    }

    pub fn from_magic(magic: &str) -> Option<Self> {
        match magic {
            PLAIN_MAGIC => Some(ImageFormat::Plain),
            RLE_MAGIC => Some(ImageFormat::Compacted),
            _ => None,
        }
    }

    /// Parse text in this format
    pub fn parse(self, src: &str) -> Result<Grid> {
        match self {
            ImageFormat::Plain => parse_plain(src),
            ImageFormat::Compacted => decode_str(src),
        }
    }

    /// Serialize a grid in this format
    pub fn write<W: Write>(self, writer: &mut W, grid: &Grid) -> Result<()> {
        match self {
            ImageFormat::Plain => write_plain(writer, grid),
            ImageFormat::Compacted => write_rle(writer, grid),
        }
    }
}

/// Conversion direction chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plain -> compacted
    Encode,
    /// Compacted -> plain
    Decode,
}

impl Direction {
    pub fn input_format(self) -> ImageFormat {
        match self {
            Direction::Encode => ImageFormat::Plain,
            Direction::Decode => ImageFormat::Compacted,
        }
    }

    pub fn output_format(self) -> ImageFormat {
        match self {
            Direction::Encode => ImageFormat::Compacted,
            Direction::Decode => ImageFormat::Plain,
        }
    }

    /// Extension conventionally given to this direction's output
    pub fn output_extension(self) -> &'static str {
        self.output_format().extension()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => write!(f, "encode"),
            Direction::Decode => write!(f, "decode"),
        }
    }
}

/// Summary of a finished conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub direction: Direction,
    pub width: usize,
    pub height: usize,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl ConvertStats {
    pub fn samples(&self) -> usize {
        self.width * self.height
    }

    /// Plain size divided by compacted size
    pub fn ratio(&self) -> f64 {
        let (plain, compacted) = match self.direction {
            Direction::Encode => (self.input_bytes, self.output_bytes),
            Direction::Decode => (self.output_bytes, self.input_bytes),
        };
        if compacted == 0 {
            return 0.0;
        }
        plain as f64 / compacted as f64
    }
}

/// Convert `input` to `output` in the given direction
pub fn convert(input: &Path, output: &Path, direction: Direction) -> Result<ConvertStats> {
    let (src, input_bytes) = read_source(input)?;
    let grid = direction.input_format().parse(&src)?;
    tracing::debug!(
        %direction,
        width = grid.width(),
        height = grid.height(),
        "Read {}",
        input.display()
    );

    let file = File::create(output).map_err(|source| PgmError::Create {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    direction.output_format().write(&mut writer, &grid)?;
    writer.flush().map_err(PgmError::Write)?;
    let output_bytes = writer.get_ref().metadata().map_err(PgmError::Write)?.len();

    Ok(ConvertStats {
        direction,
        width: grid.width(),
        height: grid.height(),
        input_bytes,
        output_bytes,
    })
}

/// Read an image of either format, detected by its magic token
pub fn read_image(path: &Path) -> Result<(ImageFormat, Grid)> {
    let (src, _) = read_source(path)?;
    let magic = src.split_whitespace().next().ok_or(PgmError::MissingMagic)?;
    let format = ImageFormat::from_magic(magic).ok_or_else(|| PgmError::UnexpectedMagic {
        expected: "P2 or P8",
        found: magic.to_string(),
    })?;
    let grid = format.parse(&src)?;
    Ok((format, grid))
}

/// File contents as text plus the on-disk size in bytes
fn read_source(path: &Path) -> Result<(String, u64)> {
    let file = File::open(path).map_err(|source| PgmError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let len = file.metadata().map_err(PgmError::Read)?.len();
    Ok((read_text(file)?, len))
}
