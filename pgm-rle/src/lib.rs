//! PGM-RLE: lossless run-length codec for plain-text grayscale images
//!
//! Reads the plain-text grayscale format (`P2`), compacts long horizontal
//! runs of identical samples into `@ value count` triplets (`P8`), and
//! reverses the transform byte-for-byte.
//!
//! # Formats
//!
//! ```text
//! Plain (P2):                 Compacted (P8):
//!   P2                          P8
//!   # comment (optional)        4 2
//!   4 2                         255
//!   255                         @ 7 4
//!   7 7 7 7                     1 2 3 4
//!   1 2 3 4
//! ```
//!
//! Runs of [`MIN_RUN_LEN`] or more equal samples within a row become a run
//! token; shorter runs are written as one plain token per sample. Runs never
//! cross row boundaries on encode. The decoder consumes the body as a flat
//! token stream and stops once `width * height` samples are produced.
//!
//! # Usage
//!
//! ```
//! use pgm_rle::{decode_str, encode_to_string, parse_plain};
//!
//! let grid = parse_plain("P2\n7 1\n255\n5 5 5 5 9 9 2\n").unwrap();
//! let compacted = encode_to_string(&grid);
//! assert_eq!(compacted, "P8\n7 1\n255\n@ 5 4 9 9 2\n");
//!
//! let restored = decode_str(&compacted).unwrap();
//! assert_eq!(restored, grid);
//! ```

mod convert;
mod decode;
mod encode;
mod error;
mod grid;
mod plain;
mod scan;

pub use convert::{ConvertStats, Direction, ImageFormat, convert, read_image};
pub use decode::{decode_str, read_rle};
pub use encode::{RleToken, RunStats, encode_row, encode_to_string, run_stats, write_rle};
pub use error::{ErrorStage, PgmError, Result};
pub use grid::Grid;
pub use plain::{parse_plain, read_plain, write_plain, write_to_string};

// =============================================================================
// Constants
// =============================================================================

/// Magic token of the plain-text grayscale format
pub const PLAIN_MAGIC: &str = "P2";

/// Magic token of the compacted run-length format
pub const RLE_MAGIC: &str = "P8";

/// Marker that introduces a `@ value count` run token
pub const RUN_MARKER: char = '@';

/// Shortest run that is written as a run token
pub const MIN_RUN_LEN: usize = 4;

/// Conventional file extension for plain images
pub const PLAIN_EXT: &str = "pgm";

/// Conventional file extension for compacted images
pub const RLE_EXT: &str = "pgmc";

/// Largest sample value a grid can hold, and so the largest accepted maxValue
pub const MAX_SAMPLE: u32 = u8::MAX as u32;

