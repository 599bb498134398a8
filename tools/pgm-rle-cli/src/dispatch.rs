//! Direction selection and single-file conversion

use anyhow::{Result, bail};
use pgm_rle::{ConvertStats, Direction, ErrorStage, PLAIN_EXT, RLE_EXT};
use std::path::{Path, PathBuf};

/// Pick a direction from the input extension: `.pgm` encodes, `.pgmc` decodes
///
/// Matching ignores case. Anything else is a usage error.
pub fn direction_for(input: &Path) -> Result<Direction> {
    let Some(ext) = input.extension().and_then(|e| e.to_str()) else {
        bail!(
            "Cannot determine mode from {:?}: expected a .{} or .{} extension",
            input,
            PLAIN_EXT,
            RLE_EXT
        );
    };

    match ext.to_lowercase().as_str() {
        PLAIN_EXT => Ok(Direction::Encode),
        RLE_EXT => Ok(Direction::Decode),
        _ => bail!(
            "Unsupported extension .{} on {:?} (use .{} to compact or .{} to decompress)",
            ext,
            input,
            PLAIN_EXT,
            RLE_EXT
        ),
    }
}

/// Output path used when none is given: the input with the opposite extension
pub fn default_output(input: &Path, direction: Direction) -> PathBuf {
    input.with_extension(direction.output_extension())
}

/// Convert one file and log the result
pub fn convert_file(input: &Path, output: &Path, direction: Direction) -> Result<ConvertStats> {
    let stats = pgm_rle::convert(input, output, direction).map_err(|e| {
        let stage = stage_name(e.stage());
        anyhow::Error::new(e).context(format!(
            "Failed to {} {:?} ({} error)",
            direction, input, stage
        ))
    })?;

    tracing::info!(
        "{}d {:?} -> {:?}: {}x{} ({} samples), {} -> {} bytes ({:.2}:1)",
        direction,
        input,
        output,
        stats.width,
        stats.height,
        stats.samples(),
        stats.input_bytes,
        stats.output_bytes,
        stats.ratio()
    );

    Ok(stats)
}

fn stage_name(stage: ErrorStage) -> &'static str {
    match stage {
        ErrorStage::Io => "I/O",
        ErrorStage::Header => "header",
        ErrorStage::Body => "body",
    }
}
