//! Image inspection (header and run statistics)

use anyhow::{Context, Result};
use pgm_rle::{ImageFormat, RunStats, read_image, run_stats};
use std::fmt;
use std::path::Path;

/// What `pgm-rle inspect` prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub format: ImageFormat,
    pub width: usize,
    pub height: usize,
    pub max_value: u32,
    pub runs: RunStats,
    /// Samples above the declared maxValue
    pub out_of_range: usize,
}

/// Read an image of either format and summarize it
pub fn inspect(path: &Path) -> Result<InspectReport> {
    let (format, grid) =
        read_image(path).with_context(|| format!("Failed to inspect {:?}", path))?;

    let max_value = grid.max_value();
    let out_of_range = grid
        .samples()
        .iter()
        .filter(|&&s| u32::from(s) > max_value)
        .count();

    Ok(InspectReport {
        format,
        width: grid.width(),
        height: grid.height(),
        max_value,
        runs: run_stats(&grid),
        out_of_range,
    })
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match self.format {
            ImageFormat::Plain => "plain",
            ImageFormat::Compacted => "compacted",
        };
        writeln!(f, "Format:     {} ({})", format, self.format.magic())?;
        writeln!(f, "Size:       {}x{}", self.width, self.height)?;
        writeln!(f, "Max value:  {}", self.max_value)?;
        writeln!(f, "Samples:    {}", self.width * self.height)?;
        writeln!(
            f,
            "Runs:       {} covering {} samples",
            self.runs.runs, self.runs.run_samples
        )?;
        writeln!(f, "Literals:   {}", self.runs.literals)?;
        write!(f, "Tokens:     {}", self.runs.tokens())?;
        if self.out_of_range > 0 {
            write!(
                f,
                "\nWarning:    {} samples exceed max value",
                self.out_of_range
            )?;
        }
        Ok(())
    }
}
