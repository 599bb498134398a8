//! pgm-rle.toml batch manifest
//!
//! ```toml
//! [output]
//! dir = "out"
//!
//! [[images]]
//! input = "scans/page1.pgm"
//!
//! [[images]]
//! input = "archive/page2.pgmc"
//! output = "page2.pgm"
//! direction = "decode"
//! ```
//!
//! Relative paths resolve against the manifest's directory. Outputs land in
//! `output.dir` (or next to the manifest) and default to the input's file
//! name with the opposite extension.

use anyhow::{Context, Result, bail};
use pgm_rle::{ConvertStats, Direction};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::dispatch::{convert_file, default_output, direction_for};

/// Batch manifest structure
#[derive(Debug, Deserialize)]
pub struct BatchManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

/// Output location section
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest
    pub dir: Option<String>,
}

/// Single image entry
#[derive(Debug, Deserialize)]
pub struct ImageEntry {
    pub input: String,

    /// Output file name. Defaults to the input name with the opposite extension.
    #[serde(default)]
    pub output: Option<String>,

    /// Explicit direction. Inferred from the input extension when omitted.
    #[serde(default)]
    pub direction: Option<DirectionSetting>,
}

/// Direction as written in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionSetting {
    Encode,
    Decode,
}

impl From<DirectionSetting> for Direction {
    fn from(setting: DirectionSetting) -> Self {
        match setting {
            DirectionSetting::Encode => Direction::Encode,
            DirectionSetting::Decode => Direction::Decode,
        }
    }
}

impl ImageEntry {
    pub fn direction(&self) -> Result<Direction> {
        match self.direction {
            Some(setting) => Ok(setting.into()),
            None => direction_for(Path::new(&self.input)),
        }
    }
}

/// One resolved conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub direction: Direction,
}

impl BatchManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse pgm-rle.toml")
    }

    /// Validate entries without touching any image
    pub fn validate(&self) -> Result<()> {
        self.plan(Path::new(""), None).map(|_| ())
    }

    /// Output directory for a manifest living in `base_dir`
    pub fn output_dir(&self, base_dir: &Path, output_override: Option<&Path>) -> PathBuf {
        match (output_override, &self.output.dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) => base_dir.join(dir),
            (None, None) => base_dir.to_path_buf(),
        }
    }

    /// Resolve every entry to concrete paths
    ///
    /// All problems are collected and reported together.
    pub fn plan(&self, base_dir: &Path, output_override: Option<&Path>) -> Result<Vec<Job>> {
        if self.images.is_empty() {
            bail!("Manifest lists no images");
        }

        let out_dir = self.output_dir(base_dir, output_override);
        let mut jobs = Vec::with_capacity(self.images.len());
        let mut problems = Vec::new();
        let mut seen_outputs = HashSet::new();

        for (i, entry) in self.images.iter().enumerate() {
            let direction = match entry.direction() {
                Ok(direction) => direction,
                Err(e) => {
                    problems.push(format!("images[{}]: {}", i, e));
                    continue;
                }
            };

            let input = base_dir.join(&entry.input);
            let output = match &entry.output {
                Some(name) => out_dir.join(name),
                None => {
                    let name = Path::new(&entry.input)
                        .file_name()
                        .map(PathBuf::from)
                        .unwrap_or_default();
                    out_dir.join(default_output(&name, direction))
                }
            };

            if !seen_outputs.insert(output.clone()) {
                problems.push(format!(
                    "images[{}]: output {:?} is written by an earlier entry",
                    i, output
                ));
                continue;
            }

            jobs.push(Job {
                input,
                output,
                direction,
            });
        }

        if !problems.is_empty() {
            bail!("Invalid manifest:\n  {}", problems.join("\n  "));
        }
        Ok(jobs)
    }
}

/// Convert every image in the manifest, stopping at the first failure
pub fn build_all(
    manifest: &BatchManifest,
    base_dir: &Path,
    output_override: Option<&Path>,
) -> Result<Vec<ConvertStats>> {
    let jobs = manifest.plan(base_dir, output_override)?;

    let out_dir = manifest.output_dir(base_dir, output_override);
    if !out_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    }

    jobs.iter()
        .map(|job| convert_file(&job.input, &job.output, job.direction))
        .collect()
}
