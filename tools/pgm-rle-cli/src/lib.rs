//! pgm-rle-cli library
//!
//! Extension dispatch, batch manifests and image inspection on top of the
//! `pgm-rle` codec. The `pgm-rle` binary is a thin clap wrapper around these.

pub mod dispatch;
pub mod inspect;
pub mod manifest;

pub use dispatch::{convert_file, default_output, direction_for};
pub use inspect::{InspectReport, inspect};
pub use manifest::{BatchManifest, Job};

/// Default batch manifest file name
pub const DEFAULT_MANIFEST: &str = "pgm-rle.toml";
