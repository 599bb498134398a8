//! pgm-rle - run-length compaction for plain-text grayscale images
//!
//! Compacts `.pgm` (P2) images into `.pgmc` (P8) run-length files and back.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pgm_rle::Direction;
use pgm_rle_cli::{BatchManifest, DEFAULT_MANIFEST, convert_file, default_output, direction_for};

#[derive(Parser)]
#[command(name = "pgm-rle")]
#[command(about = "Lossless run-length codec for plain-text grayscale images")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compact a plain image into run-length form
    Encode {
        /// Input .pgm file
        input: PathBuf,

        /// Output .pgmc file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expand a run-length image back to plain form
    Decode {
        /// Input .pgmc file
        input: PathBuf,

        /// Output .pgm file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode or decode depending on the input extension (.pgm / .pgmc)
    Convert {
        /// Input .pgm or .pgmc file
        input: PathBuf,

        /// Output file
        output: PathBuf,
    },

    /// Convert every image listed in a manifest
    Build {
        /// Path to pgm-rle.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without converting
    Check {
        /// Path to pgm-rle.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },

    /// Print header and run statistics for an image of either format
    Inspect {
        /// Input .pgm or .pgmc file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Encode { input, output } => {
            run_single(&input, output, Direction::Encode)?;
        }

        Commands::Decode { input, output } => {
            run_single(&input, output, Direction::Decode)?;
        }

        Commands::Convert { input, output } => {
            let direction = direction_for(&input)?;
            convert_file(&input, &output, direction)?;
        }

        Commands::Build { manifest, output } => {
            tracing::debug!("Building images from {:?}", manifest);
            let config = BatchManifest::load(&manifest)?;
            let base_dir = manifest.parent().unwrap_or(Path::new(""));
            let results =
                pgm_rle_cli::manifest::build_all(&config, base_dir, output.as_deref())?;
            tracing::info!("Build complete! {} images converted", results.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = BatchManifest::load(&manifest)?;
            config.validate()?;
            tracing::info!("Manifest is valid! {} images listed", config.images.len());
        }

        Commands::Inspect { input } => {
            let report = pgm_rle_cli::inspect(&input)?;
            println!("{}", report);
        }
    }

    Ok(())
}

fn run_single(input: &Path, output: Option<PathBuf>, direction: Direction) -> Result<()> {
    let output = output.unwrap_or_else(|| default_output(input, direction));
    convert_file(input, &output, direction)?;
    Ok(())
}
