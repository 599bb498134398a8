//! Integration tests for pgm-rle-cli
//!
//! Tests the full pipeline: write source images -> run manifest build -> verify output

use std::fs;
use std::path::Path;

use pgm_rle::Direction;
use pgm_rle_cli::manifest::build_all;
use pgm_rle_cli::{BatchManifest, convert_file, direction_for};
use tempfile::tempdir;

const STRIPES: &str = "P2\n6 2\n255\n9 9 9 9 9 9\n0 1 0 1 0 1\n";
const STRIPES_RLE: &str = "P8\n6 2\n255\n@ 9 6\n0 1 0 1 0 1\n";

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, contents).expect("Failed to write test image");
}

/// Extension dispatch picks the direction, then converts
#[test]
fn test_convert_by_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("stripes.pgm");
    let output = dir.path().join("stripes.pgmc");
    write(&input, STRIPES);

    let direction = direction_for(&input).unwrap();
    assert_eq!(direction, Direction::Encode);
    convert_file(&input, &output, direction).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), STRIPES_RLE);

    let back = dir.path().join("back.pgm");
    convert_file(&output, &back, direction_for(&output).unwrap()).unwrap();
    assert_eq!(fs::read_to_string(&back).unwrap(), STRIPES);
}

/// Unsupported extensions fail before any file is touched
#[test]
fn test_unsupported_extension_touches_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("stripes.txt");
    write(&input, STRIPES);

    assert!(direction_for(&input).is_err());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

/// Error context names the failing stage
#[test]
fn test_error_names_stage() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("broken.pgm");
    write(&input, "P2\n# no dimensions follow\n");

    let err = convert_file(&input, &dir.path().join("broken.pgmc"), Direction::Encode)
        .unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("header error"), "{msg}");
    assert!(msg.contains("Missing image header"), "{msg}");
}

#[test]
fn test_build_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(&dir.path().join("src/stripes.pgm"), STRIPES);
    write(&dir.path().join("src/packed.pgmc"), STRIPES_RLE);

    let manifest_path = dir.path().join("pgm-rle.toml");
    write(
        &manifest_path,
        r#"
[output]
dir = "out"

[[images]]
input = "src/stripes.pgm"

[[images]]
input = "src/packed.pgmc"
output = "unpacked.pgm"
"#,
    );

    let manifest = BatchManifest::load(&manifest_path).unwrap();
    manifest.validate().unwrap();
    let results = build_all(&manifest, dir.path(), None).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].direction, Direction::Encode);
    assert_eq!(results[1].direction, Direction::Decode);
    assert_eq!(
        fs::read_to_string(dir.path().join("out/stripes.pgmc")).unwrap(),
        STRIPES_RLE
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("out/unpacked.pgm")).unwrap(),
        STRIPES
    );
}

#[test]
fn test_build_stops_on_malformed_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(&dir.path().join("short.pgm"), "P2\n10 10\n255\n1 2 3\n");
    let manifest = BatchManifest::parse(
        r#"
[[images]]
input = "short.pgm"
"#,
    )
    .unwrap();

    let err = build_all(&manifest, dir.path(), None).unwrap_err();
    assert!(format!("{:#}", err).contains("body error"));
    assert!(!dir.path().join("short.pgmc").exists());
}
