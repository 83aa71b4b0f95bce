use super::*;
use crate::schema::columns;
use crate::table::TableError;
use tempfile::tempdir;

fn star_31() -> String {
    [
        "# version 30001",
        "",
        "data_optics",
        "",
        "loop_",
        "_rlnOpticsGroupName #1",
        "_rlnOpticsGroup #2",
        "_rlnMicrographOriginalPixelSize #3",
        "_rlnVoltage #4",
        "_rlnSphericalAberration #5",
        "_rlnAmplitudeContrast #6",
        "_rlnImagePixelSize #7",
        "_rlnImageSize #8",
        "_rlnImageDimensionality #9",
        "opticsGroup1 1 0.885000 300.000000 2.700000 0.100000 3.540000 64 2",
        "",
        "",
        "# version 30001",
        "",
        "data_particles",
        "",
        "loop_",
        "_rlnImageName #1",
        "_rlnMicrographName #2",
        "_rlnCoordinateX #3",
        "_rlnCoordinateY #4",
        "_rlnAnglePsi #5",
        "_rlnOriginXAngst #6",
        "_rlnOriginYAngst #7",
        "_rlnClassNumber #8",
        "000001@stack.mrcs mic_a.mrc 1024.000000 2048.000000 29.000000 3.540000 -7.080000 1",
        "000002@stack.mrcs mic_a.mrc 512.000000 256.000000 -13.500000 0.000000 1.770000 1",
        "000003@stack.mrcs mic_b.mrc 128.000000 64.000000 91.000000 -3.540000 0.000000 2",
        "",
    ]
    .join("\n")
}

fn star_30() -> String {
    [
        "",
        "data_",
        "",
        "loop_",
        "_rlnImageName #1",
        "_rlnMicrographName #2",
        "_rlnCoordinateX #3",
        "_rlnCoordinateY #4",
        "_rlnOriginX #5",
        "_rlnOriginY #6",
        "_rlnDetectorPixelSize #7",
        "_rlnMagnification #8",
        "000001@stack.mrcs mic_a.mrc 1024.000000 2048.000000 2.000000 -3.000000 14.000000 10000.000000",
        "000002@stack.mrcs mic_b.mrc 512.000000 256.000000 0.000000 1.000000 14.000000 10000.000000",
        "",
    ]
    .join("\n")
}

#[test]
fn test_version_detection() {
    let modern = read_from(star_31().as_bytes()).unwrap();
    assert_eq!(modern.optics().version(), StarVersion::Relion31);

    let legacy = read_from(star_30().as_bytes()).unwrap();
    assert_eq!(legacy.optics().version(), StarVersion::Relion30);
    assert!(matches!(legacy.optics(), Optics::Legacy));
}

#[test]
fn test_column_kinds_inferred_per_column() {
    let star = read_from(star_31().as_bytes()).unwrap();
    let registry = star.particles().registry();

    assert_eq!(registry.kind(columns::IMAGE_NAME), Some(ColumnKind::Str));
    assert_eq!(registry.kind(columns::COORDINATE_X), Some(ColumnKind::Float));
    assert_eq!(registry.kind(columns::CLASS_NUMBER), Some(ColumnKind::Int));
}

#[test]
fn test_optics_constants_loaded() {
    let star = read_from(star_31().as_bytes()).unwrap();
    let group = star.optics().group().unwrap();

    assert_eq!(group.micrograph_pixel_size, 0.885);
    assert_eq!(group.image_pixel_size, 3.54);
    assert_eq!(group.downscale_factor, 4);
    assert_eq!(group.image_size, 64);
}

#[test]
fn test_rows_and_identities() {
    let star = read_from(star_31().as_bytes()).unwrap();
    let table = star.particles();

    assert_eq!(table.len(), 3);
    assert!(table.contains_identity("000002@stack.mrcs"));
    assert_eq!(
        table.cell("000003@stack.mrcs", columns::COORDINATE_X),
        Some(&CellValue::Float(128.0))
    );
}

#[test]
fn test_record_shape_mismatch_carries_line_number() {
    let mut text = star_31();
    text.push_str("000004@stack.mrcs mic_b.mrc 1.000000\n");

    let err = read_from(text.as_bytes()).unwrap_err();
    match err {
        ReadError::RecordShapeMismatch {
            line,
            expected,
            found,
        } => {
            assert_eq!(expected, 8);
            assert_eq!(found, 3);
            assert!(line > 30);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_no_data_block_is_malformed() {
    let err = read_from("just some text\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ReadError::MalformedHeader { line: 1, .. }));

    let err = read_from("# a comment and nothing else\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ReadError::MalformedHeader { .. }));
}

#[test]
fn test_duplicate_declaration_is_malformed() {
    let text = [
        "data_",
        "loop_",
        "_rlnImageName #1",
        "_rlnImageName #2",
        "a b",
    ]
    .join("\n");

    let err = read_from(text.as_bytes()).unwrap_err();
    match err {
        ReadError::MalformedHeader { reason, .. } => {
            assert!(reason.contains("rlnImageName"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_row_before_declarations_is_malformed() {
    let text = ["data_", "000001@stack.mrcs mic_a.mrc"].join("\n");
    let err = read_from(text.as_bytes()).unwrap_err();
    assert!(matches!(err, ReadError::MalformedHeader { line: 2, .. }));
}

#[test]
fn test_missing_index_column() {
    let text = [
        "data_",
        "loop_",
        "_rlnMicrographName #1",
        "_rlnCoordinateX #2",
        "mic_a.mrc 10.000000",
    ]
    .join("\n");

    let err = read_from(text.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        ReadError::Table(TableError::IndexColumnMissing)
    ));
}

#[test]
fn test_duplicate_identity() {
    let text = [
        "data_",
        "loop_",
        "_rlnImageName #1",
        "dup@stack.mrcs",
        "dup@stack.mrcs",
    ]
    .join("\n");

    let err = read_from(text.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        ReadError::Table(TableError::DuplicateIdentity(key)) if key == "dup@stack.mrcs"
    ));
}

#[test]
fn test_declarations_without_rows_load_as_empty_table() {
    let text = ["data_", "loop_", "_rlnImageName #1", ""].join("\n");
    let star = read_from(text.as_bytes()).unwrap();
    assert!(star.particles().is_empty());
}

#[test]
fn test_read_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("run_data.star");
    std::fs::write(&path, star_31())?;

    let star = read_path(&path)?;
    assert_eq!(star.particles().len(), 3);
    Ok(())
}
