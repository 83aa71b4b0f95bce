//! End-to-end tests through the public API: parse, transform, write, re-read.

use std::fs;

use cryostar::schema::{columns, ColumnKind, StarVersion};
use cryostar::star::StarFile;
use cryostar::table::JoinTable;
use cryostar::transform::{OffsetMap, RecenterParams};
use cryostar::writer::WriteError;
use tempfile::tempdir;

/// A 3.1 file in exactly the normalized layout the writer produces
fn star_31_text() -> String {
    [
        "data_optics",
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
        "data_particles",
        "loop_",
        "_rlnImageName #1",
        "_rlnMicrographName #2",
        "_rlnCoordinateX #3",
        "_rlnCoordinateY #4",
        "_rlnAnglePsi #5",
        "_rlnClassNumber #6",
        "_rlnOriginXAngst #7",
        "_rlnOriginYAngst #8",
        "_rlnDefocusU #9",
        "000001@stack.mrcs mic_a.mrc 1000.000000 520.000000 0.000000 1 7.080000 -7.080000 10500.000000",
        "000002@stack.mrcs mic_a.mrc 300.000000 400.000000 90.000000 2 0.000000 0.000000 12000.000000",
        "000003@stack.mrcs mic_b.mrc 128.000000 256.000000 180.000000 9 3.540000 3.540000 14250.000000",
        "",
    ]
    .join("\n")
}

/// A legacy 3.0 file with per-row instrument columns
fn star_30_text() -> String {
    [
        "data_",
        "loop_",
        "_rlnImageName #1",
        "_rlnMicrographName #2",
        "_rlnCoordinateX #3",
        "_rlnCoordinateY #4",
        "_rlnAnglePsi #5",
        "_rlnClassNumber #6",
        "_rlnOriginX #7",
        "_rlnOriginY #8",
        "_rlnDetectorPixelSize #9",
        "_rlnMagnification #10",
        "000001@legacy.mrcs mic_a.mrc 100.000000 200.000000 0.000000 1 2.000000 -3.000000 14.000000 10000.000000",
        "000002@legacy.mrcs mic_b.mrc 400.000000 300.000000 90.000000 7 0.000000 0.000000 14.000000 10000.000000",
        "",
    ]
    .join("\n")
}

#[test]
fn test_31_file_roundtrips_byte_identical() {
    let text = star_31_text();
    let star = StarFile::from_reader(text.as_bytes()).unwrap();

    assert_eq!(star.version(), StarVersion::Relion31);
    assert_eq!(star.particles().len(), 3);
    assert_eq!(star.pixel_size().unwrap(), 3.54);

    let mut out = Vec::new();
    star.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), text);
}

#[test]
fn test_30_file_roundtrips_byte_identical() {
    let text = star_30_text();
    let star = StarFile::from_reader(text.as_bytes()).unwrap();

    assert_eq!(star.version(), StarVersion::Relion30);
    assert!((star.pixel_size().unwrap() - 0.0014).abs() < 1e-12);

    let mut out = Vec::new();
    star.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), text);
}

#[test]
fn test_save_and_reopen_through_disk() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.star");
    fs::write(&input, star_31_text()).unwrap();

    let star = StarFile::open(&input).unwrap();
    let output = dir.path().join("out.star");
    star.save(&output).unwrap();

    let reread = StarFile::open(&output).unwrap();
    assert_eq!(reread.version(), StarVersion::Relion31);
    assert_eq!(reread.particles().identities(), star.particles().identities());
    assert_eq!(fs::read_to_string(&output).unwrap(), star_31_text());
}

#[test]
fn test_save_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("exists.star");
    fs::write(&output, "occupied").unwrap();

    let star = StarFile::from_reader(star_31_text().as_bytes()).unwrap();
    let err = star.save(&output).unwrap_err();
    assert!(matches!(err, WriteError::OutputExists(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "occupied");
}

#[test]
fn test_subset_pipeline() {
    let dir = tempdir().unwrap();
    let mut star = StarFile::from_reader(star_31_text().as_bytes()).unwrap();

    star.subset(&["000003@stack.mrcs", "000001@stack.mrcs"])
        .unwrap();
    let output = dir.path().join("subset.star");
    star.save(&output).unwrap();

    let reread = StarFile::open(&output).unwrap();
    assert_eq!(
        reread.particles().identities(),
        vec!["000003@stack.mrcs", "000001@stack.mrcs"]
    );
    assert_eq!(reread.particles().registry().len(), 9);
}

#[test]
fn test_exclude_by_reference_values() {
    let mut star = StarFile::from_reader(star_31_text().as_bytes()).unwrap();

    // A curation run selects the micrographs to drop.
    let reference = StarFile::from_reader(star_31_text().as_bytes()).unwrap();
    let mics = reference
        .particles()
        .unique_values(columns::MICROGRAPH_NAME)
        .unwrap();
    let bad: Vec<&str> = mics
        .iter()
        .map(String::as_str)
        .filter(|mic| *mic == "mic_a.mrc")
        .collect();

    star.exclude(columns::MICROGRAPH_NAME, &bad);
    assert_eq!(star.particles().identities(), vec!["000003@stack.mrcs"]);
}

#[test]
fn test_recenter_pipeline_31() {
    let dir = tempdir().unwrap();
    let offsets_csv = dir.path().join("offsets.csv");
    fs::write(&offsets_csv, "class,dx,dy\n1,1.0,2.0\n").unwrap();

    let mut star = StarFile::from_reader(star_31_text().as_bytes()).unwrap();
    let offsets = OffsetMap::from_csv_path(&offsets_csv).unwrap();
    let params = RecenterParams {
        min_x: 32.0,
        min_y: 32.0,
        max_x: 5728.0,
        max_y: 4060.0,
        downscale: None,
    };

    let corrected = star.recenter(&offsets, &params).unwrap();
    assert_eq!(corrected, 1);

    // Class 1: offset (1, 2) scaled by the downscale factor 4 gives (4, 8) at
    // psi 0; origin 7.08 A over 3.54 A/px gives a 2 px shift.
    let particles = star.particles();
    let x = particles.cell("000001@stack.mrcs", columns::COORDINATE_X).unwrap();
    assert_eq!(x.as_f64().unwrap(), 994.0);
    let y = particles.cell("000001@stack.mrcs", columns::COORDINATE_Y).unwrap();
    assert_eq!(y.as_f64().unwrap(), 514.0);

    // Origin shifts are spent into the coordinates.
    let ox = particles.cell("000001@stack.mrcs", columns::ORIGIN_X_ANGST).unwrap();
    assert_eq!(ox.as_f64().unwrap(), 0.0);

    // Classes without a measured offset pass through untouched.
    let x2 = particles.cell("000002@stack.mrcs", columns::COORDINATE_X).unwrap();
    assert_eq!(x2.as_f64().unwrap(), 300.0);

    let output = dir.path().join("recentered.star");
    star.save(&output).unwrap();
    let reread = StarFile::open(&output).unwrap();
    let x = reread
        .particles()
        .cell("000001@stack.mrcs", columns::COORDINATE_X)
        .unwrap();
    assert_eq!(x.as_f64().unwrap(), 994.0);
}

#[test]
fn test_recenter_pipeline_legacy() {
    let mut star = StarFile::from_reader(star_30_text().as_bytes()).unwrap();
    let offsets = OffsetMap::from_pairs([("1".to_string(), (3.0, 4.0))]);
    let params = RecenterParams {
        min_x: 16.0,
        min_y: 16.0,
        max_x: 4080.0,
        max_y: 4080.0,
        downscale: Some(2),
    };

    let corrected = star.recenter(&offsets, &params).unwrap();
    assert_eq!(corrected, 1);

    // Class 1: offset (3, 4) doubled to (6, 8) at psi 0; pixel origins (2, -3)
    // apply unscaled.
    let particles = star.particles();
    let x = particles.cell("000001@legacy.mrcs", columns::COORDINATE_X).unwrap();
    assert_eq!(x.as_f64().unwrap(), 92.0);
    let y = particles.cell("000001@legacy.mrcs", columns::COORDINATE_Y).unwrap();
    assert_eq!(y.as_f64().unwrap(), 195.0);
}

#[test]
fn test_merge_pipeline() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("labels.csv");
    fs::write(&csv, "rlnMicrographName,clusterLabel\nmic_a.mrc,7\n").unwrap();

    let mut star = StarFile::from_reader(star_31_text().as_bytes()).unwrap();
    let secondary = JoinTable::from_csv_path(&csv, columns::MICROGRAPH_NAME).unwrap();
    star.merge(&secondary).unwrap();

    // The inner join keeps only mic_a particles and appends the label.
    assert_eq!(
        star.particles().identities(),
        vec!["000001@stack.mrcs", "000002@stack.mrcs"]
    );
    assert_eq!(
        star.particles().registry().kind("clusterLabel"),
        Some(ColumnKind::Int)
    );
    let label = star.particles().cell("000001@stack.mrcs", "clusterLabel").unwrap();
    assert_eq!(label.as_f64().unwrap(), 7.0);

    let output = dir.path().join("merged.star");
    star.save(&output).unwrap();
    let reread = StarFile::open(&output).unwrap();
    assert!(reread.particles().registry().contains("clusterLabel"));
}

#[test]
fn test_summary_end_to_end() {
    let star = StarFile::from_reader(star_31_text().as_bytes()).unwrap();
    let summary = star.summary();

    assert_eq!(summary.version, "3.1");
    assert_eq!(summary.particle_count, 3);
    assert_eq!(summary.micrograph_count, Some(2));
    assert_eq!(summary.class_count, Some(3));
    assert_eq!(summary.pixel_size, Some(3.54));
    let defocus = summary.defocus.unwrap();
    assert_eq!(defocus.min, 10500.0);
    assert_eq!(defocus.max, 14250.0);
    assert_eq!(defocus.median, 12000.0);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any normalized legacy table writes back byte-identical after a read
        #[test]
        fn test_normalized_roundtrip(
            rows in prop::collection::vec((0.0..9999.0f64, 0.0..9999.0f64, 1..100i64), 1..40),
        ) {
            let mut text = String::from(
                "data_\nloop_\n_rlnImageName #1\n_rlnMicrographName #2\n\
                 _rlnCoordinateX #3\n_rlnCoordinateY #4\n_rlnClassNumber #5\n",
            );
            for (i, (x, y, class)) in rows.iter().enumerate() {
                text.push_str(&format!(
                    "{:06}@gen.mrcs mic_{:02}.mrc {:.6} {:.6} {}\n",
                    i + 1,
                    i % 7,
                    x,
                    y,
                    class
                ));
            }

            let star = StarFile::from_reader(text.as_bytes()).unwrap();
            let mut out = Vec::new();
            star.write_to(&mut out).unwrap();
            prop_assert_eq!(String::from_utf8(out).unwrap(), text);
        }

        /// Keeping a random identity subset preserves values and requested order
        #[test]
        fn test_subset_is_order_faithful(mask in prop::collection::vec(any::<bool>(), 12)) {
            let mut text = String::from("data_\nloop_\n_rlnImageName #1\n_rlnDefocusU #2\n");
            for i in 0..mask.len() {
                text.push_str(&format!("{:06}@gen.mrcs {}.000000\n", i + 1, 10_000 + i));
            }
            let star = StarFile::from_reader(text.as_bytes()).unwrap();

            let identities = star.particles().identities();
            let keys: Vec<&str> = identities
                .iter()
                .zip(&mask)
                .filter(|(_, keep)| **keep)
                .map(|(key, _)| key.as_str())
                .collect();

            let subset = star.particles().keep_rows(&keys).unwrap();
            let expected: Vec<String> = keys.iter().map(|key| key.to_string()).collect();
            prop_assert_eq!(subset.identities(), expected);
        }
    }
}
