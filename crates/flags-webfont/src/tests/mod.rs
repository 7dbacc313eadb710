//! Shared test fixtures and pipeline-level tests.

use std::io::Write;

use crate::{build, BuildError, BuildOptions, CodePointSet, FLAG_SEQUENCES, TWEMOJI_VERSION};

/// Builds an sfnt blob from `tables` supplied in physical order. The table directory
/// is emitted tag-sorted, as in a real font; search fields are zeroed since nothing
/// in the crate reads them back.
pub(crate) fn build_sfnt(flavor: u32, tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut buffer = vec![];
    buffer.extend_from_slice(&flavor.to_be_bytes());
    let table_count = u16::try_from(tables.len()).unwrap();
    buffer.extend_from_slice(&table_count.to_be_bytes());
    buffer.extend_from_slice(&[0; 6]); // searchRange, entrySelector, rangeShift

    let mut offset = 12 + 16 * tables.len();
    let mut records: Vec<_> = tables
        .iter()
        .map(|(tag, data)| {
            let record = (*tag, offset, data.len());
            offset += data.len().div_ceil(4) * 4;
            record
        })
        .collect();
    records.sort_unstable_by_key(|&(tag, ..)| tag);
    for (tag, offset, length) in records {
        buffer.extend_from_slice(&tag);
        buffer.extend_from_slice(&[0; 4]); // checksum is not verified
        buffer.extend_from_slice(&u32::try_from(offset).unwrap().to_be_bytes());
        buffer.extend_from_slice(&u32::try_from(length).unwrap().to_be_bytes());
    }
    for (_, data) in tables {
        buffer.extend_from_slice(data);
        buffer.resize(buffer.len().div_ceil(4) * 4, 0);
    }
    buffer
}

#[test]
fn default_build_options() {
    let options = BuildOptions::default();
    assert!(options.font_url.contains(TWEMOJI_VERSION), "{options:?}");
    assert!(options.font_url.ends_with(".ttf"), "{options:?}");
    assert_eq!(options.sequences, FLAG_SEQUENCES);
    assert_eq!(
        options.output_path.as_os_str(),
        "TwemojiCountryFlags.woff2"
    );
}

#[test]
fn subsetting_scratch_file_with_garbage_fails() {
    let mut scratch = tempfile::NamedTempFile::new().unwrap();
    scratch.write_all(b"definitely not a font").unwrap();
    scratch.flush().unwrap();

    let code_points = CodePointSet::from_sequences(FLAG_SEQUENCES);
    let err = build::subset_scratch(scratch.path(), &code_points).unwrap_err();
    assert!(matches!(err, BuildError::Subset(_)), "{err:?}");
}

#[test]
fn subsetting_missing_scratch_file_fails() {
    let scratch = tempfile::NamedTempFile::new().unwrap();
    let path = scratch.path().to_owned();
    scratch.close().unwrap();

    let code_points = CodePointSet::from_sequences(FLAG_SEQUENCES);
    let err = build::subset_scratch(&path, &code_points).unwrap_err();
    assert!(matches!(err, BuildError::Io(_)), "{err:?}");
}

#[test]
fn subsetting_synthetic_sfnt_fails_in_backend() {
    // Structurally valid table directory, but not a font `allsorts` can load.
    let sfnt = build_sfnt(
        crate::write::TRUETYPE_VERSION,
        &[(*b"head", vec![0; 54]), (*b"maxp", vec![0; 6])],
    );
    let mut scratch = tempfile::NamedTempFile::new().unwrap();
    scratch.write_all(&sfnt).unwrap();
    scratch.flush().unwrap();

    let code_points = CodePointSet::from_sequences(["🇯🇵"]);
    let err = build::subset_scratch(scratch.path(), &code_points).unwrap_err();
    assert!(matches!(err, BuildError::Subset(_)), "{err:?}");
}
