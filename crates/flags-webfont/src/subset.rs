//! Glyph extraction delegated to the `allsorts` subsetter.

use allsorts::{
    binary::read::ReadScope, font::MatchingPresentation, font_data::FontData, subset,
};

use crate::{codepoints::CodePointSet, errors::SubsetError};

/// Produces an OpenType font retaining only the glyphs for `code_points`
/// (and glyph 0). Code points missing from the font are skipped with a warning.
pub(crate) fn subset_font(
    font_bytes: &[u8],
    code_points: &CodePointSet,
) -> Result<Vec<u8>, SubsetError> {
    let font_file = ReadScope::new(font_bytes)
        .read::<FontData>()
        .map_err(SubsetError::backend)?;
    let provider = font_file.table_provider(0).map_err(SubsetError::backend)?;
    let mut font = allsorts::Font::new(provider).map_err(SubsetError::backend)?;

    let mut glyph_ids = vec![0]; // glyph 0 (`.notdef`) must always be retained
    for point in code_points.iter() {
        let (glyph_id, _) =
            font.lookup_glyph_index(point.as_char(), MatchingPresentation::NotRequired, None);
        if glyph_id == 0 {
            log::warn!("{point} is not mapped in the font; skipping");
        } else {
            glyph_ids.push(glyph_id);
        }
    }
    if glyph_ids.len() == 1 {
        return Err(SubsetError::NoGlyphs);
    }
    glyph_ids.sort_unstable();
    glyph_ids.dedup();
    log::debug!("retaining {} glyphs", glyph_ids.len());

    let provider = font_file.table_provider(0).map_err(SubsetError::backend)?;
    subset::subset(&provider, &glyph_ids).map_err(SubsetError::backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsetting_garbage_input_fails() {
        let code_points = CodePointSet::from_sequences(["🇯🇵"]);
        let err = subset_font(b"not a font at all", &code_points).unwrap_err();
        assert!(matches!(err, SubsetError::Backend(_)), "{err:?}");
    }

    #[test]
    fn subsetting_truncated_sfnt_fails() {
        // A lone TrueType version tag without a table directory.
        let bytes = 0x0001_0000_u32.to_be_bytes();
        let code_points = CodePointSet::from_sequences(["🇬🇧"]);
        let err = subset_font(&bytes, &code_points).unwrap_err();
        assert!(matches!(err, SubsetError::Backend(_)), "{err:?}");
    }
}
