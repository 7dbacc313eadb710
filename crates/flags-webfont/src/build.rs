//! End-to-end font build pipeline.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{codepoints::CodePointSet, errors::BuildError, fetch, subset, write::SfntFont};

/// Twemoji Mozilla release the flag glyphs are extracted from.
pub const TWEMOJI_VERSION: &str = "v0.7.0";

/// Country-flag emoji sequences included in the subset. `🇨🇳` is listed twice
/// upstream; duplicates collapse when the code point set is built.
pub const FLAG_SEQUENCES: [&str; 9] = [
    "\u{1f1ef}\u{1f1f5}", // 🇯🇵
    "\u{1f1ec}\u{1f1e7}", // 🇬🇧
    "\u{1f1ee}\u{1f1f9}", // 🇮🇹
    "\u{1f1e7}\u{1f1f7}", // 🇧🇷
    "\u{1f1ea}\u{1f1f8}", // 🇪🇸
    "\u{1f1f7}\u{1f1fa}", // 🇷🇺
    "\u{1f1e8}\u{1f1f3}", // 🇨🇳
    "\u{1f1e8}\u{1f1f3}", // 🇨🇳
    "\u{1f1f0}\u{1f1f7}", // 🇰🇷
];

fn twemoji_url() -> String {
    format!(
        "https://github.com/mozilla/twemoji-colr/releases/download/{TWEMOJI_VERSION}/Twemoji.Mozilla.ttf"
    )
}

/// Inputs for [`build_flags_font`].
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// URL to fetch the source font from.
    pub font_url: String,
    /// Emoji character sequences whose code points are retained in the subset.
    pub sequences: Vec<String>,
    /// Path of the output WOFF2 file.
    pub output_path: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            font_url: twemoji_url(),
            sequences: FLAG_SEQUENCES.map(str::to_owned).into(),
            output_path: PathBuf::from("TwemojiCountryFlags.woff2"),
        }
    }
}

/// Builds the flags web font: fetches the source font, persists it to a scratch file,
/// subsets it to the code points of `options.sequences` and writes the WOFF2 output.
///
/// # Errors
///
/// Any failure (network, I/O, subsetting) is fatal and propagated as is; there are
/// no retries and no partial outputs.
pub fn build_flags_font(options: &BuildOptions) -> Result<(), BuildError> {
    let font_bytes = fetch::fetch_font(&options.font_url)?;
    log::info!("fetched source font ({} bytes)", font_bytes.len());

    let mut scratch = tempfile::NamedTempFile::new()?;
    scratch.write_all(&font_bytes)?;
    scratch.flush()?;
    drop(font_bytes);

    let code_points =
        CodePointSet::from_sequences(options.sequences.iter().map(String::as_str));
    log::info!("subsetting to code points: {code_points}");

    let woff2 = subset_scratch(scratch.path(), &code_points)?;
    fs::write(&options.output_path, &woff2)?;
    log::info!(
        "wrote {} ({} bytes)",
        options.output_path.display(),
        woff2.len()
    );

    scratch.close()?; // removes the scratch file
    Ok(())
}

/// Subsets the font stored at `path` and frames the result as WOFF2.
pub(crate) fn subset_scratch(
    path: &Path,
    code_points: &CodePointSet,
) -> Result<Vec<u8>, BuildError> {
    let font_bytes = fs::read(path)?;
    let subset_font = subset::subset_font(&font_bytes, code_points)?;
    let sfnt = SfntFont::parse(&subset_font)?;
    Ok(sfnt.to_woff2())
}
