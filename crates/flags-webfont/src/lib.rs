//! Country-flag emoji web font subsetting.
//!
//! Fetches the Twemoji Mozilla font, computes the set of Unicode code points used by
//! a fixed list of country-flag emoji sequences and writes a compact WOFF2 subset.
//! Glyph extraction is delegated to the [`allsorts`] subsetter; this crate only builds
//! the code point set and frames the subset font as WOFF2.

#![doc(html_root_url = "https://docs.rs/flags-webfont/0.1.0")]

mod build;
mod codepoints;
mod errors;
mod fetch;
mod subset;
#[cfg(test)]
pub(crate) mod tests;
mod write;

pub use crate::{
    build::{build_flags_font, BuildOptions, FLAG_SEQUENCES, TWEMOJI_VERSION},
    codepoints::{CodePoint, CodePointSet},
    errors::{BuildError, FetchError, ParseError, SubsetError},
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
