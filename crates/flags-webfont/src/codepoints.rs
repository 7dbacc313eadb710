//! Code point set construction for emoji character sequences.

use core::fmt;
use std::collections::BTreeSet;

/// Single Unicode code point identified in the canonical `U+<HEX>` form.
///
/// The [`Display`](fmt::Display) impl renders uppercase hexadecimal digits without
/// superfluous leading zeros (e.g., `'\n'` is rendered as `U+A`, `'🇯'` as `U+1F1EF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CodePoint(char);

impl From<char> for CodePoint {
    fn from(ch: char) -> Self {
        Self(ch)
    }
}

impl CodePoint {
    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "U+{:X}", u32::from(self.0))
    }
}

/// Deduplicated set of [`CodePoint`]s covering a list of emoji character sequences.
///
/// The set contains exactly one identifier per distinct code point appearing across
/// all input sequences; repeated sequences (or repeated characters within a sequence)
/// collapse automatically. The [`Display`](fmt::Display) impl joins identifiers with
/// commas, the delimited form expected by subsetting tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointSet {
    points: BTreeSet<CodePoint>,
}

impl CodePointSet {
    /// Builds a set from an ordered list of character sequences, e.g. flag emoji
    /// composed of regional-indicator pairs.
    pub fn from_sequences<'a>(sequences: impl IntoIterator<Item = &'a str>) -> Self {
        let points = sequences
            .into_iter()
            .flat_map(str::chars)
            .map(CodePoint::from)
            .collect();
        Self { points }
    }

    /// Iterates over the contained code points in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CodePoint> + '_ {
        self.points.iter().copied()
    }

    /// Iterates over the contained characters in ascending code point order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.points.iter().map(|point| point.0)
    }

    /// Returns the number of distinct code points in this set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Checks whether this set is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for CodePointSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                formatter.write_str(",")?;
            }
            fmt::Display::fmt(point, formatter)?;
        }
        Ok(())
    }
}
