use std::{error, fmt, io};

/// Errors that can occur when fetching the remote font.
#[derive(Debug)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, non-success HTTP status etc.).
    Transport(Box<ureq::Error>),
    /// I/O failure while reading the response body.
    Io(io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(formatter, "failed fetching font: {err}"),
            Self::Io(err) => write!(formatter, "failed reading font response: {err}"),
        }
    }
}

impl error::Error for FetchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err.as_ref()),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Errors that can occur in the subsetting collaborator.
#[derive(Debug)]
#[non_exhaustive]
pub enum SubsetError {
    /// Failure reported by the backing subsetting library.
    Backend(Box<dyn error::Error + Send + Sync>),
    /// None of the requested code points map to a glyph in the font.
    NoGlyphs,
}

impl SubsetError {
    pub(crate) fn backend(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

impl fmt::Display for SubsetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(err) => write!(formatter, "failed subsetting font: {err}"),
            Self::NoGlyphs => {
                formatter.write_str("none of the requested code points map to a glyph")
            }
        }
    }
}

impl error::Error for SubsetError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err.as_ref()),
            Self::NoGlyphs => None,
        }
    }
}

/// Errors that can occur when framing the subset font as WOFF2.
#[derive(Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// Unexpected end of the font data.
    UnexpectedEof,
    /// Unexpected sfnt version (neither TrueType nor CFF flavor).
    UnexpectedFontVersion(u32),
    /// A table record points outside of the font data.
    TableOutOfBounds {
        /// Tag of the offending table.
        tag: [u8; 4],
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => formatter.write_str("unexpected end of the font data"),
            Self::UnexpectedFontVersion(version) => {
                write!(formatter, "unexpected sfnt version ({version:#010x})")
            }
            Self::TableOutOfBounds { tag } => {
                write!(
                    formatter,
                    "table `{}` points outside of the font data",
                    String::from_utf8_lossy(tag)
                )
            }
        }
    }
}

impl error::Error for ParseError {}

/// Errors that can occur when building the flags web font.
#[derive(Debug)]
#[non_exhaustive]
pub enum BuildError {
    /// Failed fetching the remote font.
    Fetch(FetchError),
    /// Failed subsetting the fetched font.
    Subset(SubsetError),
    /// The subset font could not be framed as WOFF2.
    Parse(ParseError),
    /// I/O failure (scratch file or output file).
    Io(io::Error),
}

impl fmt::Display for BuildError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(err) => fmt::Display::fmt(err, formatter),
            Self::Subset(err) => fmt::Display::fmt(err, formatter),
            Self::Parse(err) => write!(formatter, "invalid subset font: {err}"),
            Self::Io(err) => write!(formatter, "I/O error: {err}"),
        }
    }
}

impl error::Error for BuildError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::Subset(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<FetchError> for BuildError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<SubsetError> for BuildError {
    fn from(err: SubsetError) -> Self {
        Self::Subset(err)
    }
}

impl From<ParseError> for BuildError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<io::Error> for BuildError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
