use std::fmt;

/// A segment could not be built from its end points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Both end points coincide.
    ZeroLength,
    /// At least one coordinate was infinite or NaN.
    NonFinite,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroLength => write!(f, "segment has zero length"),
            Error::NonFinite => write!(f, "segment has a non-finite coordinate"),
        }
    }
}

impl std::error::Error for Error {}

/// A line of segment input could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// One-based line number of the offending record.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The record did not hold exactly four values.
    FieldCount(usize),
    /// A value was not a number.
    InvalidNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::FieldCount(n) => {
                write!(f, "line {}: expected 4 values, found {}", self.line, n)
            }
            ParseErrorKind::InvalidNumber(s) => {
                write!(f, "line {}: invalid number {:?}", self.line, s)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Segments could not be read from a source.
#[derive(Debug)]
pub enum ReadError {
    Io(std::io::Error),
    Parse(ParseError),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "read failed: {}", err),
            ReadError::Parse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(err) => Some(err),
            ReadError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        ReadError::Io(err)
    }
}

impl From<ParseError> for ReadError {
    fn from(err: ParseError) -> Self {
        ReadError::Parse(err)
    }
}
