//! Crate-level error types.

use std::fmt;

use crate::parser::ParseError;
use crate::source::SourceError;

/// Errors produced by the ligview crate.
#[derive(Debug)]
pub enum LigviewError {
    /// Molfile/SDF text could not be parsed.
    Parse(ParseError),
    /// Raw ligand text could not be obtained.
    Source(SourceError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Periodic-table data could not be loaded.
    ElementTable(String),
}

impl fmt::Display for LigviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Source(e) => write!(f, "source error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::ElementTable(msg) => {
                write!(f, "element table error: {msg}")
            }
        }
    }
}

impl std::error::Error for LigviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Source(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for LigviewError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<SourceError> for LigviewError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<std::io::Error> for LigviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
