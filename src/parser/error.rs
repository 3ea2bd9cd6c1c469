use std::fmt;

/// Why a molfile/SDF text could not be parsed.
///
/// Line numbers are 1-based and refer to the full input text. Every variant
/// aborts the whole parse; no partial molecule set is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contained no non-empty molecule block.
    EmptyInput,
    /// Header too short, or the counts line is missing or non-numeric.
    InvalidHeader {
        /// Line on which the counts line was expected.
        line: usize,
    },
    /// An atom record is missing or malformed.
    InvalidAtomRecord {
        /// Offending (or first missing) line.
        line: usize,
    },
    /// A bond record is missing or malformed.
    InvalidBondRecord {
        /// Offending (or first missing) line.
        line: usize,
    },
    /// No `M  END` line follows the connection table.
    MissingTerminator {
        /// Last line of the block that was searched.
        line: usize,
    },
}

impl ParseError {
    /// Line number carried by the error, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::EmptyInput => None,
            Self::InvalidHeader { line }
            | Self::InvalidAtomRecord { line }
            | Self::InvalidBondRecord { line }
            | Self::MissingTerminator { line } => Some(*line),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "input contains no molecule block"),
            Self::InvalidHeader { line } => {
                write!(f, "invalid header or counts line (line {line})")
            }
            Self::InvalidAtomRecord { line } => {
                write!(f, "invalid atom record (line {line})")
            }
            Self::InvalidBondRecord { line } => {
                write!(f, "invalid bond record (line {line})")
            }
            Self::MissingTerminator { line } => {
                write!(f, "missing `M  END` terminator (block ends at line {line})")
            }
        }
    }
}

impl std::error::Error for ParseError {}
