//! MDL molfile / SDF reading and writing.
//!
//! The reader is whitespace-tokenized rather than column-based, so
//! hand-edited files with loose alignment still load. See [`parse`] for the
//! accepted layout and [`ParseError`] for the failure taxonomy.

mod error;
mod reader;
mod writer;

pub use error::ParseError;
pub use reader::parse;
pub use writer::{write_molecule, write_set};

/// Separator between molecule blocks in an SDF file.
pub const BLOCK_TERMINATOR: &str = "$$$$";

/// Prefix of the line closing a connection table.
pub const END_MARKER: &str = "M  END";
