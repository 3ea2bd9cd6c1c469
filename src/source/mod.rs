//! Where ligand text comes from.
//!
//! A [`SourceLoader`] turns a ligand id into raw SDF text. Local directories
//! ([`DirectoryLoader`], [`CacheStore`]) and the RCSB download service
//! ([`RcsbLoader`], feature `fetch`) implement it; [`LigandRepository`]
//! chains them with parse-and-fallback logic.

mod catalog;
#[cfg(feature = "fetch")]
mod rcsb;
mod repository;

use std::fmt;
use std::path::{Path, PathBuf};

pub use catalog::LigandCatalog;
#[cfg(feature = "fetch")]
pub use rcsb::RcsbLoader;
pub use repository::{LigandRepository, LoadSource, LoadedLigand};

/// File extension of stored ligand files.
const SDF_EXTENSION: &str = "sdf";

/// Errors from obtaining raw ligand text.
#[derive(Debug)]
pub enum SourceError {
    /// No file exists for this id.
    NotFound {
        /// The id that was requested.
        id: String,
    },
    /// Transport-level failure talking to a remote service.
    Network(String),
    /// Data arrived but is not usable.
    InvalidData(String),
    /// Local filesystem failure.
    Io(std::io::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "ligand '{id}' not found"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Something that can produce the SDF text for a ligand id.
pub trait SourceLoader {
    /// Fetch the raw text for `id`.
    fn fetch(&self, id: &str) -> Result<String, SourceError>;
}

impl<L: SourceLoader + ?Sized> SourceLoader for Box<L> {
    fn fetch(&self, id: &str) -> Result<String, SourceError> {
        (**self).fetch(id)
    }
}

/// Canonical form of a ligand id: trimmed, uppercase.
#[must_use]
pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

/// Decode downloaded bytes as UTF-8, falling back to Latin-1.
#[must_use]
pub fn decode_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        e.into_bytes().into_iter().map(char::from).collect()
    })
}

/// Read a file, or `None` if it does not exist.
fn read_optional(path: &Path) -> Result<Option<String>, SourceError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(decode_text(bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Ligand files bundled in a local directory.
///
/// For id `Atp` tries `Atp.sdf`, then `ATP.sdf`, then `atp.sdf`.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    dir: PathBuf,
}

impl DirectoryLoader {
    /// Loader over the files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory searched.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidates(&self, id: &str) -> Vec<PathBuf> {
        let id = id.trim();
        let mut names = vec![
            id.to_owned(),
            id.to_uppercase(),
            id.to_lowercase(),
        ];
        names.dedup();
        names
            .into_iter()
            .map(|name| self.dir.join(format!("{name}.{SDF_EXTENSION}")))
            .collect()
    }
}

impl SourceLoader for DirectoryLoader {
    fn fetch(&self, id: &str) -> Result<String, SourceError> {
        for path in self.candidates(id) {
            if let Some(text) = read_optional(&path)? {
                return Ok(text);
            }
        }
        Err(SourceError::NotFound { id: id.to_owned() })
    }
}

/// Downloaded ligand files kept as `<ID>.sdf` under a cache directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Cache rooted at `dir`; the directory is created on first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a ligand is cached at.
    #[must_use]
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{SDF_EXTENSION}", normalize_id(id)))
    }

    /// Whether a cached copy exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.path_for(id).is_file()
    }

    /// Write `text` as the cached copy of `id`.
    pub fn store(&self, id: &str, text: &str) -> Result<(), SourceError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(id), text)?;
        Ok(())
    }

    /// Delete the cached copy of `id`, if any.
    pub fn remove(&self, id: &str) -> Result<(), SourceError> {
        match std::fs::remove_file(self.path_for(id)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl SourceLoader for CacheStore {
    fn fetch(&self, id: &str) -> Result<String, SourceError> {
        read_optional(&self.path_for(id))?
            .ok_or_else(|| SourceError::NotFound { id: normalize_id(id) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_fallback() {
        assert_eq!(decode_text(b"caf\xc3\xa9".to_vec()), "café");
        assert_eq!(decode_text(b"caf\xe9".to_vec()), "café");
    }

    #[test]
    fn directory_loader_tries_case_variants() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ATP.sdf"), "upper").unwrap();
        std::fs::write(dir.path().join("hem.sdf"), "lower").unwrap();

        let loader = DirectoryLoader::new(dir.path());
        assert_eq!(loader.fetch("atp").unwrap(), "upper");
        assert_eq!(loader.fetch(" HEM ").unwrap(), "lower");
        assert!(matches!(
            loader.fetch("NAG"),
            Err(SourceError::NotFound { .. })
        ));
    }

    #[test]
    fn cache_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache"));

        assert!(!cache.contains("atp"));
        assert!(matches!(cache.fetch("atp"), Err(SourceError::NotFound { .. })));

        cache.store("atp", "text").unwrap();
        assert!(cache.contains("ATP"));
        assert_eq!(cache.path_for("atp").file_name().unwrap(), "ATP.sdf");
        assert_eq!(cache.fetch("Atp").unwrap(), "text");

        cache.remove("atp").unwrap();
        cache.remove("atp").unwrap();
        assert!(!cache.contains("atp"));
    }

    #[test]
    fn error_messages() {
        let err = SourceError::NotFound { id: "XYZ".to_owned() };
        assert_eq!(err.to_string(), "ligand 'XYZ' not found");
        assert_eq!(
            SourceError::Network("timeout".to_owned()).to_string(),
            "network error: timeout"
        );
    }
}
