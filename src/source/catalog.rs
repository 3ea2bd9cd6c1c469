use std::path::Path;

use super::SourceError;

/// A browsable list of ligand ids, e.g. the ligands bundled with an app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LigandCatalog {
    ids: Vec<String>,
}

impl LigandCatalog {
    /// Catalog from newline-separated ids. Lines are trimmed and blank lines
    /// dropped; order is kept.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let ids = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();
        Self { ids }
    }

    /// Read a catalog file.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_text(&text);
        log::debug!("{} ligand ids in {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// All ids in file order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids containing `query`, ignoring case. A blank query matches all.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        self.ids
            .iter()
            .filter(|id| query.is_empty() || id.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}
