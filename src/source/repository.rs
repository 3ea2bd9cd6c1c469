use serde::Serialize;

use super::{normalize_id, CacheStore, DirectoryLoader, SourceError, SourceLoader};
use crate::error::LigviewError;
use crate::molecule::MoleculeSet;
use crate::parser::parse;

/// Where a loaded ligand came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadSource {
    /// The primary loader (usually the network).
    Remote,
    /// The local download cache.
    Cache,
    /// Files bundled with the application.
    Bundle,
}

/// A parsed ligand plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedLigand {
    /// Parsed molecules.
    pub set: MoleculeSet,
    /// Which tier produced the text.
    pub source: LoadSource,
}

/// Primary loader with cache and bundle fallbacks.
///
/// Text from the primary loader is parsed and, when it parses, written to
/// the cache. If the primary fails for any reason (fetch or parse) the cache
/// and then the bundle are tried; if all fail the primary error is returned.
pub struct LigandRepository<P: SourceLoader> {
    primary: P,
    cache: Option<CacheStore>,
    bundle: Option<DirectoryLoader>,
}

impl<P: SourceLoader> LigandRepository<P> {
    /// Repository with no fallbacks.
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            cache: None,
            bundle: None,
        }
    }

    /// Cache successful primary loads and fall back to them.
    #[must_use]
    pub fn with_cache(mut self, cache: CacheStore) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fall back to bundled files after the cache.
    #[must_use]
    pub fn with_bundle(mut self, bundle: DirectoryLoader) -> Self {
        self.bundle = Some(bundle);
        self
    }

    /// The cache, if configured.
    #[must_use]
    pub fn cache(&self) -> Option<&CacheStore> {
        self.cache.as_ref()
    }

    /// Load and parse a ligand by id.
    pub fn load(&self, id: &str) -> Result<LoadedLigand, LigviewError> {
        let id = normalize_id(id);
        if id.is_empty() {
            return Err(SourceError::NotFound { id }.into());
        }

        let primary_err = match self.load_primary(&id) {
            Ok(set) => {
                log::info!("loaded {id} from remote");
                return Ok(LoadedLigand {
                    set,
                    source: LoadSource::Remote,
                });
            }
            Err(e) => e,
        };
        log::warn!("{id}: {primary_err}; trying local copies");

        let fallbacks = [
            (self.cache.as_ref().map(as_loader), LoadSource::Cache),
            (self.bundle.as_ref().map(as_loader), LoadSource::Bundle),
        ];
        for (loader, source) in fallbacks {
            let Some(loader) = loader else {
                continue;
            };
            match load_from(loader, &id) {
                Ok(set) => {
                    log::info!("loaded {id} from {source:?}");
                    return Ok(LoadedLigand { set, source });
                }
                Err(e) => log::debug!("{id}: {source:?} fallback failed: {e}"),
            }
        }
        Err(primary_err)
    }

    fn load_primary(&self, id: &str) -> Result<MoleculeSet, LigviewError> {
        let text = self.primary.fetch(id)?;
        let set = parse(&text, id)?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(id, &text) {
                log::warn!("failed to cache {id}: {e}");
            }
        }
        Ok(set)
    }
}

fn as_loader<L: SourceLoader>(loader: &L) -> &dyn SourceLoader {
    loader
}

fn load_from(loader: &dyn SourceLoader, id: &str) -> Result<MoleculeSet, LigviewError> {
    let text = loader.fetch(id)?;
    Ok(parse(&text, id)?)
}
