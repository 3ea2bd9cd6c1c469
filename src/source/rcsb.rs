use std::time::Duration;

use ureq::Agent;

use super::{decode_text, normalize_id, SourceError, SourceLoader};

/// RCSB ligand download service.
const RCSB_LIGAND_BASE: &str = "https://files.rcsb.org/ligands/download";

/// Request timeout in seconds.
const HTTP_TIMEOUT: u64 = 10;

/// Downloads ideal-coordinate SDF files from the RCSB.
pub struct RcsbLoader {
    agent: Agent,
    base_url: String,
}

impl Default for RcsbLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RcsbLoader {
    /// Loader against the public RCSB service.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(RCSB_LIGAND_BASE)
    }

    /// Loader against a mirror serving the same file layout.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT)))
            .build();
        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Download URL for a ligand id.
    #[must_use]
    pub fn url_for(&self, id: &str) -> String {
        format!("{}/{}_ideal.sdf", self.base_url, normalize_id(id))
    }
}

impl SourceLoader for RcsbLoader {
    fn fetch(&self, id: &str) -> Result<String, SourceError> {
        let url = self.url_for(id);
        log::debug!("GET {url}");

        let mut response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::StatusCode(404) => SourceError::NotFound {
                id: normalize_id(id),
            },
            other => SourceError::Network(other.to_string()),
        })?;
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let text = decode_text(bytes);
        if text.trim().is_empty() {
            return Err(SourceError::InvalidData(format!(
                "empty response for {}",
                normalize_id(id)
            )));
        }
        Ok(text)
    }
}
