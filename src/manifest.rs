use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ManifestError;

const MANIFEST_FILENAME: &str = "manifest.json";

/// Record of the pages written by the last build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildManifest {
    pub built_at: String,
    pub episode_count: usize,
    /// Page path relative to the output directory -> content hash
    pub pages: BTreeMap<String, String>,
}

impl BuildManifest {
    /// Start a manifest for a build happening now
    pub fn new(episode_count: usize) -> Self {
        Self {
            built_at: Utc::now().to_rfc3339(),
            episode_count,
            pages: BTreeMap::new(),
        }
    }

    /// True if `path` was written by the last build with the same content
    pub fn is_unchanged(&self, path: &str, hash: &str) -> bool {
        self.pages.get(path).is_some_and(|known| known == hash)
    }
}

/// Hash page content as "sha256:<hex>"
pub fn content_hash(content: &[u8]) -> String {
    format!("sha256:{:x}", Sha256::digest(content))
}

/// Write the manifest into the output directory
pub fn write_manifest(manifest: &BuildManifest, output_dir: &Path) -> Result<(), ManifestError> {
    let path = output_dir.join(MANIFEST_FILENAME);

    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, json).map_err(|e| ManifestError::WriteFailed { path, source: e })
}

/// Read the manifest of the last build, if there is one
pub fn read_manifest(output_dir: &Path) -> Result<Option<BuildManifest>, ManifestError> {
    let path = output_dir.join(MANIFEST_FILENAME);

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ManifestError::ReadFailed {
        path: path.clone(),
        source: e,
    })?;

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| ManifestError::JsonParseFailed { path, source: e })
}
