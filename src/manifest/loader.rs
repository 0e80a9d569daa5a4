//! Manifest file loading

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::manifest::types::Manifest;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Read the manifest at `path`
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest = parse_manifest(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Loaded {} images from {}",
        manifest.images.len(),
        path.display()
    );
    Ok(manifest)
}

fn parse_manifest(content: &str) -> Result<Manifest, serde_yaml::Error> {
    // An empty document deserializes to unit, not to an empty mapping
    if content.trim().is_empty() {
        return Ok(Manifest::default());
    }
    serde_yaml::from_str(content)
}
