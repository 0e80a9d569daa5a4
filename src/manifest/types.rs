use serde::Deserialize;

use crate::config::DEFAULT_NAMESPACE;

/// The list of tracked images
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Manifest {
    pub images: Vec<ImageRecord>,
}

/// A single tracked image and the version it is pinned to
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Registry the image is pulled from (e.g., "docker.io")
    pub source_registry: String,
    /// Registry-relative path, possibly without namespace (e.g., "nginx")
    pub repository: String,
    /// Currently pinned version
    pub version: String,
}

impl ImageRecord {
    /// Human-readable identity, e.g. "docker.io/nginx:1.25.3"
    pub fn source(&self) -> String {
        format!(
            "{}/{}:{}",
            self.source_registry, self.repository, self.version
        )
    }

    /// Repository path to query, with the default namespace added when missing
    pub fn qualified_repository(&self) -> String {
        if self.repository.contains('/') {
            self.repository.clone()
        } else {
            format!("{}{}", DEFAULT_NAMESPACE, self.repository)
        }
    }
}
