use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Registry-related constants
// =============================================================================

/// Only images declared with this source registry are checked
pub const DEFAULT_SOURCE_REGISTRY: &str = "docker.io";

/// Registry API endpoint queried for tags
pub const DEFAULT_REGISTRY_URL: &str = "https://index.docker.io";

/// Namespace prepended to unqualified repositories (e.g. "nginx" -> "library/nginx")
pub const DEFAULT_NAMESPACE: &str = "library/";

/// Maximum number of newer versions reported per image
pub const MAX_NEWER_VERSIONS: usize = 5;

/// Timeout for listing the tags of a single repository in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Manifest file read when `TAGCHECK_MANIFEST` is not set
pub const DEFAULT_MANIFEST_PATH: &str = "manifest.yaml";

/// Environment variable overriding the manifest location
pub const MANIFEST_ENV: &str = "TAGCHECK_MANIFEST";

/// Environment variable overriding the registry endpoint
pub const REGISTRY_URL_ENV: &str = "TAGCHECK_REGISTRY_URL";

/// Connection settings for the registry client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Base URL of the registry API
    pub domain: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            domain: DEFAULT_REGISTRY_URL.to_string(),
            insecure: true,
        }
    }
}

/// Settings for a single `check` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub manifest_path: PathBuf,
    pub source_registry: String,
    pub registry: RegistryOptions,
    pub fetch_timeout: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            source_registry: DEFAULT_SOURCE_REGISTRY.to_string(),
            registry: RegistryOptions::default(),
            fetch_timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
        }
    }
}

impl CheckConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        config_with_env(
            std::env::var(MANIFEST_ENV).ok(),
            std::env::var(REGISTRY_URL_ENV).ok(),
        )
    }
}

fn config_with_env(manifest: Option<String>, registry_url: Option<String>) -> CheckConfig {
    let mut config = CheckConfig::default();

    if let Some(path) = manifest.filter(|p| !p.is_empty()) {
        config.manifest_path = PathBuf::from(path);
    }

    if let Some(url) = registry_url.filter(|u| !u.is_empty()) {
        config.registry.domain = url.trim_end_matches('/').to_string();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_with_env_uses_defaults_when_nothing_is_set() {
        let config = config_with_env(None, None);

        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.manifest_path, PathBuf::from("manifest.yaml"));
        assert_eq!(config.source_registry, "docker.io");
        assert_eq!(
            config.registry,
            RegistryOptions {
                domain: "https://index.docker.io".to_string(),
                insecure: true,
            }
        );
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_with_env_overrides_manifest_path() {
        let config = config_with_env(Some("/etc/images.yaml".to_string()), None);

        assert_eq!(config.manifest_path, PathBuf::from("/etc/images.yaml"));
    }

    #[test]
    fn config_with_env_trims_trailing_slash_from_registry_url() {
        let config = config_with_env(None, Some("https://mirror.example.com/".to_string()));

        assert_eq!(config.registry.domain, "https://mirror.example.com");
    }

    #[test]
    fn config_with_env_ignores_empty_values() {
        let config = config_with_env(Some(String::new()), Some(String::new()));

        assert_eq!(config, CheckConfig::default());
    }
}
