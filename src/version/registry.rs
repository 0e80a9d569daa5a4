//! Registry trait for listing image tags

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Trait for listing the tags published for a repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Lists every tag of a repository
    ///
    /// # Arguments
    /// * `repository` - Namespace-qualified repository (e.g., "library/nginx")
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tags in the order the registry returned them
    /// * `Err(RegistryError)` - If the listing fails
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError>;
}
