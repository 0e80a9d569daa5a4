//! Registry test utilities

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use tagcheck::manifest::ImageRecord;
use tagcheck::version::error::RegistryError;
use tagcheck::version::registry::Registry;

/// Mock registry for testing
///
/// Repositories without registered tags answer with `NotFound`. Every
/// requested repository is recorded in call order.
#[derive(Default)]
pub struct MockRegistry {
    tags: HashMap<String, Vec<String>>,
    delay: Option<Duration>,
    requested: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, repository: &str, tags: Vec<&str>) -> Self {
        self.tags.insert(
            repository.to_string(),
            tags.into_iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Delay every response, to exercise fetch timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError> {
        self.requested.lock().unwrap().push(repository.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.tags.get(repository) {
            Some(tags) => Ok(tags.clone()),
            None => Err(RegistryError::NotFound(repository.to_string())),
        }
    }
}

/// Build an image record
pub fn image(source_registry: &str, repository: &str, version: &str) -> ImageRecord {
    ImageRecord {
        source_registry: source_registry.to_string(),
        repository: repository.to_string(),
        version: version.to_string(),
    }
}
