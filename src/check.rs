//! The `check` command: report newer tags for every tracked image

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::config::CheckConfig;
use crate::manifest::{ImageRecord, ManifestError, load_manifest};
use crate::version::error::RegistryError;
use crate::version::filter::filter_tags;
use crate::version::registries::DockerHubRegistry;
use crate::version::registry::Registry;
use crate::version::selector::newer_versions;
use crate::version::semver::ImageVersion;

/// Failures that abort the whole run
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("new registry")]
    Registry(#[source] RegistryError),

    #[error("get manifest")]
    Manifest(#[from] ManifestError),

    #[error("fetch tags for {repository}")]
    FetchTags {
        repository: String,
        #[source]
        source: RegistryError,
    },
}

/// Why an image was left out of the check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The image comes from another registry than the configured source
    ForeignRegistry,
    /// The pinned version is not a version
    UnparsableVersion,
}

/// Result of checking a single image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Skipped { image: String, reason: SkipReason },
    UpToDate { image: String },
    NewerVersions { image: String, versions: Vec<String> },
}

/// Run the check with the production registry and the manifest named in `config`.
pub async fn run(config: &CheckConfig) -> Result<Vec<ImageOutcome>, CheckError> {
    let registry = DockerHubRegistry::new(&config.registry).map_err(CheckError::Registry)?;

    let manifest = load_manifest(&config.manifest_path)?;

    run_check(
        &registry,
        &manifest.images,
        &config.source_registry,
        config.fetch_timeout,
    )
    .await
}

/// Check `images` one after another in manifest order.
///
/// Images from another registry or with an unparsable pinned version are
/// skipped. A failed or timed out tag listing stops the run and the remaining
/// images are not checked.
pub async fn run_check(
    registry: &dyn Registry,
    images: &[ImageRecord],
    source_registry: &str,
    fetch_timeout: Duration,
) -> Result<Vec<ImageOutcome>, CheckError> {
    let mut outcomes = Vec::with_capacity(images.len());

    for image in images {
        let outcome = check_image(registry, image, source_registry, fetch_timeout).await?;
        report(&outcome, source_registry);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

async fn check_image(
    registry: &dyn Registry,
    image: &ImageRecord,
    source_registry: &str,
    fetch_timeout: Duration,
) -> Result<ImageOutcome, CheckError> {
    if image.source_registry != source_registry {
        return Ok(ImageOutcome::Skipped {
            image: image.source(),
            reason: SkipReason::ForeignRegistry,
        });
    }

    let Some(pinned) = ImageVersion::parse(&image.version) else {
        return Ok(ImageOutcome::Skipped {
            image: image.source(),
            reason: SkipReason::UnparsableVersion,
        });
    };

    let repository = image.qualified_repository();
    let tags = fetch_tags(registry, &repository, fetch_timeout).await?;

    let candidates = filter_tags(tags);
    let versions = newer_versions(&pinned, &candidates);

    if versions.is_empty() {
        Ok(ImageOutcome::UpToDate {
            image: image.source(),
        })
    } else {
        Ok(ImageOutcome::NewerVersions {
            image: image.source(),
            versions,
        })
    }
}

async fn fetch_tags(
    registry: &dyn Registry,
    repository: &str,
    fetch_timeout: Duration,
) -> Result<Vec<String>, CheckError> {
    let result = tokio::time::timeout(fetch_timeout, registry.list_tags(repository))
        .await
        .unwrap_or(Err(RegistryError::Timeout {
            timeout_ms: fetch_timeout.as_millis(),
        }));

    result.map_err(|source| CheckError::FetchTags {
        repository: repository.to_string(),
        source,
    })
}

fn report(outcome: &ImageOutcome, source_registry: &str) {
    match outcome {
        ImageOutcome::Skipped {
            image,
            reason: SkipReason::ForeignRegistry,
        } => info!(
            "Image {} not sourced from {}. Skipping ...",
            image, source_registry
        ),
        ImageOutcome::Skipped {
            image,
            reason: SkipReason::UnparsableVersion,
        } => info!("Image {} version did not parse correctly. Skipping ...", image),
        ImageOutcome::UpToDate { image } => info!("Image {} is up to date!", image),
        ImageOutcome::NewerVersions { image, versions } => {
            info!("New versions for {} found: {:?}", image, versions)
        }
    }
}
