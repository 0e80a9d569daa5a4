//! Registry implementations for listing image tags

pub mod docker_hub;

pub use docker_hub::DockerHubRegistry;
