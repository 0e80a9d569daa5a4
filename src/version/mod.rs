//! Version layer for image tag checking
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Filter    │────▶│  Selector   │
//! │ (list tags) │     │ (tag shape) │     │ (newer than)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ Registries  │                         │   Semver    │
//! │(docker hub) │                         │  (parsing)  │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Registry trait for listing tags from remote sources
//! - [`registries`]: Concrete registry implementations
//! - [`filter`]: Cheap syntactic filter for release-like tags
//! - [`selector`]: Newer-than-baseline selection with a bounded result
//! - [`semver`]: Tag parsing into comparable versions
//! - [`error`]: Error types for registry operations

pub mod error;
pub mod filter;
pub mod registries;
pub mod registry;
pub mod selector;
pub mod semver;
