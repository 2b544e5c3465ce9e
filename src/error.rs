// src/error.rs

//! Error types for version parsing, repository access and operation planning
//!
//! The planning errors render the exact messages callers match on, so the
//! format strings here are part of the public contract.

use crate::package::PackageIdentity;
use thiserror::Error;

/// Errors produced by pkgplan
#[derive(Debug, Error)]
pub enum Error {
    /// A version string could not be parsed
    #[error("'{0}' is not a valid version string")]
    InvalidVersion(String),

    /// A version range string is malformed
    #[error("'{0}' is not a valid version range")]
    InvalidVersionSpec(String),

    /// A version range whose lower bound exceeds its upper bound
    #[error("Invalid version range: minimum version '{min}' is greater than maximum version '{max}'")]
    InvalidVersionRange { min: String, max: String },

    /// A package id is empty or contains whitespace
    #[error("'{0}' is not a valid package id")]
    InvalidPackageId(String),

    /// A declared dependency has no matching package
    #[error("Unable to resolve dependency '{0}'")]
    UnresolvedDependency(String),

    /// The walk came back to a package already on the resolution path
    #[error("Circular dependency detected '{}'", render_path(.path))]
    CircularDependency { path: Vec<PackageIdentity> },

    /// The requested package is not installed
    #[error("Unable to find package '{0}'")]
    PackageNotFound(String),

    /// A dependency of a package being removed is not installed
    #[error("Unable to locate dependency '{0}'. It may have been uninstalled")]
    DependencyNotInstalled(String),

    /// Removal is blocked by an installed dependent
    #[error("Unable to uninstall '{package}' because '{dependent}' depends on it")]
    PackageInUse {
        package: PackageIdentity,
        dependent: PackageIdentity,
    },

    /// Update is blocked by a dependent whose range rejects the new version
    #[error("Unable to update '{installed}' to '{target}' because '{dependent}' depends on '{dependency}'")]
    UpdateConflict {
        installed: PackageIdentity,
        target: PackageIdentity,
        dependent: PackageIdentity,
        dependency: String,
    },

    /// File system error while reading or writing manifests
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Manifest or config could not be parsed
    #[error("Failed to parse manifest: {0}")]
    ManifestError(#[from] toml::de::Error),

    /// Manifest could not be serialized
    #[error("Failed to write manifest: {0}")]
    ManifestWriteError(#[from] toml::ser::Error),
}

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;

fn render_path(path: &[PackageIdentity]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" => ")
}
