// src/repository/manifest.rs

//! TOML repository manifests
//!
//! A manifest lists the packages of a repository:
//!
//! ```toml
//! [[package]]
//! id = "web"
//! version = "2.0"
//! description = "Web framework"
//! dependencies = [
//!     { id = "http", version = "[1.0,2.0)" },
//!     { id = "log" },
//! ]
//!
//! [[package]]
//! id = "http"
//! version = "1.4"
//! ```

use super::{MemoryRepository, PackageRepository};
use crate::error::Result;
use crate::package::{Package, PackageDependency};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialized form of a repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryManifest {
    #[serde(default, rename = "package")]
    pub packages: Vec<PackageEntry>,
}

/// One `[[package]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageEntry {
    pub id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyEntry>,
}

/// A dependency inside a package entry; a missing version means any version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PackageEntry {
    /// Validate and convert into a package
    pub fn to_package(&self) -> Result<Package> {
        let mut package = Package::parse(&self.id, &self.version)?;
        package.description = self.description.clone();
        for dep in &self.dependencies {
            package = package.with_dependency(PackageDependency::create(&dep.id, dep.version.as_deref())?);
        }
        Ok(package)
    }
}

impl From<&Package> for PackageEntry {
    fn from(package: &Package) -> Self {
        Self {
            id: package.id().to_string(),
            version: package.version().to_string(),
            description: package.description.clone(),
            dependencies: package
                .dependencies()
                .iter()
                .map(|dep| DependencyEntry {
                    id: dep.id.clone(),
                    version: dep.version_spec.as_ref().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

impl MemoryRepository {
    /// Parse a manifest document into a repository named `source`
    pub fn from_manifest_str(source: impl Into<String>, content: &str) -> Result<Self> {
        let manifest: RepositoryManifest = toml::from_str(content)?;
        let mut packages = Vec::with_capacity(manifest.packages.len());
        for entry in &manifest.packages {
            packages.push(entry.to_package()?);
        }
        Ok(Self::from_packages(source, packages))
    }

    /// Load a repository manifest from disk
    ///
    /// A missing file is an empty repository, so a fresh install root needs
    /// no manifest.
    pub fn load(path: &Path) -> Result<Self> {
        let source = path.display().to_string();
        if !path.exists() {
            debug!("No manifest at {}, starting empty", source);
            return Ok(Self::new(source));
        }
        let content = fs::read_to_string(path)?;
        let repo = Self::from_manifest_str(source, &content)?;
        debug!("Loaded {} packages from {}", repo.len(), path.display());
        Ok(repo)
    }

    pub fn to_manifest(&self) -> RepositoryManifest {
        RepositoryManifest {
            packages: self.packages().map(|p| PackageEntry::from(p.as_ref())).collect(),
        }
    }

    pub fn to_manifest_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.to_manifest())?)
    }

    /// Write the repository back as a manifest
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_manifest_string()?)?;
        debug!("Wrote {} packages to {}", self.len(), path.display());
        Ok(())
    }
}
