// src/package.rs

//! Package identities, dependency declarations and package metadata
//!
//! Package ids are case-insensitive: `Newtonsoft.Json` and `newtonsoft.json`
//! name the same package. All types here are immutable values once built.

use crate::error::{Error, Result};
use crate::version::{SemanticVersion, VersionSpec};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Check that a package id is usable as a key
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return Err(Error::InvalidPackageId(id.to_string()));
    }
    Ok(())
}

/// Case-insensitive id comparison
pub fn ids_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// A package id and version pair
///
/// Two identities are equal when their ids match case-insensitively and
/// their versions compare equal. Displays as `Id Version`.
#[derive(Debug, Clone)]
pub struct PackageIdentity {
    pub id: String,
    pub version: SemanticVersion,
}

impl PackageIdentity {
    pub fn new(id: impl Into<String>, version: SemanticVersion) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

impl PartialEq for PackageIdentity {
    fn eq(&self, other: &Self) -> bool {
        ids_match(&self.id, &other.id) && self.version == other.version
    }
}

impl Eq for PackageIdentity {}

impl Hash for PackageIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.to_ascii_lowercase().hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

/// A dependency on another package, optionally restricted to a version range
///
/// `None` for the range means any version is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependency {
    pub id: String,
    pub version_spec: Option<VersionSpec>,
}

impl PackageDependency {
    pub fn new(id: impl Into<String>, version_spec: Option<VersionSpec>) -> Self {
        Self {
            id: id.into(),
            version_spec,
        }
    }

    /// Dependency on any version of `id`
    pub fn any(id: impl Into<String>) -> Self {
        Self::new(id, None)
    }

    /// Create a dependency from a range string
    ///
    /// An empty or missing range string yields an unconstrained dependency.
    pub fn create(id: &str, version_spec: Option<&str>) -> Result<Self> {
        validate_id(id)?;
        let version_spec = match version_spec.map(str::trim) {
            None | Some("") => None,
            Some(spec) => Some(VersionSpec::parse(spec)?),
        };
        Ok(Self::new(id, version_spec))
    }

    /// Whether `identity` is a package this dependency accepts
    pub fn is_satisfied_by(&self, identity: &PackageIdentity) -> bool {
        ids_match(&self.id, &identity.id)
            && self
                .version_spec
                .as_ref()
                .is_none_or(|spec| spec.satisfies(&identity.version))
    }
}

/// Displays as `Id` or `Id (≥ 1.0 && < 2.0)`.
impl fmt::Display for PackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version_spec {
            None => f.write_str(&self.id),
            Some(spec) => write!(f, "{} {}", self.id, spec.pretty()),
        }
    }
}

/// A package as seen by a repository: identity plus declared dependencies
#[derive(Debug, Clone)]
pub struct Package {
    identity: PackageIdentity,
    pub description: Option<String>,
    pub dependencies: Vec<PackageDependency>,
}

impl Package {
    pub fn new(id: impl Into<String>, version: SemanticVersion) -> Self {
        Self {
            identity: PackageIdentity::new(id, version),
            description: None,
            dependencies: Vec::new(),
        }
    }

    /// Parse the version and validate the id
    pub fn parse(id: &str, version: &str) -> Result<Self> {
        validate_id(id)?;
        Ok(Self::new(id, SemanticVersion::parse(version)?))
    }

    pub fn with_dependency(mut self, dependency: PackageDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn version(&self) -> &SemanticVersion {
        &self.identity.version
    }

    pub fn identity(&self) -> &PackageIdentity {
        &self.identity
    }

    /// Declared dependencies in order
    pub fn dependencies(&self) -> &[PackageDependency] {
        &self.dependencies
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identity.fmt(f)
    }
}
