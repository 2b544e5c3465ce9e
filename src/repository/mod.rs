// src/repository/mod.rs

//! Package repositories
//!
//! A repository is any queryable set of packages. The planners only see the
//! [`PackageRepository`] trait, so local installs, remote feeds and test
//! fixtures are interchangeable.
//!
//! Lookups never fail at this layer: a package that is not there is `None`.

pub mod manifest;

use crate::package::{ids_match, Package, PackageIdentity};
use crate::version::{SemanticVersion, VersionSpec};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Queryable set of packages
pub trait PackageRepository: Send + Sync {
    /// Human-readable name of the repository (path, URL, label)
    fn source(&self) -> &str;

    /// Enumerate all packages
    fn packages(&self) -> Box<dyn Iterator<Item = Arc<Package>> + '_>;

    /// All versions of `id`, oldest first
    fn find_packages_by_id(&self, id: &str) -> Vec<Arc<Package>> {
        let mut found: Vec<Arc<Package>> = self
            .packages()
            .filter(|p| ids_match(p.id(), id))
            .collect();
        found.sort_by(|a, b| a.version().cmp(b.version()));
        found
    }

    /// Latest version of `id`
    fn find_package(&self, id: &str) -> Option<Arc<Package>> {
        self.find_packages_by_id(id).pop()
    }

    /// Exact version of `id`
    fn find_package_version(&self, id: &str, version: &SemanticVersion) -> Option<Arc<Package>> {
        self.find_packages_by_id(id)
            .into_iter()
            .find(|p| p.version() == version)
    }

    /// Latest version of `id` accepted by `spec` (any version when `None`)
    fn find_package_in_range(&self, id: &str, spec: Option<&VersionSpec>) -> Option<Arc<Package>> {
        self.find_packages_by_id(id)
            .into_iter()
            .rev()
            .find(|p| spec.is_none_or(|s| s.satisfies(p.version())))
    }

    /// Whether this exact identity is present
    fn exists(&self, identity: &PackageIdentity) -> bool {
        self.find_package_version(&identity.id, &identity.version)
            .is_some()
    }
}

/// In-memory repository ordered by id (case-insensitive), then version
///
/// Enumeration order is deterministic, which keeps planner output and error
/// messages stable. Used for local installs loaded from a manifest and for
/// tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    source: String,
    packages: BTreeMap<String, BTreeMap<SemanticVersion, Arc<Package>>>,
}

impl MemoryRepository {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            packages: BTreeMap::new(),
        }
    }

    /// Build a repository from a list of packages
    pub fn from_packages(source: impl Into<String>, packages: impl IntoIterator<Item = Package>) -> Self {
        let mut repo = Self::new(source);
        for package in packages {
            repo.add_package(Arc::new(package));
        }
        repo
    }

    /// Add a package, replacing any package with the same identity
    pub fn add_package(&mut self, package: Arc<Package>) {
        self.packages
            .entry(package.id().to_ascii_lowercase())
            .or_default()
            .insert(package.version().clone(), package);
    }

    /// Remove a package; returns it if it was present
    pub fn remove_package(&mut self, identity: &PackageIdentity) -> Option<Arc<Package>> {
        let key = identity.id.to_ascii_lowercase();
        let versions = self.packages.get_mut(&key)?;
        let removed = versions.remove(&identity.version);
        if versions.is_empty() {
            self.packages.remove(&key);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageRepository for MemoryRepository {
    fn source(&self) -> &str {
        &self.source
    }

    fn packages(&self) -> Box<dyn Iterator<Item = Arc<Package>> + '_> {
        Box::new(self.packages.values().flat_map(|v| v.values().cloned()))
    }

    fn find_packages_by_id(&self, id: &str) -> Vec<Arc<Package>> {
        self.packages
            .get(&id.to_ascii_lowercase())
            .map(|versions| versions.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// Several repositories queried as one
///
/// Repositories are consulted in order; when two repositories carry the same
/// identity the earlier one wins.
#[derive(Clone, Default)]
pub struct AggregateRepository {
    source: String,
    repositories: Vec<Arc<dyn PackageRepository>>,
}

impl AggregateRepository {
    pub fn new(repositories: Vec<Arc<dyn PackageRepository>>) -> Self {
        let source = repositories
            .iter()
            .map(|r| r.source())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            source,
            repositories,
        }
    }

    pub fn repositories(&self) -> &[Arc<dyn PackageRepository>] {
        &self.repositories
    }
}

impl PackageRepository for AggregateRepository {
    fn source(&self) -> &str {
        &self.source
    }

    fn packages(&self) -> Box<dyn Iterator<Item = Arc<Package>> + '_> {
        let mut seen = std::collections::HashSet::new();
        Box::new(
            self.repositories
                .iter()
                .flat_map(|r| r.packages())
                .filter(move |p| seen.insert(p.identity().clone())),
        )
    }

    fn find_packages_by_id(&self, id: &str) -> Vec<Arc<Package>> {
        let mut found: Vec<Arc<Package>> = Vec::new();
        for repo in &self.repositories {
            for package in repo.find_packages_by_id(id) {
                if !found.iter().any(|p| p.identity() == package.identity()) {
                    found.push(package);
                }
            }
        }
        // Stable sort keeps the earlier repository first among equals
        found.sort_by(|a, b| a.version().cmp(b.version()));
        found
    }
}

impl std::fmt::Debug for AggregateRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateRepository")
            .field("source", &self.source)
            .field("repositories", &self.repositories.len())
            .finish()
    }
}
