// src/resolver/dependents.rs

//! Reverse dependency lookup
//!
//! Answers "which installed packages need this one?" so the uninstall and
//! update planners can refuse to break them.

use crate::package::{Package, PackageIdentity};
use crate::repository::PackageRepository;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Finds the packages that depend on a given package
pub trait DependentsResolver {
    /// Dependents in repository order; empty when nothing depends on `package`
    fn get_dependents(&self, package: &Package) -> Vec<Arc<Package>>;
}

/// Reverse dependency index over one repository
///
/// Each dependency of each package is resolved inside the same repository
/// (latest version satisfying the range), and the package is recorded as a
/// dependent of exactly that resolved identity. Other installed versions of
/// the same id are not considered used. The index is built on the first
/// query and never mutated afterwards.
pub struct ReverseDependencyWalker<'a> {
    repository: &'a dyn PackageRepository,
    index: OnceCell<HashMap<PackageIdentity, Vec<Arc<Package>>>>,
}

impl<'a> ReverseDependencyWalker<'a> {
    pub fn new(repository: &'a dyn PackageRepository) -> Self {
        Self {
            repository,
            index: OnceCell::new(),
        }
    }

    fn build_index(&self) -> HashMap<PackageIdentity, Vec<Arc<Package>>> {
        let mut index: HashMap<PackageIdentity, Vec<Arc<Package>>> = HashMap::new();

        for package in self.repository.packages() {
            for dependency in package.dependencies() {
                let Some(target) = self
                    .repository
                    .find_package_in_range(&dependency.id, dependency.version_spec.as_ref())
                else {
                    debug!(
                        "'{}' in {} has unresolved dependency '{}'",
                        package,
                        self.repository.source(),
                        dependency
                    );
                    continue;
                };

                if target.identity() == package.identity() {
                    continue;
                }

                let dependents = index.entry(target.identity().clone()).or_default();
                if !dependents.iter().any(|d| d.identity() == package.identity()) {
                    dependents.push(package.clone());
                }
            }
        }

        index
    }
}

impl DependentsResolver for ReverseDependencyWalker<'_> {
    fn get_dependents(&self, package: &Package) -> Vec<Arc<Package>> {
        self.index
            .get_or_init(|| self.build_index())
            .get(package.identity())
            .cloned()
            .unwrap_or_default()
    }
}
