// src/resolver/closure.rs

//! Transitive dependency closure

use crate::error::{Error, Result};
use crate::package::Package;
use crate::repository::PackageRepository;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Collects a package and everything it needs from one repository
///
/// The result is a set, not an install order: the root comes first, the rest
/// in breadth-first discovery order. Revisits are skipped, so diamonds and
/// even cycles terminate.
pub struct DependencyResolver<'a> {
    repository: &'a dyn PackageRepository,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(repository: &'a dyn PackageRepository) -> Self {
        Self { repository }
    }

    /// Root plus every transitive dependency, each identity once
    pub fn get_dependencies(&self, package: &Arc<Package>) -> Result<Vec<Arc<Package>>> {
        let mut collected = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();

        seen.insert(package.identity().clone());
        queue.push_back(package.clone());

        while let Some(current) = queue.pop_front() {
            for dependency in current.dependencies() {
                let resolved = self
                    .repository
                    .find_package_in_range(&dependency.id, dependency.version_spec.as_ref())
                    .ok_or_else(|| Error::UnresolvedDependency(dependency.to_string()))?;

                if seen.insert(resolved.identity().clone()) {
                    debug!("'{}' requires '{}'", current, resolved);
                    queue.push_back(resolved);
                }
            }
            collected.push(current);
        }

        Ok(collected)
    }
}
