// src/resolver/uninstall.rs

//! Uninstall planning
//!
//! Removal walks the installed dependency graph of a package. A package is
//! only removed when nothing outside the removal set still needs it, and the
//! plan lists every package before its dependencies, so no step ever leaves
//! an installed package without something it depends on.

use crate::error::{Error, Result};
use crate::package::{Package, PackageDependency, PackageIdentity};
use crate::repository::PackageRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::dependents::DependentsResolver;
use super::plan::{PackageOperation, PackageOperationResolver};
use super::walker::{walk, Marker, WalkVisitor};

/// Plans the operations needed to remove an installed package
pub struct UninstallWalker<'a> {
    local: &'a dyn PackageRepository,
    dependents: &'a dyn DependentsResolver,
    remove_dependencies: bool,
    force_remove: bool,
    throw_on_conflicts: bool,
}

impl<'a> UninstallWalker<'a> {
    pub fn new(
        local: &'a dyn PackageRepository,
        dependents: &'a dyn DependentsResolver,
        remove_dependencies: bool,
        force_remove: bool,
    ) -> Self {
        Self {
            local,
            dependents,
            remove_dependencies,
            force_remove,
            throw_on_conflicts: false,
        }
    }

    /// Fail instead of skipping when a cascaded dependency is still in use
    pub fn with_throw_on_conflicts(mut self, throw_on_conflicts: bool) -> Self {
        self.throw_on_conflicts = throw_on_conflicts;
        self
    }
}

impl PackageOperationResolver for UninstallWalker<'_> {
    fn resolve_operations(&self, package: &Arc<Package>) -> Result<Vec<PackageOperation>> {
        let installed = self
            .local
            .find_package_version(package.id(), package.version())
            .ok_or_else(|| Error::PackageNotFound(package.id().to_string()))?;

        let mut plan = UninstallPlan {
            walker: self,
            operations: Vec::new(),
        };
        walk(&mut plan, &mut Marker::new(), &installed)?;

        // Post-order puts dependencies first; removal needs the reverse
        plan.operations.reverse();
        Ok(plan.operations)
    }
}

/// Per-call state of an uninstall walk
struct UninstallPlan<'w, 'a> {
    walker: &'w UninstallWalker<'a>,
    operations: Vec<PackageOperation>,
}

impl UninstallPlan<'_, '_> {
    /// Dependents of `package` that are not themselves going away
    fn external_dependents(&self, package: &Package, marker: &Marker) -> Vec<Arc<Package>> {
        let mut connected = HashMap::new();
        self.walker
            .dependents
            .get_dependents(package)
            .into_iter()
            .filter(|dependent| !self.is_connected(dependent, marker, &mut connected))
            .collect()
    }

    /// A package is connected to the removal set when it is already in it,
    /// or when it has dependents and all of them are connected.
    fn is_connected(
        &self,
        package: &Package,
        marker: &Marker,
        connected: &mut HashMap<PackageIdentity, bool>,
    ) -> bool {
        if marker.contains(package.identity()) {
            return true;
        }
        if let Some(&known) = connected.get(package.identity()) {
            return known;
        }

        // Pending entries read as unconnected, which ends reverse cycles
        connected.insert(package.identity().clone(), false);
        let dependents = self.walker.dependents.get_dependents(package);
        let result = !dependents.is_empty()
            && dependents
                .iter()
                .all(|d| self.is_connected(d, marker, connected));
        connected.insert(package.identity().clone(), result);
        result
    }
}

impl WalkVisitor for UninstallPlan<'_, '_> {
    fn ignore_dependencies(&self) -> bool {
        !self.walker.remove_dependencies
    }

    fn before_walk(&mut self, package: &Arc<Package>, marker: &Marker) -> Result<()> {
        let dependents = self.external_dependents(package, marker);
        let Some(dependent) = dependents.first() else {
            return Ok(());
        };

        if self.walker.force_remove {
            warn!("Removing '{}' although '{}' depends on it", package, dependent);
            return Ok(());
        }

        Err(Error::PackageInUse {
            package: package.identity().clone(),
            dependent: dependent.identity().clone(),
        })
    }

    fn resolve_dependency(
        &mut self,
        _package: &Package,
        dependency: &PackageDependency,
    ) -> Result<Arc<Package>> {
        self.walker
            .local
            .find_package_in_range(&dependency.id, dependency.version_spec.as_ref())
            .ok_or_else(|| Error::DependencyNotInstalled(dependency.id.clone()))
    }

    fn should_walk(&mut self, dependency: &Arc<Package>, marker: &Marker) -> Result<bool> {
        if self.walker.force_remove {
            return Ok(true);
        }

        let dependents = self.external_dependents(dependency, marker);
        let Some(dependent) = dependents.first() else {
            return Ok(true);
        };

        if self.walker.throw_on_conflicts {
            return Err(Error::PackageInUse {
                package: dependency.identity().clone(),
                dependent: dependent.identity().clone(),
            });
        }

        info!("Skipping '{}' because '{}' depends on it", dependency, dependent);
        Ok(false)
    }

    fn after_walk(&mut self, package: &Arc<Package>) {
        info!("Planning removal of '{}'", package);
        self.operations.push(PackageOperation::uninstall(package.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use crate::resolver::ReverseDependencyWalker;

    fn pkg(id: &str, deps: &[&str]) -> Package {
        deps.iter().fold(Package::parse(id, "1.0").unwrap(), |p, d| {
            p.with_dependency(PackageDependency::any(*d))
        })
    }

    fn plan(
        local: &MemoryRepository,
        id: &str,
        remove_dependencies: bool,
        force: bool,
    ) -> Result<Vec<String>> {
        let dependents = ReverseDependencyWalker::new(local);
        let root = Arc::new(Package::parse(id, "1.0").unwrap());
        UninstallWalker::new(local, &dependents, remove_dependencies, force)
            .resolve_operations(&root)
            .map(|ops| ops.iter().map(|op| op.to_string()).collect())
    }

    #[test]
    fn test_uninstall_single_package() {
        let local = MemoryRepository::from_packages("local", vec![pkg("A", &["B"]), pkg("B", &[])]);
        assert_eq!(plan(&local, "A", false, false).unwrap(), vec!["Uninstall A 1.0"]);
    }

    #[test]
    fn test_uninstall_missing_root() {
        let local = MemoryRepository::new("local");
        let err = plan(&local, "A", false, false).unwrap_err();
        assert_eq!(err.to_string(), "Unable to find package 'A'");
    }

    #[test]
    fn test_uninstall_missing_cascaded_dependency() {
        let local = MemoryRepository::from_packages("local", vec![pkg("A", &["B"])]);
        let err = plan(&local, "A", true, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to locate dependency 'B'. It may have been uninstalled"
        );
        // Without cascading the missing dependency is never looked up
        assert_eq!(plan(&local, "A", false, false).unwrap(), vec!["Uninstall A 1.0"]);
    }

    #[test]
    fn test_uninstall_with_dependencies_chain() {
        let local = MemoryRepository::from_packages(
            "local",
            vec![pkg("A", &["B"]), pkg("B", &["C"]), pkg("C", &[])],
        );
        assert_eq!(
            plan(&local, "A", true, false).unwrap(),
            vec!["Uninstall A 1.0", "Uninstall B 1.0", "Uninstall C 1.0"]
        );
    }

    #[test]
    fn test_uninstall_skips_shared_dependency() {
        let local = MemoryRepository::from_packages(
            "local",
            vec![pkg("A", &["B"]), pkg("X", &["B"]), pkg("B", &[])],
        );
        assert_eq!(plan(&local, "A", true, false).unwrap(), vec!["Uninstall A 1.0"]);
    }

    #[test]
    fn test_uninstall_throw_on_conflicts() {
        let local = MemoryRepository::from_packages(
            "local",
            vec![pkg("A", &["B"]), pkg("X", &["B"]), pkg("B", &[])],
        );
        let dependents = ReverseDependencyWalker::new(&local);
        let root = local.find_package("A").unwrap();
        let err = UninstallWalker::new(&local, &dependents, true, false)
            .with_throw_on_conflicts(true)
            .resolve_operations(&root)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to uninstall 'B 1.0' because 'X 1.0' depends on it"
        );
    }

    #[test]
    fn test_uninstall_force_cascades_through_shared_dependency() {
        let local = MemoryRepository::from_packages(
            "local",
            vec![pkg("A", &["B"]), pkg("X", &["B"]), pkg("B", &[])],
        );
        assert_eq!(
            plan(&local, "A", true, true).unwrap(),
            vec!["Uninstall A 1.0", "Uninstall B 1.0"]
        );
    }

    #[test]
    fn test_uninstall_dependency_kept_for_surviving_sibling() {
        // C stays because Y needs it, so D stays because C needs it
        let local = MemoryRepository::from_packages(
            "local",
            vec![
                pkg("A", &["B", "C"]),
                pkg("B", &["D"]),
                pkg("C", &["D"]),
                pkg("D", &[]),
                pkg("Y", &["C"]),
            ],
        );
        assert_eq!(
            plan(&local, "A", true, false).unwrap(),
            vec!["Uninstall A 1.0", "Uninstall B 1.0"]
        );
    }

    #[test]
    fn test_uninstall_cycle_detected() {
        let local = MemoryRepository::from_packages("local", vec![pkg("A", &["B"]), pkg("B", &["A"])]);
        let err = plan(&local, "A", true, true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Circular dependency detected 'A 1.0 => B 1.0 => A 1.0'"
        );
    }
}
