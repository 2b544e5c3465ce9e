// src/resolver/update.rs

//! Update planning
//!
//! An update installs the new version (with whatever it needs) and then
//! removes the old one. Before planning, every installed dependent of the old
//! version is checked against the new version so the update cannot leave a
//! dependent with an unsatisfied range.

use crate::error::{Error, Result};
use crate::package::{ids_match, Package};
use crate::repository::PackageRepository;
use std::sync::Arc;
use tracing::{info, warn};

use super::dependents::DependentsResolver;
use super::install::InstallWalker;
use super::plan::{PackageOperation, PackageOperationResolver};

/// Plans replacing the installed version of a package with `package`
pub struct UpdateWalker<'a> {
    local: &'a dyn PackageRepository,
    source: &'a dyn PackageRepository,
    dependents: &'a dyn DependentsResolver,
    ignore_dependencies: bool,
    force: bool,
}

impl<'a> UpdateWalker<'a> {
    pub fn new(
        local: &'a dyn PackageRepository,
        source: &'a dyn PackageRepository,
        dependents: &'a dyn DependentsResolver,
        ignore_dependencies: bool,
        force: bool,
    ) -> Self {
        Self {
            local,
            source,
            dependents,
            ignore_dependencies,
            force,
        }
    }

    /// Fail if an installed dependent of `installed` would reject `target`
    fn check_dependents(&self, installed: &Package, target: &Package) -> Result<()> {
        for dependent in self.dependents.get_dependents(installed) {
            let blocking = dependent
                .dependencies()
                .iter()
                .find(|dep| ids_match(&dep.id, target.id()) && !dep.is_satisfied_by(target.identity()));

            if let Some(dependency) = blocking {
                if self.force {
                    warn!(
                        "Updating '{}' to '{}' breaks '{}' which depends on '{}'",
                        installed, target, dependent, dependency
                    );
                    continue;
                }
                return Err(Error::UpdateConflict {
                    installed: installed.identity().clone(),
                    target: target.identity().clone(),
                    dependent: dependent.identity().clone(),
                    dependency: dependency.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl PackageOperationResolver for UpdateWalker<'_> {
    fn resolve_operations(&self, package: &Arc<Package>) -> Result<Vec<PackageOperation>> {
        let installed = self
            .local
            .find_package(package.id())
            .ok_or_else(|| Error::PackageNotFound(package.id().to_string()))?;

        if installed.version() >= package.version() {
            info!("'{}' is already up to date", installed);
            return Ok(Vec::new());
        }

        self.check_dependents(&installed, package)?;

        let mut operations = InstallWalker::new(self.local, self.source, self.ignore_dependencies)
            .resolve_operations(package)?;
        info!("Planning removal of '{}' after update", installed);
        operations.push(PackageOperation::uninstall(installed));
        Ok(operations)
    }
}
