// src/resolver/install.rs

//! Install planning
//!
//! Walks a package's dependencies against the source repository and emits
//! Install operations with every dependency ahead of the packages that need
//! it. Dependencies already satisfied by an installed package are taken from
//! the local repository and produce no operation.

use crate::error::{Error, Result};
use crate::package::{Package, PackageDependency};
use crate::repository::PackageRepository;
use std::sync::Arc;
use tracing::{debug, info};

use super::plan::{PackageOperation, PackageOperationResolver};
use super::walker::{walk, Marker, WalkVisitor};

/// Plans the operations needed to install a package
pub struct InstallWalker<'a> {
    local: &'a dyn PackageRepository,
    source: &'a dyn PackageRepository,
    ignore_dependencies: bool,
}

impl<'a> InstallWalker<'a> {
    pub fn new(
        local: &'a dyn PackageRepository,
        source: &'a dyn PackageRepository,
        ignore_dependencies: bool,
    ) -> Self {
        Self {
            local,
            source,
            ignore_dependencies,
        }
    }
}

impl PackageOperationResolver for InstallWalker<'_> {
    fn resolve_operations(&self, package: &Arc<Package>) -> Result<Vec<PackageOperation>> {
        let mut plan = InstallPlan {
            walker: self,
            operations: Vec::new(),
        };
        walk(&mut plan, &mut Marker::new(), package)?;
        Ok(plan.operations)
    }
}

/// Per-call state of an install walk
struct InstallPlan<'w, 'a> {
    walker: &'w InstallWalker<'a>,
    operations: Vec<PackageOperation>,
}

impl WalkVisitor for InstallPlan<'_, '_> {
    fn ignore_dependencies(&self) -> bool {
        self.walker.ignore_dependencies
    }

    fn resolve_dependency(
        &mut self,
        package: &Package,
        dependency: &PackageDependency,
    ) -> Result<Arc<Package>> {
        let spec = dependency.version_spec.as_ref();

        if let Some(installed) = self.walker.local.find_package_in_range(&dependency.id, spec) {
            debug!("'{}' of '{}' satisfied by installed '{}'", dependency, package, installed);
            return Ok(installed);
        }

        self.walker
            .source
            .find_package_in_range(&dependency.id, spec)
            .ok_or_else(|| Error::UnresolvedDependency(dependency.to_string()))
    }

    fn after_walk(&mut self, package: &Arc<Package>) {
        if self.walker.local.exists(package.identity()) {
            debug!("'{}' already installed", package);
            return;
        }
        info!("Planning install of '{}'", package);
        self.operations.push(PackageOperation::install(package.clone()));
    }
}
