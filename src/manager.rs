// src/manager.rs

//! Package manager front end for the planners
//!
//! `PackageManager` looks up the requested package, asks the matching walker
//! for a plan and applies the plan to the local repository. Planning happens
//! completely before anything is applied, so a failed plan changes nothing.

use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::package::Package;
use crate::repository::{MemoryRepository, PackageRepository};
use crate::resolver::{
    DependencyResolver, DependentsResolver, InstallWalker, PackageAction, PackageOperation, PackageOperationResolver,
    ReverseDependencyWalker, UninstallWalker, UpdateWalker,
};
use crate::version::{SemanticVersion, VersionSpec};
use std::sync::Arc;
use tracing::{debug, info};

/// Installs, removes and updates packages in a local repository
pub struct PackageManager {
    source: Arc<dyn PackageRepository>,
    local: MemoryRepository,
    config: PlannerConfig,
}

impl PackageManager {
    pub fn new(source: Arc<dyn PackageRepository>, local: MemoryRepository) -> Self {
        Self {
            source,
            local,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PlannerConfig {
        &mut self.config
    }

    pub fn local(&self) -> &MemoryRepository {
        &self.local
    }

    pub fn source(&self) -> &dyn PackageRepository {
        self.source.as_ref()
    }

    pub fn into_local(self) -> MemoryRepository {
        self.local
    }

    /// Latest source package of `id` accepted by `spec`
    pub fn find_source_package(&self, id: &str, spec: Option<&VersionSpec>) -> Result<Arc<Package>> {
        self.source
            .find_package_in_range(id, spec)
            .ok_or_else(|| Error::PackageNotFound(id.to_string()))
    }

    /// Installed package of `id`, the exact version when given, else the latest
    pub fn find_installed_package(
        &self,
        id: &str,
        version: Option<&SemanticVersion>,
    ) -> Result<Arc<Package>> {
        let found = match version {
            Some(version) => self.local.find_package_version(id, version),
            None => self.local.find_package(id),
        };
        found.ok_or_else(|| Error::PackageNotFound(id.to_string()))
    }

    /// Newest source version of an installed package, if any
    pub fn find_update(&self, id: &str, spec: Option<&VersionSpec>) -> Result<Option<Arc<Package>>> {
        let installed = self.find_installed_package(id, None)?;
        Ok(self
            .source
            .find_package_in_range(id, spec)
            .filter(|candidate| candidate.version() > installed.version()))
    }

    /// Closure of a source package
    pub fn dependencies(&self, id: &str, spec: Option<&VersionSpec>) -> Result<Vec<Arc<Package>>> {
        let package = self.find_source_package(id, spec)?;
        DependencyResolver::new(self.source.as_ref()).get_dependencies(&package)
    }

    /// Installed packages that depend on an installed package
    pub fn dependents(&self, id: &str, version: Option<&SemanticVersion>) -> Result<Vec<Arc<Package>>> {
        let package = self.find_installed_package(id, version)?;
        Ok(ReverseDependencyWalker::new(&self.local).get_dependents(&package))
    }

    pub fn plan_install(&self, id: &str, spec: Option<&VersionSpec>) -> Result<Vec<PackageOperation>> {
        let package = self.find_source_package(id, spec)?;
        let options = &self.config.install;
        InstallWalker::new(&self.local, self.source.as_ref(), options.ignore_dependencies)
            .resolve_operations(&package)
    }

    pub fn plan_uninstall(
        &self,
        id: &str,
        version: Option<&SemanticVersion>,
    ) -> Result<Vec<PackageOperation>> {
        let package = self.find_installed_package(id, version)?;
        let options = &self.config.uninstall;
        let dependents = ReverseDependencyWalker::new(&self.local);
        UninstallWalker::new(
            &self.local,
            &dependents,
            options.remove_dependencies,
            options.force,
        )
        .with_throw_on_conflicts(options.throw_on_conflicts)
        .resolve_operations(&package)
    }

    pub fn plan_update(&self, id: &str, spec: Option<&VersionSpec>) -> Result<Vec<PackageOperation>> {
        let Some(target) = self.find_update(id, spec)? else {
            info!("No update available for '{}'", id);
            return Ok(Vec::new());
        };
        let options = &self.config.update;
        let dependents = ReverseDependencyWalker::new(&self.local);
        UpdateWalker::new(
            &self.local,
            self.source.as_ref(),
            &dependents,
            options.ignore_dependencies,
            options.force,
        )
        .resolve_operations(&target)
    }

    pub fn install(&mut self, id: &str, spec: Option<&VersionSpec>) -> Result<Vec<PackageOperation>> {
        let operations = self.plan_install(id, spec)?;
        self.apply(&operations);
        Ok(operations)
    }

    pub fn uninstall(
        &mut self,
        id: &str,
        version: Option<&SemanticVersion>,
    ) -> Result<Vec<PackageOperation>> {
        let operations = self.plan_uninstall(id, version)?;
        self.apply(&operations);
        Ok(operations)
    }

    pub fn update(&mut self, id: &str, spec: Option<&VersionSpec>) -> Result<Vec<PackageOperation>> {
        let operations = self.plan_update(id, spec)?;
        self.apply(&operations);
        Ok(operations)
    }

    /// Apply operations to the local repository in order
    pub fn apply(&mut self, operations: &[PackageOperation]) {
        for operation in operations {
            match operation.action {
                PackageAction::Install => {
                    info!("Installing '{}'", operation.package);
                    self.local.add_package(operation.package.clone());
                }
                PackageAction::Uninstall => {
                    info!("Removing '{}'", operation.package);
                    if self.local.remove_package(operation.identity()).is_none() {
                        debug!("'{}' was not installed", operation.package);
                    }
                }
            }
        }
    }
}
