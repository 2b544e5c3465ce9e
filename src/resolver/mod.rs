// src/resolver/mod.rs

//! Dependency resolution and operation planning
//!
//! This module turns a requested package into an ordered list of install or
//! uninstall operations:
//!
//! - [`DependencyResolver`] collects the transitive closure of a package
//! - [`ReverseDependencyWalker`] answers which installed packages need another
//! - [`InstallWalker`] plans installs, dependencies first
//! - [`UninstallWalker`] plans removals, dependents first
//! - [`UpdateWalker`] plans replacing an installed version
//!
//! Planning is read-only: repositories are queried, never modified, and all
//! walk state lives for a single `resolve_operations` call.

mod closure;
mod dependents;
mod install;
mod plan;
mod uninstall;
mod update;
mod walker;

pub use closure::DependencyResolver;
pub use dependents::{DependentsResolver, ReverseDependencyWalker};
pub use install::InstallWalker;
pub use plan::{OperationRecord, PackageAction, PackageOperation, PackageOperationResolver, PlanSummary};
pub use uninstall::UninstallWalker;
pub use update::UpdateWalker;
