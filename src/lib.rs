// src/lib.rs

//! pkgplan - dependency resolution and operation planning
//!
//! Given a requested package and a set of repositories, pkgplan resolves a
//! consistent dependency closure and plans the ordered install, uninstall or
//! update operations needed to apply it to a local package set.
//!
//! # Architecture
//!
//! - Repositories: a single capability trait over any queryable package set
//! - Walkers: recursive, read-only planners with path-based cycle detection
//! - Operations: ordered plans; dependencies install first and uninstall last
//! - Manager: plans, then applies a complete plan to the local repository

pub mod config;
mod error;
pub mod manager;
pub mod package;
pub mod repository;
pub mod resolver;
pub mod version;

pub use config::{InstallOptions, PlannerConfig, UninstallOptions, UpdateOptions};
pub use error::{Error, Result};
pub use manager::PackageManager;
pub use package::{Package, PackageDependency, PackageIdentity};
pub use repository::{AggregateRepository, MemoryRepository, PackageRepository};
pub use resolver::{
    DependencyResolver, DependentsResolver, InstallWalker, PackageAction, PackageOperation,
    PackageOperationResolver, ReverseDependencyWalker, UninstallWalker, UpdateWalker,
};
pub use version::{SemanticVersion, VersionSpec};
