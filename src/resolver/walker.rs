// src/resolver/walker.rs

//! Recursive dependency walk shared by the operation planners
//!
//! The walk is depth-first and post-order. A path stack of the packages
//! currently being resolved detects cycles; a visited set makes every
//! identity complete at most once, so diamonds are walked once.

use crate::error::{Error, Result};
use crate::package::{ids_match, Package, PackageDependency, PackageIdentity};
use std::collections::HashSet;
use std::sync::Arc;

/// Walk state for one planning call
#[derive(Debug, Default)]
pub(crate) struct Marker {
    path: Vec<PackageIdentity>,
    visited: HashSet<PackageIdentity>,
}

impl Marker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// On the current path or already walked
    pub(crate) fn contains(&self, identity: &PackageIdentity) -> bool {
        self.visited.contains(identity) || self.path.contains(identity)
    }

    pub(crate) fn is_visited(&self, identity: &PackageIdentity) -> bool {
        self.visited.contains(identity)
    }

    fn is_resolving(&self, id: &str) -> bool {
        self.path.iter().any(|p| ids_match(&p.id, id))
    }
}

/// Hooks a planner plugs into [`walk`]
pub(crate) trait WalkVisitor {
    fn ignore_dependencies(&self) -> bool;

    /// Called before a package's dependencies are walked
    fn before_walk(&mut self, _package: &Arc<Package>, _marker: &Marker) -> Result<()> {
        Ok(())
    }

    /// Map a declared dependency to a concrete package
    fn resolve_dependency(
        &mut self,
        package: &Package,
        dependency: &PackageDependency,
    ) -> Result<Arc<Package>>;

    /// Whether to descend into a resolved dependency
    fn should_walk(&mut self, _dependency: &Arc<Package>, _marker: &Marker) -> Result<bool> {
        Ok(true)
    }

    /// Called once all dependencies of a package are done
    fn after_walk(&mut self, package: &Arc<Package>);
}

/// Walk `package` and its dependencies
///
/// Fails with a circular dependency error when the walk reaches a package id
/// already on the path, whatever its version; the error carries the whole
/// path ending with the offending package.
pub(crate) fn walk<V: WalkVisitor>(
    visitor: &mut V,
    marker: &mut Marker,
    package: &Arc<Package>,
) -> Result<()> {
    let identity = package.identity();

    if marker.is_resolving(&identity.id) {
        let mut path = marker.path.clone();
        path.push(identity.clone());
        return Err(Error::CircularDependency { path });
    }

    if marker.is_visited(identity) {
        return Ok(());
    }

    visitor.before_walk(package, marker)?;
    marker.path.push(identity.clone());

    if !visitor.ignore_dependencies() {
        for dependency in package.dependencies() {
            let resolved = visitor.resolve_dependency(package, dependency)?;
            if marker.is_visited(resolved.identity()) {
                continue;
            }
            if visitor.should_walk(&resolved, marker)? {
                walk(visitor, marker, &resolved)?;
            }
        }
    }

    marker.path.pop();
    marker.visited.insert(identity.clone());
    visitor.after_walk(package);
    Ok(())
}
