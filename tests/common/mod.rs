// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use pkgplan::{MemoryRepository, Package, PackageDependency, PackageOperation};
use std::sync::Arc;

/// Build a package from `id`, `version` and `(dependency, range)` pairs.
pub fn package(id: &str, version: &str, deps: &[(&str, Option<&str>)]) -> Package {
    deps.iter().fold(Package::parse(id, version).unwrap(), |p, (dep, range)| {
        p.with_dependency(PackageDependency::create(dep, *range).unwrap())
    })
}

/// Build a package whose dependencies accept any version.
pub fn simple(id: &str, version: &str, deps: &[&str]) -> Package {
    deps.iter().fold(Package::parse(id, version).unwrap(), |p, dep| {
        p.with_dependency(PackageDependency::any(*dep))
    })
}

pub fn repository(source: &str, packages: Vec<Package>) -> MemoryRepository {
    MemoryRepository::from_packages(source, packages)
}

/// Look up an exact package, panicking if it is missing.
pub fn get(repo: &MemoryRepository, id: &str, version: &str) -> Arc<Package> {
    use pkgplan::PackageRepository;
    repo.find_package_version(id, &version.parse().unwrap())
        .unwrap_or_else(|| panic!("{} {} not in {}", id, version, repo.source()))
}

/// Render operations as "Install A 1.0" lines.
pub fn render(operations: &[PackageOperation]) -> Vec<String> {
    operations.iter().map(|op| op.to_string()).collect()
}

/// Index of the operation touching `id`.
pub fn position(operations: &[PackageOperation], id: &str) -> usize {
    operations
        .iter()
        .position(|op| op.package.id().eq_ignore_ascii_case(id))
        .unwrap_or_else(|| panic!("no operation for {}", id))
}

/// The diamond A -> {B, C}, B -> D, C -> D, all at 1.0.
pub fn diamond() -> Vec<Package> {
    vec![
        simple("A", "1.0", &["B", "C"]),
        simple("B", "1.0", &["D"]),
        simple("C", "1.0", &["D"]),
        simple("D", "1.0", &[]),
    ]
}
