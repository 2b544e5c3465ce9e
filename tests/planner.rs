// tests/planner.rs

//! End-to-end planning scenarios for install, uninstall and closure.

mod common;

use common::{diamond, get, package, position, render, repository, simple};
use pkgplan::{
    DependencyResolver, DependentsResolver, Error, InstallWalker, MemoryRepository, PackageAction,
    PackageOperationResolver, ReverseDependencyWalker, UninstallWalker, VersionSpec,
};
use std::collections::HashSet;

#[test]
fn test_install_dependency_before_dependent() {
    let local = MemoryRepository::new("local");
    let source = repository("source", vec![simple("A", "1.0", &["B"]), simple("B", "1.0", &[])]);

    let ops = InstallWalker::new(&local, &source, false)
        .resolve_operations(&get(&source, "A", "1.0"))
        .unwrap();
    assert_eq!(render(&ops), vec!["Install B 1.0", "Install A 1.0"]);
}

#[test]
fn test_install_cycle_is_reported_with_path() {
    let local = MemoryRepository::new("local");
    let source = repository("source", vec![simple("A", "1.0", &["B"]), simple("B", "1.0", &["A"])]);

    let err = InstallWalker::new(&local, &source, false)
        .resolve_operations(&get(&source, "A", "1.0"))
        .unwrap_err();
    assert!(matches!(err, Error::CircularDependency { .. }));
    assert!(err.to_string().contains("A 1.0 => B 1.0 => A 1.0"), "{}", err);
}

#[test]
fn test_install_longer_cycle_names_every_node() {
    let local = MemoryRepository::new("local");
    let source = repository(
        "source",
        vec![
            simple("A", "1.0", &["B"]),
            simple("B", "1.0", &["C"]),
            simple("C", "1.0", &["A"]),
        ],
    );

    let err = InstallWalker::new(&local, &source, false)
        .resolve_operations(&get(&source, "A", "1.0"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Circular dependency detected 'A 1.0 => B 1.0 => C 1.0 => A 1.0'"
    );
}

#[test]
fn test_uninstall_diamond_removes_each_package_once() {
    let local = repository("local", diamond());
    let dependents = ReverseDependencyWalker::new(&local);

    let ops = UninstallWalker::new(&local, &dependents, true, false)
        .resolve_operations(&get(&local, "A", "1.0"))
        .unwrap();

    assert_eq!(ops.len(), 4);
    let unique: HashSet<_> = ops.iter().map(|op| op.identity().clone()).collect();
    assert_eq!(unique.len(), 4);
    assert!(ops.iter().all(|op| op.action == PackageAction::Uninstall));

    // Dependents go before their dependencies
    for (dependent, dependency) in [("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")] {
        assert!(position(&ops, dependent) < position(&ops, dependency));
    }
}

#[test]
fn test_install_diamond_orders_dependencies_first() {
    let local = MemoryRepository::new("local");
    let source = repository("source", diamond());

    let ops = InstallWalker::new(&local, &source, false)
        .resolve_operations(&get(&source, "A", "1.0"))
        .unwrap();

    assert_eq!(ops.len(), 4);
    for (dependent, dependency) in [("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")] {
        assert!(position(&ops, dependency) < position(&ops, dependent));
    }
}

#[test]
fn test_exact_version_unavailable() {
    let local = MemoryRepository::new("local");
    let source = repository(
        "source",
        vec![package("A", "1.0", &[("B", Some("[1.5]"))]), simple("B", "1.4", &[])],
    );

    let err = InstallWalker::new(&local, &source, false)
        .resolve_operations(&get(&source, "A", "1.0"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Unable to resolve dependency 'B (= 1.5)'");
}

#[test]
fn test_minimum_version_unavailable() {
    let local = MemoryRepository::new("local");
    let source = repository(
        "source",
        vec![package("A", "1.0", &[("B", Some("1.5"))]), simple("B", "1.4", &[])],
    );

    let err = InstallWalker::new(&local, &source, false)
        .resolve_operations(&get(&source, "A", "1.0"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Unable to resolve dependency 'B (≥ 1.5)'");
}

#[test]
fn test_uninstall_in_use_requires_force() {
    let local = repository("local", vec![simple("A", "1.0", &["B"]), simple("B", "1.0", &[])]);
    let dependents = ReverseDependencyWalker::new(&local);
    let b = get(&local, "B", "1.0");

    let err = UninstallWalker::new(&local, &dependents, false, false)
        .resolve_operations(&b)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unable to uninstall 'B 1.0' because 'A 1.0' depends on it");

    let ops = UninstallWalker::new(&local, &dependents, false, true)
        .resolve_operations(&b)
        .unwrap();
    assert_eq!(render(&ops), vec!["Uninstall B 1.0"]);
}

#[test]
fn test_uninstall_chain_reverse_order() {
    let local = repository(
        "local",
        vec![
            simple("A", "1.0", &["B"]),
            simple("B", "1.0", &["C"]),
            simple("C", "1.0", &[]),
        ],
    );
    let dependents = ReverseDependencyWalker::new(&local);

    let ops = UninstallWalker::new(&local, &dependents, true, false)
        .resolve_operations(&get(&local, "A", "1.0"))
        .unwrap();
    assert_eq!(
        render(&ops),
        vec!["Uninstall A 1.0", "Uninstall B 1.0", "Uninstall C 1.0"]
    );
}

#[test]
fn test_closure_contains_each_package_once() {
    let source = repository("source", diamond());

    let closure = DependencyResolver::new(&source)
        .get_dependencies(&get(&source, "A", "1.0"))
        .unwrap();
    assert_eq!(closure.len(), 4);
    assert_eq!(closure[0].id(), "A");

    let unique: HashSet<_> = closure.iter().map(|p| p.identity().clone()).collect();
    assert_eq!(unique.len(), closure.len());
}

#[test]
fn test_dependents_respect_installed_version() {
    let local = repository(
        "local",
        vec![
            package("A", "1.0", &[("B", Some("[1.0,2.0)"))]),
            simple("B", "1.0", &[]),
            simple("B", "2.0", &[]),
            simple("C", "1.0", &["B"]),
        ],
    );
    let dependents = ReverseDependencyWalker::new(&local);

    // A's range resolves to B 1.0, C takes the latest
    let on_b1: Vec<String> = dependents
        .get_dependents(&get(&local, "B", "1.0"))
        .iter()
        .map(|p| p.to_string())
        .collect();
    let on_b2: Vec<String> = dependents
        .get_dependents(&get(&local, "B", "2.0"))
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(on_b1, vec!["A 1.0"]);
    assert_eq!(on_b2, vec!["C 1.0"]);
}

#[test]
fn test_version_spec_canonical_round_trip() {
    let spec = VersionSpec::parse("(1.0, 5.0]").unwrap();
    assert_eq!(spec.min_version().unwrap().to_string(), "1.0");
    assert!(!spec.is_min_inclusive());
    assert_eq!(spec.max_version().unwrap().to_string(), "5.0");
    assert!(spec.is_max_inclusive());
    assert_eq!(spec.to_string(), "(1.0, 5.0]");

    for canonical in ["1.0", "[1.5]", "[1.0, 2.0)", "(, 3.0]", "(1.0, )"] {
        assert_eq!(VersionSpec::parse(canonical).unwrap().to_string(), canonical);
    }
}
