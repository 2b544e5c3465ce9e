// src/commands.rs
//! Command handlers for the pkgplan CLI

use anyhow::{Context, Result};
use pkgplan::repository::AggregateRepository;
use pkgplan::resolver::PlanSummary;
use pkgplan::{
    MemoryRepository, Package, PackageManager, PackageOperation, PackageRepository, PlannerConfig,
    SemanticVersion, VersionSpec,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Repositories and output settings shared by every command
pub struct Session {
    pub local_path: PathBuf,
    pub json: bool,
    pub manager: PackageManager,
}

impl Session {
    /// Load the local manifest, the source manifests and the planner config
    pub fn open(local: &Path, sources: &[PathBuf], config: Option<&Path>, json: bool) -> Result<Self> {
        let local_repo = MemoryRepository::load(local)
            .with_context(|| format!("Failed to load local manifest {}", local.display()))?;

        let mut repositories: Vec<Arc<dyn PackageRepository>> = Vec::with_capacity(sources.len());
        for path in sources {
            let repo = MemoryRepository::load(path)
                .with_context(|| format!("Failed to load source manifest {}", path.display()))?;
            repositories.push(Arc::new(repo));
        }

        let config = match config {
            Some(path) => PlannerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PlannerConfig::default(),
        };

        let manager = PackageManager::new(Arc::new(AggregateRepository::new(repositories)), local_repo)
            .with_config(config);

        Ok(Self {
            local_path: local.to_path_buf(),
            json,
            manager,
        })
    }

    fn save(&self) -> Result<()> {
        self.manager
            .local()
            .save(&self.local_path)
            .with_context(|| format!("Failed to write {}", self.local_path.display()))?;
        info!("Wrote {}", self.local_path.display());
        Ok(())
    }
}

fn parse_spec(version: Option<&str>) -> Result<Option<VersionSpec>> {
    version
        .map(|v| VersionSpec::parse(v).with_context(|| format!("Invalid version range '{}'", v)))
        .transpose()
}

fn parse_version(version: Option<&str>) -> Result<Option<SemanticVersion>> {
    version
        .map(|v| SemanticVersion::parse(v).with_context(|| format!("Invalid version '{}'", v)))
        .transpose()
}

fn print_plan(operations: &[PackageOperation], json: bool) -> Result<()> {
    if json {
        let records: Vec<_> = operations.iter().map(PackageOperation::to_record).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if operations.is_empty() {
        println!("Nothing to do");
        return Ok(());
    }
    for operation in operations {
        println!("{}", operation);
    }
    let summary = PlanSummary::from_operations(operations);
    println!(
        "\n{} operation(s): {} install, {} uninstall",
        summary.total_operations, summary.installs, summary.uninstalls
    );
    Ok(())
}

fn print_packages(packages: &[Arc<Package>], json: bool, empty: &str) -> Result<()> {
    if json {
        let records: Vec<_> = packages
            .iter()
            .map(|p| serde_json::json!({ "id": p.id(), "version": p.version().to_string() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if packages.is_empty() {
        println!("{}", empty);
    } else {
        for package in packages {
            println!("{}", package);
        }
    }
    Ok(())
}

/// Plan (and optionally apply) installing a package
pub fn cmd_install(
    session: &mut Session,
    package: &str,
    version: Option<&str>,
    ignore_dependencies: bool,
    apply: bool,
) -> Result<()> {
    let spec = parse_spec(version)?;
    if ignore_dependencies {
        session.manager.config_mut().install.ignore_dependencies = true;
    }

    let operations = if apply {
        session.manager.install(package, spec.as_ref())?
    } else {
        session.manager.plan_install(package, spec.as_ref())?
    };
    print_plan(&operations, session.json)?;

    if apply && !operations.is_empty() {
        session.save()?;
    }
    Ok(())
}

/// Plan (and optionally apply) removing an installed package
pub fn cmd_uninstall(
    session: &mut Session,
    package: &str,
    version: Option<&str>,
    remove_dependencies: bool,
    force: bool,
    apply: bool,
) -> Result<()> {
    let version = parse_version(version)?;
    let options = &mut session.manager.config_mut().uninstall;
    options.remove_dependencies |= remove_dependencies;
    options.force |= force;

    let operations = if apply {
        session.manager.uninstall(package, version.as_ref())?
    } else {
        session.manager.plan_uninstall(package, version.as_ref())?
    };
    print_plan(&operations, session.json)?;

    if apply && !operations.is_empty() {
        session.save()?;
    }
    Ok(())
}

/// Plan (and optionally apply) updating an installed package
pub fn cmd_update(
    session: &mut Session,
    package: &str,
    version: Option<&str>,
    force: bool,
    apply: bool,
) -> Result<()> {
    let spec = parse_spec(version)?;
    session.manager.config_mut().update.force |= force;

    let operations = if apply {
        session.manager.update(package, spec.as_ref())?
    } else {
        session.manager.plan_update(package, spec.as_ref())?
    };
    print_plan(&operations, session.json)?;

    if apply && !operations.is_empty() {
        session.save()?;
    }
    Ok(())
}

/// Show a source package and its transitive dependencies
pub fn cmd_closure(session: &Session, package: &str, version: Option<&str>) -> Result<()> {
    let spec = parse_spec(version)?;
    let closure = session.manager.dependencies(package, spec.as_ref())?;
    print_packages(&closure, session.json, "")
}

/// Show installed packages that depend on an installed package
pub fn cmd_dependents(session: &Session, package: &str, version: Option<&str>) -> Result<()> {
    let version = parse_version(version)?;
    let dependents = session.manager.dependents(package, version.as_ref())?;
    print_packages(
        &dependents,
        session.json,
        &format!("No installed packages depend on '{}'", package),
    )
}
