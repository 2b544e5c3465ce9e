// src/resolver/plan.rs

//! Planned package operations
//!
//! Contains the result types produced by the operation planners.

use crate::error::Result;
use crate::package::{Package, PackageIdentity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What to do with a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageAction {
    Install,
    Uninstall,
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageAction::Install => f.write_str("Install"),
            PackageAction::Uninstall => f.write_str("Uninstall"),
        }
    }
}

/// A single step of a plan. Order within a plan is significant.
#[derive(Debug, Clone)]
pub struct PackageOperation {
    pub package: Arc<Package>,
    pub action: PackageAction,
}

impl PackageOperation {
    pub fn install(package: Arc<Package>) -> Self {
        Self {
            package,
            action: PackageAction::Install,
        }
    }

    pub fn uninstall(package: Arc<Package>) -> Self {
        Self {
            package,
            action: PackageAction::Uninstall,
        }
    }

    pub fn identity(&self) -> &PackageIdentity {
        self.package.identity()
    }

    pub fn to_record(&self) -> OperationRecord {
        OperationRecord {
            action: self.action,
            id: self.package.id().to_string(),
            version: self.package.version().to_string(),
        }
    }
}

impl PartialEq for PackageOperation {
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action && self.identity() == other.identity()
    }
}

impl Eq for PackageOperation {}

/// Displays as `Install A 1.0`.
impl fmt::Display for PackageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.package)
    }
}

/// Serializable form of an operation for machine-readable output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub action: PackageAction,
    pub id: String,
    pub version: String,
}

/// Summary of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub total_operations: usize,
    pub installs: usize,
    pub uninstalls: usize,
}

impl PlanSummary {
    pub fn from_operations(operations: &[PackageOperation]) -> Self {
        let installs = operations
            .iter()
            .filter(|op| op.action == PackageAction::Install)
            .count();
        Self {
            total_operations: operations.len(),
            installs,
            uninstalls: operations.len() - installs,
        }
    }
}

/// Turns a root package into an ordered list of operations
///
/// Implemented by the install, uninstall and update planners. A failed
/// resolve returns no partial plan.
pub trait PackageOperationResolver {
    fn resolve_operations(&self, package: &Arc<Package>) -> Result<Vec<PackageOperation>>;
}
