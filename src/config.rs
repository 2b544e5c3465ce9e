// src/config.rs

//! Planner configuration
//!
//! Defaults for the planners can be kept in a TOML file:
//!
//! ```toml
//! [install]
//! ignore_dependencies = false
//!
//! [uninstall]
//! remove_dependencies = true
//! force = false
//! throw_on_conflicts = false
//!
//! [update]
//! force = false
//! ```
//!
//! Every table and field is optional.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for install planning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallOptions {
    /// Install only the requested package
    pub ignore_dependencies: bool,
}

/// Options for uninstall planning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UninstallOptions {
    /// Also remove dependencies nothing else needs
    pub remove_dependencies: bool,
    /// Remove even when installed packages depend on it
    pub force: bool,
    /// Fail instead of skipping a dependency that is still in use
    pub throw_on_conflicts: bool,
}

/// Options for update planning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateOptions {
    /// Update even when a dependent's range rejects the new version
    pub force: bool,
    /// Do not pull in new dependencies of the updated package
    pub ignore_dependencies: bool,
}

/// Planner defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    pub install: InstallOptions,
    pub uninstall: UninstallOptions,
    pub update: UpdateOptions,
}

impl PlannerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
