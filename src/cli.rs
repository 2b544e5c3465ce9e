// src/cli.rs
//! CLI definitions for pkgplan
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pkgplan")]
#[command(author = "pkgplan Contributors")]
#[command(version)]
#[command(about = "Plan package installs, removals and updates from repository manifests", long_about = None)]
pub struct Cli {
    /// Manifest of installed packages
    #[arg(short, long, global = true, default_value = "installed.toml")]
    pub local: PathBuf,

    /// Manifest of available packages (repeat to search several, in order)
    #[arg(short, long = "source", global = true)]
    pub sources: Vec<PathBuf>,

    /// Planner configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan installing a package and its dependencies
    Install {
        /// Package id
        package: String,

        /// Version range, e.g. "[1.0,2.0)"
        #[arg(short, long)]
        version: Option<String>,

        /// Install only the requested package
        #[arg(long)]
        ignore_dependencies: bool,

        /// Write the result back to the local manifest
        #[arg(long)]
        apply: bool,
    },

    /// Plan removing an installed package
    Uninstall {
        /// Package id
        package: String,

        /// Exact installed version (default: latest installed)
        #[arg(short, long)]
        version: Option<String>,

        /// Also remove dependencies nothing else needs
        #[arg(short, long)]
        remove_dependencies: bool,

        /// Remove even if other packages depend on it
        #[arg(short, long)]
        force: bool,

        /// Write the result back to the local manifest
        #[arg(long)]
        apply: bool,
    },

    /// Plan updating an installed package to a newer source version
    Update {
        /// Package id
        package: String,

        /// Version range the update must fall in
        #[arg(short, long)]
        version: Option<String>,

        /// Update even if installed dependents reject the new version
        #[arg(short, long)]
        force: bool,

        /// Write the result back to the local manifest
        #[arg(long)]
        apply: bool,
    },

    /// List a source package and everything it depends on
    Closure {
        /// Package id
        package: String,

        /// Version range
        #[arg(short, long)]
        version: Option<String>,
    },

    /// List installed packages that depend on an installed package
    Dependents {
        /// Package id
        package: String,

        /// Exact installed version (default: latest installed)
        #[arg(short, long)]
        version: Option<String>,
    },
}
