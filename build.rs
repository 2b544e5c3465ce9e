// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: package id
fn package_arg() -> Arg {
    Arg::new("package").required(true).help("Package id")
}

/// Common argument: write the result back to the local manifest
fn apply_arg() -> Arg {
    Arg::new("apply")
        .long("apply")
        .action(ArgAction::SetTrue)
        .help("Write the result back to the local manifest")
}

fn force_arg(help: &'static str) -> Arg {
    Arg::new("force")
        .short('f')
        .long("force")
        .action(ArgAction::SetTrue)
        .help(help)
}

fn build_cli() -> Command {
    Command::new("pkgplan")
        .version(env!("CARGO_PKG_VERSION"))
        .author("pkgplan Contributors")
        .about("Plan package installs, removals and updates from repository manifests")
        .arg(
            Arg::new("local")
                .short('l')
                .long("local")
                .global(true)
                .default_value("installed.toml")
                .help("Manifest of installed packages"),
        )
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .global(true)
                .action(ArgAction::Append)
                .help("Manifest of available packages (repeat to search several, in order)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Planner configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print results as JSON"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("install")
                .about("Plan installing a package and its dependencies")
                .arg(package_arg())
                .arg(Arg::new("version").short('v').long("version").help("Version range, e.g. \"[1.0,2.0)\""))
                .arg(
                    Arg::new("ignore_dependencies")
                        .long("ignore-dependencies")
                        .action(ArgAction::SetTrue)
                        .help("Install only the requested package"),
                )
                .arg(apply_arg()),
        )
        .subcommand(
            Command::new("uninstall")
                .about("Plan removing an installed package")
                .arg(package_arg())
                .arg(Arg::new("version").short('v').long("version").help("Exact installed version"))
                .arg(
                    Arg::new("remove_dependencies")
                        .short('r')
                        .long("remove-dependencies")
                        .action(ArgAction::SetTrue)
                        .help("Also remove dependencies nothing else needs"),
                )
                .arg(force_arg("Remove even if other packages depend on it"))
                .arg(apply_arg()),
        )
        .subcommand(
            Command::new("update")
                .about("Plan updating an installed package to a newer source version")
                .arg(package_arg())
                .arg(Arg::new("version").short('v').long("version").help("Version range the update must fall in"))
                .arg(force_arg("Update even if installed dependents reject the new version"))
                .arg(apply_arg()),
        )
        .subcommand(
            Command::new("closure")
                .about("List a source package and everything it depends on")
                .arg(package_arg())
                .arg(Arg::new("version").short('v').long("version").help("Version range")),
        )
        .subcommand(
            Command::new("dependents")
                .about("List installed packages that depend on an installed package")
                .arg(package_arg())
                .arg(Arg::new("version").short('v').long("version").help("Exact installed version")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("pkgplan.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
