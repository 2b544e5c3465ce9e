// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::Session;

fn main() -> Result<()> {
    // Plans go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut session = Session::open(&cli.local, &cli.sources, cli.config.as_deref(), cli.json)?;

    match cli.command {
        Commands::Install {
            package,
            version,
            ignore_dependencies,
            apply,
        } => commands::cmd_install(
            &mut session,
            &package,
            version.as_deref(),
            ignore_dependencies,
            apply,
        ),
        Commands::Uninstall {
            package,
            version,
            remove_dependencies,
            force,
            apply,
        } => commands::cmd_uninstall(
            &mut session,
            &package,
            version.as_deref(),
            remove_dependencies,
            force,
            apply,
        ),
        Commands::Update {
            package,
            version,
            force,
            apply,
        } => commands::cmd_update(&mut session, &package, version.as_deref(), force, apply),
        Commands::Closure { package, version } => {
            commands::cmd_closure(&session, &package, version.as_deref())
        }
        Commands::Dependents { package, version } => {
            commands::cmd_dependents(&session, &package, version.as_deref())
        }
    }
}
