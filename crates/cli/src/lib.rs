use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use symwiz_core::Platform;

use crate::{
    answers::WizardArgs,
    commands::{ConfigArgs, StatusArgs, handle_config, handle_status, handle_wizard},
    options::FormatOptions,
};
mod answers;
pub mod commands;
mod logging;
mod platforms;
pub mod options;
pub mod prompter;
pub mod wizard;

pub use logging::{LOG_ENV, init_logging};
pub use prompter::UserCancelled;

#[derive(Parser, Debug)]
#[command(
    name = "symwiz",
    author,
    version,
    about = "Set up mobile projects to upload debug symbols to Sentry",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// Remove the setup instead of adding it
    #[arg(long, default_value = "false")]
    uninstall: bool,

    /// Platform to configure; repeat for several (default: ask, or all with --yes)
    #[arg(short, long = "platform")]
    platforms: Vec<Platform>,

    #[arg(long)]
    url: Option<String>,

    #[arg(long)]
    org: Option<String>,

    #[arg(long)]
    project: Option<String>,

    #[arg(long)]
    auth_token: Option<String>,

    /// Never prompt; use flags and defaults
    #[arg(short, long, default_value = "false")]
    yes: bool,

    #[arg(long, default_value = "stdout")]
    format: FormatOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Status(StatusArgs),
    Config(ConfigArgs),
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Failed to get the current directory"),
    }
}

pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);
    init_logging(cli.verbose);
    let root = resolve_root(cli.root)?;
    if let Some(command) = cli.command {
        match command {
            Commands::Status(args) => handle_status(&args, &root).await?,
            Commands::Config(args) => handle_config(&args, &root).await?,
        }
    } else {
        handle_wizard(
            &WizardArgs {
                uninstall: cli.uninstall,
                platforms: cli.platforms,
                url: cli.url,
                org: cli.org,
                project: cli.project,
                auth_token: cli.auth_token,
                yes: cli.yes,
                format: cli.format,
            },
            &root,
        )
        .await?;
    }
    Ok(())
}
