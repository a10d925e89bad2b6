mod cli_args;
mod commands;
mod output;
mod watch;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

use cli_args::{Cli, Commands, ProjectOpts};
use onescript_core::{AppError, DEFAULT_PROJECT_FILENAME, Project};

/// Environment variable naming the descriptor when `--project` is absent.
pub const PROJECT_ENV_VAR: &str = "ONESCRIPT_PROJECT";

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;
    let verbose = cli_args.verbose;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet, verbose) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);

            if !quiet {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            } else {
                log::error!("Application failed: {:#}", e);
            }

            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool, verbose: u8) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init(args) => {
            log::debug!("Executing 'init' command...");
            commands::init::handle_init_command(args, quiet)
        }
        Commands::Bootstrap(args) => {
            log::debug!("Executing 'bootstrap' command...");
            commands::init::handle_bootstrap_command(args, quiet)
        }
        Commands::Build(args) => {
            log::debug!("Executing 'build' command...");
            commands::build::handle_build_command(args, quiet)
        }
        Commands::Watch(args) => {
            log::debug!("Executing 'watch' command...");
            watch::run_watch_mode(args, quiet, verbose)
        }
        Commands::Files(args) => {
            log::debug!("Executing 'files' command...");
            commands::files::handle_files_command(args)
        }
        Commands::Show(args) => {
            log::debug!("Executing 'show' command...");
            commands::show::handle_show_command(args)
        }
        Commands::Copy(args) => {
            log::debug!("Executing 'copy' command...");
            commands::deploy::handle_copy_command(args, quiet)
        }
        Commands::Deploy(args) => {
            log::debug!("Executing 'deploy' command...");
            commands::deploy::handle_deploy_command(args, quiet)
        }
        Commands::Completion(args) => {
            log::debug!("Executing 'completion' command...");
            commands::completion::handle_completion_command(&args, quiet)
        }
    }
}

/// Where the descriptor lives: `--project`, then `$ONESCRIPT_PROJECT`, then
/// `./onescript.json`. A directory, or a path that does not exist and has no
/// extension, means `onescript.json` inside it. `~` is expanded.
pub fn resolve_project_file(cli_project: Option<&PathBuf>) -> Result<PathBuf> {
    let path_str_opt = cli_project
        .map(|p| p.to_string_lossy().to_string())
        .or_else(|| env::var(PROJECT_ENV_VAR).ok().filter(|s| !s.is_empty()));

    let path = match path_str_opt {
        Some(p_str) => PathBuf::from(shellexpand::tilde(&p_str).as_ref()),
        None => PathBuf::from(DEFAULT_PROJECT_FILENAME),
    };

    let path = if path.is_dir() || (!path.exists() && path.extension().is_none()) {
        path.join(DEFAULT_PROJECT_FILENAME)
    } else {
        path
    };

    let absolute = std::path::absolute(&path)
        .with_context(|| format!("Failed to resolve project path '{}'", path.display()))?;
    log::debug!("Using project descriptor: {}", absolute.display());
    Ok(absolute)
}

pub fn load_project(opts: &ProjectOpts) -> Result<Project> {
    let file = resolve_project_file(opts.project.as_ref())?;
    load_project_from(&file)
}

pub fn load_project_from(file: &Path) -> Result<Project> {
    Project::from_file(file)
        .with_context(|| format!("Failed to load project from {}", file.display()))
}
