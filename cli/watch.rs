use crate::cli_args::WatchArgs;
use crate::commands::build::run_build;
use crate::{load_project_from, resolve_project_file};
use anyhow::{Context, Result};
use colored::*;
use notify::{ErrorKind, RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{Debouncer, new_debouncer};
use onescript_core::{DEFAULT_WATCH_DELAY, Project, parse_watch_delay};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

fn watch_path(
    debouncer: &mut Debouncer<RecommendedWatcher>,
    path: &Path,
    mode: RecursiveMode,
    watched_paths: &mut HashSet<PathBuf>,
    quiet: bool,
) {
    if watched_paths.contains(path) {
        log::trace!("Already watching: {}", path.display());
        return;
    }
    if !path.exists() {
        log::trace!("Skipping watch for non-existent path: {}", path.display());
        return;
    }

    match debouncer.watcher().watch(path, mode) {
        Ok(_) => {
            log::debug!("Watching: {}", path.display());
            watched_paths.insert(path.to_path_buf());
        }
        Err(e) => {
            if !quiet {
                eprintln!("{} Failed to watch {}: {}", "⚠️".yellow(), path.display(), e);
            }
            log::warn!("Failed to watch {}: {}", path.display(), e);
        }
    }
}

fn setup_watches(
    project: &Project,
    debouncer: &mut Debouncer<RecommendedWatcher>,
    watched_paths: &mut HashSet<PathBuf>,
    quiet: bool,
    verbose: u8,
) {
    log::debug!("Clearing {} previous watches.", watched_paths.len());
    for path in watched_paths.drain() {
        match debouncer.watcher().unwatch(&path) {
            Ok(_) => log::trace!("Unwatched: {}", path.display()),
            Err(e) if matches!(e.kind, ErrorKind::WatchNotFound) => {
                log::trace!("Watch not found for {}, dropping it.", path.display());
            }
            Err(e) => log::warn!("Failed to unwatch {}: {}", path.display(), e),
        }
    }

    for target in project.watch_targets() {
        let mode = if target.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watch_path(debouncer, &target, mode, watched_paths, quiet);
    }

    if watched_paths.is_empty() {
        if !quiet {
            println!(
                "{}",
                "⚠️ Nothing to watch: neither the source tree nor the descriptor exists.".yellow()
            );
        }
    } else if !quiet && verbose > 0 {
        println!("🔍 Watching {} path(s)...", watched_paths.len());
    }
}

fn rebuild(project: &mut Project, clear: bool, quiet: bool, verbose: u8) {
    if clear {
        if let Err(e) = clearscreen::clear() {
            log::warn!("Failed to clear screen: {}", e);
        }
    }
    match run_build(project, false, quiet) {
        Ok(_) => {
            if !quiet && verbose > 0 {
                println!("{}\n", "✅ Build pass complete.".green());
            }
        }
        Err(e) => {
            if !quiet {
                eprintln!("{} {:#}\n", "⚠️ Build failed:".yellow(), e);
            }
            log::error!("Build failed in watch mode: {:#}", e);
        }
    }
}

pub fn run_watch_mode(watch_args: WatchArgs, quiet: bool, verbose: u8) -> Result<()> {
    let project_file = resolve_project_file(watch_args.project.project.as_ref())?;
    let mut project = load_project_from(&project_file)
        .context("Failed to load project for watch mode")?;

    let delay = parse_watch_delay(watch_args.delay.as_deref().unwrap_or(DEFAULT_WATCH_DELAY))?;

    if !quiet {
        println!(
            "👀 Watching '{}' (delay {:?}). Press Ctrl+C to exit.",
            project.input_root().display(),
            delay
        );
    }

    // Watch mode never serves to stdout.
    project.print = false;
    rebuild(&mut project, false, quiet, verbose);

    let (tx, rx) = mpsc::channel();
    let mut debouncer =
        new_debouncer(delay, tx).map_err(|e| anyhow::anyhow!("Failed to create debouncer: {}", e))?;
    let mut watched_paths = HashSet::new();
    setup_watches(&project, &mut debouncer, &mut watched_paths, quiet, verbose);

    loop {
        let events = match rx.recv() {
            Ok(Ok(events)) => events,
            Ok(Err(error)) => {
                if !quiet {
                    eprintln!("{} {:?}\n", "⚠️ Watch error:".yellow(), error);
                }
                log::error!("Notify error received: {:?}", error);
                continue;
            }
            Err(e) => {
                eprintln!("{} {:#}\n", "⛔ Watcher channel error:".red(), e);
                break Ok(());
            }
        };

        for event in &events {
            log::trace!("Debounced event: {:?}", event);
        }

        let relevant: Vec<&Path> = events
            .iter()
            .map(|event| event.path.as_path())
            .filter(|path| project.affects_build(path))
            .collect();
        if relevant.is_empty() {
            log::trace!("Ignoring {} event(s) outside the sources.", events.len());
            continue;
        }

        if !quiet && verbose > 0 {
            eprintln!("\n{} {} change(s) detected.", "🔄".blue(), relevant.len());
        }

        if relevant.iter().any(|path| project.is_descriptor_path(path)) {
            log::info!("Descriptor changed, reloading {}", project_file.display());
            match load_project_from(&project_file) {
                Ok(mut reloaded) => {
                    reloaded.print = false;
                    project = reloaded;
                    if !quiet && verbose > 0 {
                        eprintln!("{}", "✅ Descriptor reloaded.".green());
                    }
                    setup_watches(&project, &mut debouncer, &mut watched_paths, quiet, verbose);
                }
                Err(e) => {
                    if !quiet {
                        eprintln!("{} {:#}\n", "⚠️ Error reloading descriptor:".yellow(), e);
                    }
                    continue;
                }
            }
        }

        rebuild(&mut project, watch_args.clear, quiet, verbose);
    }
}
