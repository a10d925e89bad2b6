use crate::cli_args::FilesArgs;
use crate::load_project;
use crate::output::{FileListing, print_files_table, print_json};
use anyhow::{Context, Result};
use onescript_core::{relative_path, resolve};
use std::fs;

pub fn handle_files_command(args: FilesArgs) -> Result<()> {
    let project = load_project(&args.project)?;
    let root = project.input_root();

    log::debug!("Resolving files for listing...");
    let files = resolve(&project).context("Failed to resolve project files")?;

    let listing: Vec<FileListing> = files
        .iter()
        .map(|file| FileListing {
            path: relative_path(&file.path, &root),
            role: file.role,
            bytes: fs::metadata(&file.path).map(|m| m.len()).unwrap_or(0),
        })
        .collect();

    if args.json {
        print_json(&listing)
    } else {
        print_files_table(&listing);
        Ok(())
    }
}
