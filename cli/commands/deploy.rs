use crate::cli_args::CopyArgs;
use crate::load_project;
use anyhow::{Context, Result};
use colored::*;

pub fn handle_copy_command(args: CopyArgs, quiet: bool) -> Result<()> {
    let project = load_project(&args.project)?;
    let copied = project.copy(&args.dest).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            project.output_root().display(),
            args.dest.display()
        )
    })?;
    report(copied, &args, quiet);
    Ok(())
}

pub fn handle_deploy_command(args: CopyArgs, quiet: bool) -> Result<()> {
    let project = load_project(&args.project)?;
    let copied = project.deploy(&args.dest).with_context(|| {
        format!(
            "Failed to deploy {} to {}",
            project.dist_path().display(),
            args.dest.display()
        )
    })?;
    report(copied, &args, quiet);
    Ok(())
}

fn report(copied: usize, args: &CopyArgs, quiet: bool) {
    if !quiet {
        println!(
            "{} Copied {} file(s) to: {}",
            "✅".green(),
            copied.to_string().cyan(),
            args.dest.display().to_string().blue()
        );
    }
}
