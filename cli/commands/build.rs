use crate::cli_args::BuildArgs;
use crate::load_project;
use crate::output;
use anyhow::{Context, Result};
use onescript_core::{BuildReport, Builder, Project};

pub fn handle_build_command(args: BuildArgs, quiet: bool) -> Result<()> {
    let mut project = load_project(&args.project)?;
    if args.print {
        project.print = true;
    }
    run_build(&mut project, args.force_write, quiet)?;
    Ok(())
}

/// One pass of the pipeline plus its user-facing output. Shared with watch
/// mode.
pub fn run_build(project: &mut Project, force_write: bool, quiet: bool) -> Result<BuildReport> {
    let report = Builder::new()
        .force_write(force_write)
        .build(project)
        .context("Build failed")?;

    if project.print {
        output::print_served(&project.full_content_type(), &report.source)?;
    } else if !quiet {
        output::print_build_status(&report, &project.input_root());
    }

    log::info!(
        "Build finished: {} file(s), updated: {}",
        report.files.len(),
        report.updated
    );
    Ok(report)
}
