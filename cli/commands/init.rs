use crate::cli_args::{BootstrapArgs, InitArgs};
use crate::{load_project, resolve_project_file};
use anyhow::{Context, Result};
use colored::*;
use onescript_core::{AppError, Project, make_directory};
use serde_json::{Map, Value, json};

pub fn handle_init_command(args: InitArgs, quiet: bool) -> Result<()> {
    let project_file = resolve_project_file(args.project.project.as_ref())?;

    if project_file.exists() && !args.force {
        anyhow::bail!(AppError::InvalidArgument(format!(
            "Project file already exists at {} (use --force to overwrite).",
            project_file.display()
        )));
    }

    if let Some(dir) = project_file.parent() {
        if !make_directory(dir) {
            anyhow::bail!(AppError::unwritable(dir, "unable to create project directory"));
        }
    }

    let mut project = Project::from_overrides(overrides_from_args(&args))
        .context("Invalid project options")?;
    project.set_project_file(&project_file);
    project.save().context("Failed to save project descriptor")?;
    project
        .bootstrap()
        .context("Failed to create project skeleton")?;

    if !quiet {
        println!(
            "{} Project created: {}",
            "✅".green(),
            project_file.display().to_string().blue()
        );
        println!(
            "   Sources go in {}, builds land in {}",
            project.src_dir().display().to_string().cyan(),
            project.dist_path().display().to_string().cyan()
        );
    }
    Ok(())
}

pub fn handle_bootstrap_command(args: BootstrapArgs, quiet: bool) -> Result<()> {
    let project = load_project(&args.project)?;
    project
        .bootstrap()
        .context("Failed to create project skeleton")?;
    if !quiet {
        println!(
            "{} Source tree ready in: {}",
            "✅".green(),
            project.src_dir().display().to_string().blue()
        );
    }
    Ok(())
}

/// Descriptor keys set on the command line, in the shape a descriptor file
/// would carry them.
fn overrides_from_args(args: &InitArgs) -> Map<String, Value> {
    let mut overrides = Map::new();

    if !args.files.is_empty() {
        overrides.insert("Files".to_string(), json!(args.files));
    }
    if !args.directories.is_empty() {
        overrides.insert("Directories".to_string(), json!(args.directories));
    }
    if !args.extensions.is_empty() {
        let extensions: Vec<&str> = args
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();
        overrides.insert("Extensions".to_string(), json!(extensions));
    }
    if let Some(output) = &args.output {
        overrides.insert("OutputFile".to_string(), json!(output));
    }
    if let Some(output_min) = &args.output_min {
        overrides.insert("OutputMinFile".to_string(), json!(output_min));
    }
    if let Some(content_type) = &args.content_type {
        overrides.insert("ContentType".to_string(), json!(content_type));
    }
    if let Some(dist) = &args.dist {
        overrides.insert("DistDir".to_string(), json!(dist));
    }
    if args.no_script_header {
        overrides.insert("AddScriptHeader".to_string(), json!(false));
    }
    if args.no_file_header {
        overrides.insert("AddFileHeader".to_string(), json!(false));
    }

    log::trace!("Descriptor overrides from CLI: {:?}", overrides);
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_options_become_overrides() {
        let args = InitArgs {
            files: vec!["core.js".to_string()],
            extensions: vec![".mjs".to_string()],
            no_file_header: true,
            ..InitArgs::default()
        };
        let overrides = overrides_from_args(&args);
        assert_eq!(overrides.len(), 3);
        assert_eq!(overrides["Files"], json!(["core.js"]));
        assert_eq!(overrides["Extensions"], json!(["mjs"]));
        assert_eq!(overrides["AddFileHeader"], json!(false));
    }
}
