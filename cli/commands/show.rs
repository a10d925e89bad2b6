use crate::cli_args::ShowArgs;
use crate::load_project;
use anyhow::Result;
use colored::*;

pub fn handle_show_command(args: ShowArgs) -> Result<()> {
    let project = load_project(&args.project)?;

    let descriptor = project
        .project_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let artifact = project
        .output_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(disabled)".to_string());

    println!("{:<14} {}", "Descriptor:".green(), descriptor.cyan());
    println!(
        "{:<14} {}",
        "Sources:".green(),
        project.src_dir().display().to_string().cyan()
    );
    println!("{:<14} {}", "Artifact:".green(), artifact.cyan());
    println!(
        "{:<14} {}",
        "Content type:".green(),
        project.full_content_type().cyan()
    );
    println!();
    print!("{project}");
    Ok(())
}
