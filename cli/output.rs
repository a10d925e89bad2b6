use anyhow::{Context, Result};
use byte_unit::{Byte, UnitType};
use colored::*;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use onescript_core::{BuildReport, FileRole, relative_path};

#[derive(Debug, Serialize)]
pub struct FileListing {
    pub path: String,
    pub role: FileRole,
    pub bytes: u64,
}

/// Emits the artifact the way a live file is served: a `Content-type`
/// header, a blank line, then the body.
pub fn print_served(content_type: &str, source: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "Content-type: {}\n\n", content_type).context("Failed to write to stdout")?;
    handle
        .write_all(source.as_bytes())
        .context("Failed to write to stdout")?;
    if !source.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

pub fn print_build_status(report: &BuildReport, project_root: &Path) {
    let included = format!("{} file(s)", report.files.len());
    match &report.output_path {
        Some(path) => {
            let shown = relative_path(path, project_root);
            if report.updated {
                println!(
                    "{} Built {} from {}",
                    "✅".green(),
                    shown.blue(),
                    included.cyan()
                );
            } else {
                println!(
                    "{} {} unchanged ({}), not written.",
                    "💤".dimmed(),
                    shown.blue(),
                    included.cyan()
                );
            }
        }
        None => println!(
            "{} Assembled {} (no output file configured).",
            "ℹ️".blue(),
            included.cyan()
        ),
    }

    if let Some(min_path) = &report.min_output_path {
        let state = if report.min_updated {
            "written"
        } else {
            "unchanged"
        };
        println!(
            "   {} {}",
            relative_path(min_path, project_root).blue(),
            state.dimmed()
        );
    }
}

pub fn print_files_table(listing: &[FileListing]) {
    if listing.is_empty() {
        println!("{}", "(No files would be included in the build)".yellow());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::Green),
        Cell::new("Role").fg(Color::Green),
        Cell::new("Path").fg(Color::Green),
        Cell::new("Size").fg(Color::Green),
    ]);

    let mut total: u128 = 0;
    for (index, file) in listing.iter().enumerate() {
        total = total.saturating_add(file.bytes as u128);
        let role = match file.role {
            FileRole::Main => "main",
            FileRole::Module => "module",
        };
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(role),
            Cell::new(&file.path).fg(Color::Cyan),
            Cell::new(readable_size(file.bytes as u128))
                .set_alignment(CellAlignment::Right)
                .fg(Color::DarkGrey),
        ]);
    }
    println!("{table}");
    println!(
        "{:<12} {}",
        "Total Size:".green(),
        readable_size(total).cyan()
    );
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data).context("Failed to serialize output")?;
    println!("{content}");
    Ok(())
}

fn readable_size(bytes: u128) -> String {
    Byte::from_u128(bytes)
        .unwrap_or_default()
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}
