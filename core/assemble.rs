use crate::content_type::{CommentStyle, ContentType};
use crate::error::Result;
use crate::json::to_pretty_json;
use crate::project::Project;
use crate::resolve::ResolvedFile;
use chrono::NaiveDateTime;
use std::fs;
use std::io;
use std::path::{Component, Path};

pub const HEADER_OPEN: &str = "/*// onescript //";
pub const HEADER_CLOSE: &str = "//*/";
pub const DATE_PREFIX: &str = "@date ";
pub const FILES_PREFIX: &str = "@files ";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column width of the per-file separator comments.
pub const HEADER_WIDTH: usize = 75;

/// Concatenates `files` in the given order into one buffer.
///
/// Each file's contents are trimmed and followed by one blank line. The
/// manifest header and per-file separators are added according to the
/// project's toggles and content type. A file that vanished or cannot be read
/// since resolution is replaced by an error marker comment; the rest of the
/// build is unaffected.
pub fn assemble(files: &[ResolvedFile], project: &Project, timestamp: NaiveDateTime) -> Result<String> {
    let root = project.input_root();
    let content_type = project.resolved_content_type();
    let mut buffer = String::new();

    if project.add_script_header {
        buffer.push_str(&script_header(files, &root, timestamp)?);
    }

    for file in files {
        append_file(&mut buffer, file, &root, &content_type, project.add_file_header);
    }

    log::debug!(
        "Assembled {} file(s) into {} bytes.",
        files.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn append_file(
    buffer: &mut String,
    file: &ResolvedFile,
    root: &Path,
    content_type: &ContentType,
    add_file_header: bool,
) {
    let relative = relative_path(&file.path, root);

    let bytes = match fs::read(&file.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let problem = if e.kind() == io::ErrorKind::NotFound {
                "File Missing"
            } else {
                "Cannot Read File"
            };
            log::warn!("{} while assembling '{}': {}", problem, relative, e);
            buffer.push_str(&error_marker(
                &format!("{problem} - {relative}"),
                content_type.comment_style(),
            ));
            return;
        }
    };

    if add_file_header {
        match file_header(&relative, content_type) {
            Some(header) => buffer.push_str(&header),
            None => log::trace!("No file header syntax for content type '{}'.", content_type),
        }
    }

    buffer.push_str(String::from_utf8_lossy(&bytes).trim());
    buffer.push_str("\n\n");
}

fn script_header(files: &[ResolvedFile], root: &Path, timestamp: NaiveDateTime) -> Result<String> {
    let listing: Vec<String> = files.iter().map(|f| relative_path(&f.path, root)).collect();
    Ok(format!(
        "{HEADER_OPEN}\n{DATE_PREFIX}{}\n{FILES_PREFIX}{}\n{HEADER_CLOSE}\n\n",
        timestamp.format(TIMESTAMP_FORMAT),
        to_pretty_json(&listing)?
    ))
}

/// The separator written above a file, or `None` when the content type has
/// no known comment syntax.
pub fn file_header(relative: &str, content_type: &ContentType) -> Option<String> {
    let label = format!("// {relative} ");
    match content_type {
        ContentType::JavaScript => Some(format!(
            "{}\n{}{}\n\n",
            "/".repeat(HEADER_WIDTH),
            label,
            "/".repeat(HEADER_WIDTH.saturating_sub(label.len()))
        )),
        ContentType::Css => Some(format!(
            "/*{}\n{}{}*/\n\n",
            "/".repeat(HEADER_WIDTH - 2),
            label,
            "/".repeat(HEADER_WIDTH.saturating_sub(label.len() + 2))
        )),
        ContentType::Other(_) => None,
    }
}

pub fn error_marker(message: &str, style: CommentStyle) -> String {
    match style {
        CommentStyle::Line => format!("// ERROR: {message}\n\n"),
        CommentStyle::Block => format!("/* ERROR: {message} */\n\n"),
    }
}

/// `path` relative to `root`, `/`-separated, with no leading or trailing
/// separator.
pub fn relative_path(path: &Path, root: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
