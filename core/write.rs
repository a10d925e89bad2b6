use crate::change::has_changed;
use crate::error::{AppError, Result};
use std::fs::{self, DirBuilder, OpenOptions};
use std::path::{Path, PathBuf};

/// Creates `dir` and any missing parents. Every directory created here ends
/// up world-writable (0777) whatever the process umask is; the umask itself
/// is left alone. Safe to call on an existing directory. Returns whether
/// `dir` is a directory afterward.
pub fn make_directory(dir: &Path) -> bool {
    if dir.is_dir() {
        return true;
    }

    let missing: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
        .map(Path::to_path_buf)
        .collect();

    if let Err(e) = DirBuilder::new().recursive(true).create(dir) {
        log::debug!("Failed to create directory '{}': {}", dir.display(), e);
    }

    for created in missing.iter().filter(|path| path.is_dir()) {
        open_permissions(created);
    }
    dir.is_dir()
}

#[cfg(unix)]
fn open_permissions(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(dir, fs::Permissions::from_mode(0o777)) {
        log::warn!("Unable to open permissions on '{}': {}", dir.display(), e);
    }
}

#[cfg(not(unix))]
fn open_permissions(_dir: &Path) {}

/// Writes `content` to `target` unless it only differs from what is already
/// there by the build timestamp. Returns whether a write happened.
pub fn write_if_changed(target: &Path, content: &str) -> Result<bool> {
    if !has_changed(target, content) {
        log::info!("Not writing '{}': output unchanged.", target.display());
        return Ok(false);
    }
    write_file(target, content)?;
    Ok(true)
}

/// Writes `content` to `target` unconditionally, creating the parent
/// directory when needed.
pub fn write_file(target: &Path, content: &str) -> Result<()> {
    if target.exists() {
        if let Err(e) = OpenOptions::new().write(true).open(target) {
            return Err(AppError::unwritable(
                target,
                format!("unable to write to output file: {e}"),
            ));
        }
    } else {
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !make_directory(parent) {
            return Err(AppError::unwritable(
                parent,
                "unable to create directory for output file",
            ));
        }
    }

    fs::write(target, content).map_err(|e| AppError::unwritable(target, e))?;
    log::info!("Wrote {} bytes to '{}'.", content.len(), target.display());
    Ok(())
}
