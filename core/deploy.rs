use crate::error::{AppError, Result};
use crate::finder::FileFinder;
use crate::project::Project;
use crate::write::make_directory;
use std::fs;
use std::path::Path;

/// Version-control metadata directories never copied.
pub const SKIPPED_DIRS: &[&str] = &[".git", ".svn", ".hg"];

/// Recursively copies the contents of `source` into `dest`, creating
/// directories as needed. Returns the number of files copied.
pub fn copy_dir(source: &Path, dest: &Path) -> Result<usize> {
    if !source.is_dir() {
        return Err(AppError::unreadable(source, "source directory not found"));
    }
    let source_abs = std::path::absolute(source)?;
    let dest_abs = std::path::absolute(dest)?;
    if dest_abs.starts_with(&source_abs) {
        return Err(AppError::InvalidArgument(format!(
            "cannot copy '{}' into itself ('{}')",
            source.display(),
            dest.display()
        )));
    }

    if !make_directory(dest) {
        return Err(AppError::unwritable(dest, "unable to create destination directory"));
    }

    let mut copied = 0;
    copy_tree(source, dest, &mut copied)?;
    log::info!(
        "Copied {} file(s) from '{}' to '{}'.",
        copied,
        source.display(),
        dest.display()
    );
    Ok(copied)
}

fn copy_tree(source: &Path, dest: &Path, copied: &mut usize) -> Result<()> {
    for entry in FileFinder::new(source, &[]) {
        let path = entry.path();
        let target = dest.join(entry.file_name());

        if path.is_dir() {
            let skipped = entry
                .file_name()
                .to_str()
                .is_some_and(|name| SKIPPED_DIRS.contains(&name));
            if skipped {
                log::trace!("Skipping VCS directory: {}", path.display());
                continue;
            }
            if !make_directory(&target) {
                return Err(AppError::unwritable(
                    &target,
                    "unable to create directory in destination",
                ));
            }
            copy_tree(path, &target, copied)?;
        } else if path.is_file() {
            fs::copy(path, &target).map_err(|e| AppError::unwritable(&target, e))?;
            *copied += 1;
        }
    }
    Ok(())
}

impl Project {
    /// Copies the whole output root to `dest`.
    pub fn copy(&self, dest: &Path) -> Result<usize> {
        copy_dir(&self.output_root(), dest)
    }

    /// Copies only the distribution folder to `dest`.
    pub fn deploy(&self, dest: &Path) -> Result<usize> {
        copy_dir(&self.dist_path(), dest)
    }
}
