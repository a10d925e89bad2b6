use crate::error::{AppError, Result};
use crate::finder::FileFinder;
use crate::project::{Project, SOURCE_DIR};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    /// Declared in `Files`; required, order preserved.
    Main,
    /// Found by scanning a module directory; optional, sorted.
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub role: FileRole,
}

/// Produces the load order of a build: every main file in declared order,
/// then each module directory's matches (sorted) in declared directory order.
///
/// A main file that does not exist aborts resolution. A module directory that
/// does not exist is skipped.
pub fn resolve(project: &Project) -> Result<Vec<ResolvedFile>> {
    let src_dir = project.src_dir();
    log::debug!("Resolving project files under: {}", src_dir.display());

    let mut files = resolve_main_files(project, &src_dir)?;
    let modules = resolve_module_files(project, &src_dir);
    log::debug!(
        "Resolved {} main file(s) and {} module file(s).",
        files.len(),
        modules.len()
    );
    files.extend(modules);
    Ok(files)
}

fn resolve_main_files(project: &Project, src_dir: &Path) -> Result<Vec<ResolvedFile>> {
    project
        .files
        .iter()
        .map(|name| {
            let path = src_dir.join(name);
            if !path.is_file() {
                let relative = Path::new(SOURCE_DIR).join(name);
                return Err(AppError::unreadable(
                    relative.clone(),
                    format!("file {} not found", relative.display()),
                ));
            }
            log::trace!("Main file: {}", path.display());
            Ok(ResolvedFile {
                path,
                role: FileRole::Main,
            })
        })
        .collect()
}

fn resolve_module_files(project: &Project, src_dir: &Path) -> Vec<ResolvedFile> {
    let mut resolved = Vec::new();

    for dir_name in &project.directories {
        let dir = src_dir.join(dir_name);
        if !dir.is_dir() {
            log::debug!("Module directory '{}' not found, skipping.", dir.display());
            continue;
        }

        let mut group: Vec<PathBuf> = FileFinder::new(&dir, &project.extensions)
            .files_only()
            .map(|entry| entry.into_path())
            .collect();
        group.sort();
        log::trace!("Module directory '{}': {:?}", dir_name, group);

        resolved.extend(group.into_iter().map(|path| ResolvedFile {
            path,
            role: FileRole::Module,
        }));
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn project_at(root: &Path, files: &[&str], dirs: &[&str]) -> Project {
        let mut project = Project::default();
        project.files = files.iter().map(|s| s.to_string()).collect();
        project.directories = dirs.iter().map(|s| s.to_string()).collect();
        project.set_project_file(&root.join("onescript.json"));
        project
    }

    fn relative(files: &[ResolvedFile], root: &Path) -> Vec<String> {
        let root = std::path::absolute(root).unwrap();
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(&root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn main_files_keep_declared_order_and_modules_sort_per_directory() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("zeta")).unwrap();
        fs::create_dir_all(src.join("alpha")).unwrap();
        for file in ["z.js", "a.js", "zeta/2.js", "zeta/1.js", "alpha/b.js", "alpha/a.js"] {
            fs::write(src.join(file), "x").unwrap();
        }

        let project = project_at(tmp.path(), &["z.js", "a.js"], &["zeta", "alpha"]);
        let files = resolve(&project).unwrap();
        assert_eq!(
            relative(&files, tmp.path()),
            vec![
                "src/z.js",
                "src/a.js",
                "src/zeta/1.js",
                "src/zeta/2.js",
                "src/alpha/a.js",
                "src/alpha/b.js",
            ]
        );
        assert_eq!(files[1].role, FileRole::Main);
        assert_eq!(files[2].role, FileRole::Module);
    }

    #[test]
    fn missing_main_file_fails_with_its_relative_path() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        let project = project_at(tmp.path(), &["core.js"], &[]);

        match resolve(&project).unwrap_err() {
            AppError::FileUnreadable { path, .. } => {
                assert_eq!(path, Path::new("src").join("core.js"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_module_directory_is_skipped() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/core.js"), "x").unwrap();
        let project = project_at(tmp.path(), &["core.js"], &["ext", "libs"]);

        let files = resolve(&project).unwrap();
        assert_eq!(relative(&files, tmp.path()), vec!["src/core.js"]);
    }

    #[test]
    fn duplicate_main_files_are_kept() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/core.js"), "x").unwrap();
        let project = project_at(tmp.path(), &["core.js", "core.js"], &[]);
        assert_eq!(resolve(&project).unwrap().len(), 2);
    }
}
