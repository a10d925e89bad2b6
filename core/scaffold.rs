use crate::error::{AppError, Result};
use crate::project::Project;
use crate::write::make_directory;
use std::fs::OpenOptions;
use std::path::Path;

impl Project {
    /// Lays out the on-disk skeleton for the project: `src/`, every module
    /// directory and an empty file for every main file. Existing files and
    /// directories are left as they are, so running it twice is harmless.
    pub fn bootstrap(&self) -> Result<()> {
        if self.project_file().is_none() {
            return Err(AppError::Config("no project file set".to_string()));
        }
        if self.output_dir().is_none() {
            return Err(AppError::Config("no output directory set".to_string()));
        }
        if self.input_dir().is_none() {
            return Err(AppError::Config("no input directory set".to_string()));
        }

        let src_dir = self.src_dir();
        log::info!("Bootstrapping project source tree in: {}", src_dir.display());
        ensure_directory(&src_dir)?;

        for dir in &self.directories {
            ensure_directory(&src_dir.join(dir))?;
        }

        for file in &self.files {
            let path = src_dir.join(file);
            if let Some(parent) = path.parent() {
                ensure_directory(parent)?;
            }
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| AppError::unwritable(&path, e))?;
            log::debug!("Touched main file: {}", path.display());
        }

        Ok(())
    }
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if make_directory(dir) {
        Ok(())
    } else {
        Err(AppError::unwritable(dir, "unable to create directory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn requires_a_project_file() {
        let err = Project::default().bootstrap().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn creates_skeleton_without_clobbering_existing_files() {
        let tmp = tempdir().unwrap();
        let mut project = Project::default();
        project.files = vec!["core.js".to_string(), "boot/init.js".to_string()];
        project.directories = vec!["ext".to_string(), "plugins".to_string()];
        project.set_project_file(&tmp.path().join("onescript.json"));

        project.bootstrap().unwrap();
        let src = tmp.path().join("src");
        assert!(src.join("ext").is_dir());
        assert!(src.join("plugins").is_dir());
        assert_eq!(fs::read_to_string(src.join("core.js")).unwrap(), "");
        assert!(src.join("boot/init.js").is_file());

        fs::write(src.join("core.js"), "keep me").unwrap();
        project.bootstrap().unwrap();
        assert_eq!(fs::read_to_string(src.join("core.js")).unwrap(), "keep me");
    }
}
