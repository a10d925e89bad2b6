use crate::assemble::assemble;
use crate::content_type::ContentType;
use crate::error::Result;
use crate::project::Project;
use crate::resolve::{ResolvedFile, resolve};
use crate::write::{write_file, write_if_changed};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Post-processing hook producing the minified artifact. Nothing ships with
/// the crate; callers plug one in through [`Builder::with_minifier`].
pub trait Minifier {
    fn minify(&self, source: &str, content_type: &ContentType) -> Result<String>;
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub output_path: Option<PathBuf>,
    pub files: Vec<ResolvedFile>,
    #[serde(skip)]
    pub source: String,
    /// The artifact was written to disk by this build.
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_output_path: Option<PathBuf>,
    pub min_updated: bool,
}

/// Runs the pipeline: resolve, assemble, optionally minify, then write what
/// changed.
#[derive(Default)]
pub struct Builder {
    minifier: Option<Box<dyn Minifier>>,
    force_write: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minifier(mut self, minifier: impl Minifier + 'static) -> Self {
        self.minifier = Some(Box::new(minifier));
        self
    }

    /// Write even when only the timestamp would change.
    pub fn force_write(mut self, force: bool) -> Self {
        self.force_write = force;
        self
    }

    pub fn build(&self, project: &mut Project) -> Result<BuildReport> {
        self.build_at(project, Local::now().naive_local())
    }

    /// As [`Builder::build`] with a fixed manifest timestamp.
    pub fn build_at(&self, project: &mut Project, timestamp: NaiveDateTime) -> Result<BuildReport> {
        log::info!(
            "Building project in: {}",
            project.input_root().display()
        );
        let files = resolve(project)?;
        let source = assemble(&files, project, timestamp)?;

        let output_path = project.output_path();
        let updated = match &output_path {
            Some(path) => self.write(path, &source)?,
            None => {
                log::debug!("No output file configured, nothing written.");
                false
            }
        };
        project.updated = updated;

        let mut report = BuildReport {
            output_path,
            files,
            source,
            updated,
            min_output_path: None,
            min_updated: false,
        };

        if project.minify {
            self.minify(project, &mut report)?;
        }

        Ok(report)
    }

    fn minify(&self, project: &Project, report: &mut BuildReport) -> Result<()> {
        let Some(minifier) = &self.minifier else {
            log::warn!("Minify is enabled but no minifier is configured; skipping.");
            return Ok(());
        };
        let Some(path) = project.min_output_path() else {
            log::debug!("No minified output file configured, skipping minification.");
            return Ok(());
        };

        let minified = minifier.minify(&report.source, &project.resolved_content_type())?;
        report.min_updated = self.write(&path, &minified)?;
        report.min_output_path = Some(path);
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<bool> {
        if self.force_write {
            write_file(path, content)?;
            Ok(true)
        } else {
            write_if_changed(path, content)
        }
    }
}

impl Project {
    /// Builds with the default [`Builder`] (no minifier, change-gated writes).
    pub fn build(&mut self) -> Result<BuildReport> {
        Builder::new().build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    struct StripNewlines;

    impl Minifier for StripNewlines {
        fn minify(&self, source: &str, _content_type: &ContentType) -> Result<String> {
            Ok(source.lines().map(str::trim).collect())
        }
    }

    struct Broken;

    impl Minifier for Broken {
        fn minify(&self, _source: &str, _content_type: &ContentType) -> Result<String> {
            Err(AppError::Minify("boom".to_string()))
        }
    }

    fn timestamp(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn project_in(root: &Path) -> Project {
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/core.js"), "var core;").unwrap();
        let mut project = Project::default();
        project.files = vec!["core.js".to_string()];
        project.set_project_file(&root.join("onescript.json"));
        project
    }

    #[test]
    fn builds_write_once_until_sources_change() {
        let tmp = tempdir().unwrap();
        let mut project = project_in(tmp.path());
        let builder = Builder::new();

        let first = builder.build_at(&mut project, timestamp(1)).unwrap();
        assert!(first.updated && project.updated);
        let second = builder.build_at(&mut project, timestamp(2)).unwrap();
        assert!(!second.updated && !project.updated);

        let on_disk = fs::read_to_string(first.output_path.as_ref().unwrap()).unwrap();
        assert!(on_disk.contains("@date 2024-05-01 08:00:00"));

        let forced = Builder::new()
            .force_write(true)
            .build_at(&mut project, timestamp(3))
            .unwrap();
        assert!(forced.updated);
    }

    #[test]
    fn empty_output_file_skips_the_write() {
        let tmp = tempdir().unwrap();
        let mut project = project_in(tmp.path());
        project.output_file.clear();

        let report = Builder::new().build_at(&mut project, timestamp(1)).unwrap();
        assert!(!report.updated);
        assert!(report.source.contains("var core;"));
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn minifier_writes_the_min_file() {
        let tmp = tempdir().unwrap();
        let mut project = project_in(tmp.path());
        project.minify = true;

        let report = Builder::new()
            .with_minifier(StripNewlines)
            .build_at(&mut project, timestamp(1))
            .unwrap();
        assert!(report.min_updated);
        let min = fs::read_to_string(tmp.path().join("dist/onescript.min.js")).unwrap();
        assert!(!min.contains('\n'));
    }

    #[test]
    fn minify_without_minifier_only_writes_the_plain_artifact() {
        let tmp = tempdir().unwrap();
        let mut project = project_in(tmp.path());
        project.minify = true;

        let report = project.build().unwrap();
        assert!(report.updated);
        assert!(report.min_output_path.is_none());
        assert!(!tmp.path().join("dist/onescript.min.js").exists());
    }

    #[test]
    fn minifier_errors_surface() {
        let tmp = tempdir().unwrap();
        let mut project = project_in(tmp.path());
        project.minify = true;

        let err = Builder::new()
            .with_minifier(Broken)
            .build_at(&mut project, timestamp(1))
            .unwrap_err();
        assert!(matches!(err, AppError::Minify(_)));
    }
}
