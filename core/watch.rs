use crate::error::{AppError, Result};
use crate::project::Project;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_WATCH_DELAY: &str = "300ms";

pub fn parse_watch_delay(delay: &str) -> Result<Duration> {
    parse_duration::parse(delay).map_err(|e| {
        AppError::DurationParse(format!(
            "Invalid watch delay duration '{}': {}. Use format like '500ms', '2s'.",
            delay, e
        ))
    })
}

impl Project {
    /// Paths a watcher should observe to know when to rebuild: the source
    /// tree and the descriptor itself.
    pub fn watch_targets(&self) -> Vec<PathBuf> {
        let mut targets = vec![self.src_dir()];
        targets.extend(self.project_file_path());
        targets
    }

    /// Whether a changed path is this project's descriptor file.
    pub fn is_descriptor_path(&self, path: &Path) -> bool {
        let Some(descriptor) = self.project_file_path() else {
            return false;
        };
        match (descriptor.canonicalize(), path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => descriptor == path,
        }
    }

    /// Whether a changed path can affect the artifact. Writes into the
    /// distribution folder are ignored so a build never retriggers itself.
    pub fn affects_build(&self, path: &Path) -> bool {
        if path.starts_with(self.dist_path()) {
            return false;
        }
        path.starts_with(self.src_dir()) || self.is_descriptor_path(path)
    }
}
