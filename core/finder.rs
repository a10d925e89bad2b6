use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Lists the immediate entries of a directory, keeping those whose extension
/// is in the allow-list. An empty allow-list keeps everything.
///
/// A directory that is missing or cannot be read yields nothing instead of
/// failing, so module folders that have not been created yet are harmless.
/// Iteration order follows the filesystem; sort the results if order matters.
pub struct FileFinder {
    entries: Option<walkdir::IntoIter>,
    extensions: Option<HashSet<String>>,
    files_only: bool,
}

impl FileFinder {
    pub fn new(directory: &Path, extensions: &[String]) -> Self {
        let readable = directory.is_dir() && fs::read_dir(directory).is_ok();
        let entries = if readable {
            Some(
                WalkDir::new(directory)
                    .min_depth(1)
                    .max_depth(1)
                    .follow_links(false)
                    .into_iter(),
            )
        } else {
            log::trace!(
                "Directory '{}' is missing or unreadable, finding nothing.",
                directory.display()
            );
            None
        };

        let extensions = if extensions.is_empty() {
            None
        } else {
            Some(extensions.iter().cloned().collect())
        };

        Self {
            entries,
            extensions,
            files_only: false,
        }
    }

    /// Restrict results to regular files (symlinks to files count).
    pub fn files_only(mut self) -> Self {
        self.files_only = true;
        self
    }

    fn accept(&self, entry: &DirEntry) -> bool {
        if self.files_only && !entry.path().is_file() {
            return false;
        }
        match &self.extensions {
            None => true,
            Some(allowed) => entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| allowed.contains(ext)),
        }
    }
}

impl Iterator for FileFinder {
    type Item = DirEntry;

    fn next(&mut self) -> Option<DirEntry> {
        loop {
            let next = self.entries.as_mut()?.next()?;
            match next {
                Ok(entry) => {
                    if self.accept(&entry) {
                        return Some(entry);
                    }
                }
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable entry: {} (at {})",
                        e,
                        e.path()
                            .map_or_else(|| "unknown path".into(), |p| p.display().to_string())
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(finder: FileFinder) -> Vec<String> {
        let mut names: Vec<String> = finder
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let tmp = tempdir().unwrap();
        let finder = FileFinder::new(&tmp.path().join("nope"), &["js".to_string()]);
        assert!(names(finder).is_empty());
    }

    #[test]
    fn filters_by_exact_extension() {
        let tmp = tempdir().unwrap();
        for name in ["a.js", "b.css", "c.JS", "d.js.map", "e"] {
            fs::write(tmp.path().join(name), "x").unwrap();
        }
        let finder = FileFinder::new(tmp.path(), &["js".to_string()]);
        assert_eq!(names(finder), vec!["a.js"]);
    }

    #[test]
    fn empty_allow_list_keeps_files_and_directories() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.js"), "x").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("deep.js"), "x").unwrap();

        assert_eq!(names(FileFinder::new(tmp.path(), &[])), vec!["a.js", "nested"]);
        assert_eq!(
            names(FileFinder::new(tmp.path(), &[]).files_only()),
            vec!["a.js"]
        );
    }

    #[test]
    fn files_only_skips_directories_with_matching_extension() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("vendor.js")).unwrap();
        fs::write(tmp.path().join("real.js"), "x").unwrap();
        let finder = FileFinder::new(tmp.path(), &["js".to_string()]).files_only();
        assert_eq!(names(finder), vec!["real.js"]);
    }
}
