use crate::content_type::ContentType;
use crate::error::{AppError, Result};
use crate::json::to_pretty_json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROJECT_FILENAME: &str = "onescript.json";
pub const SOURCE_DIR: &str = "src";

/// Keys a descriptor file may carry. Anything else is ignored on load.
pub const PUBLIC_KEYS: &[&str] = &[
    "AddFileHeader",
    "AddScriptHeader",
    "ContentType",
    "Directories",
    "DistDir",
    "Extensions",
    "Files",
    "Minify",
    "OutputFile",
    "OutputMinFile",
    "Print",
    "Updated",
];

/// A project descriptor: which files make up the artifact, where it goes,
/// and how it is annotated.
///
/// Public fields are the persisted configuration. The input/output roots and
/// the descriptor's own filename are derived from where the descriptor lives
/// and are never written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Project {
    /// Emit a separator comment before every file.
    pub add_file_header: bool,
    /// Emit the build manifest (timestamp and file list) at the top.
    pub add_script_header: bool,
    /// `js`, `css`, `javascript`, `stylesheet` or a full MIME string.
    pub content_type: String,
    /// Module directories under `src/`, concatenated in this order.
    pub directories: Vec<String>,
    /// Folder under the output root that receives the artifacts.
    pub dist_dir: String,
    /// Extensions picked up when scanning module directories.
    pub extensions: Vec<String>,
    /// Main files under `src/`, always first and in this order.
    pub files: Vec<String>,
    pub minify: bool,
    /// Artifact filename. Empty disables writing.
    pub output_file: String,
    pub output_min_file: String,
    /// Serve the artifact as a live file (see `full_content_type`).
    pub print: bool,
    /// Whether the most recent build wrote to disk.
    pub updated: bool,

    #[serde(skip)]
    project_file: Option<String>,
    #[serde(skip)]
    input_dir: Option<PathBuf>,
    #[serde(skip)]
    output_dir: Option<PathBuf>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            add_file_header: true,
            add_script_header: true,
            content_type: crate::content_type::MIME_JAVASCRIPT.to_string(),
            directories: vec!["libs".to_string()],
            dist_dir: "dist".to_string(),
            extensions: vec!["js".to_string()],
            files: Vec::new(),
            minify: false,
            output_file: "onescript.js".to_string(),
            output_min_file: "onescript.min.js".to_string(),
            print: false,
            updated: false,
            project_file: None,
            input_dir: None,
            output_dir: None,
        }
    }
}

impl Project {
    /// Defaults with the known keys of `overrides` applied on top. Unknown
    /// keys are logged and ignored; a known key of the wrong type is an error.
    pub fn from_overrides(overrides: Map<String, Value>) -> Result<Self> {
        Self::from_json_object(overrides, Path::new("<overrides>"))
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        log::info!("Loading project descriptor from: {}", file.display());
        let content = fs::read_to_string(file)
            .map_err(|e| AppError::unreadable(file, format!("file not found or unreadable: {e}")))?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| AppError::invalid(file, format!("file appears to be invalid: {e}")))?;
        let Value::Object(map) = value else {
            return Err(AppError::invalid(
                file,
                "file appears to be invalid: expected a JSON object",
            ));
        };

        let mut project = Self::from_json_object(map, file)?;
        project.set_project_file(file);
        Ok(project)
    }

    fn from_json_object(map: Map<String, Value>, origin: &Path) -> Result<Self> {
        let mut known = Map::new();
        for (key, value) in map {
            if PUBLIC_KEYS.contains(&key.as_str()) {
                known.insert(key, value);
            } else {
                log::warn!(
                    "Ignoring unknown descriptor key '{}' in {}",
                    key,
                    origin.display()
                );
            }
        }
        serde_json::from_value(Value::Object(known))
            .map_err(|e| AppError::invalid(origin, format!("bad descriptor field: {e}")))
    }

    /// Writes the public view to the backing descriptor file.
    pub fn save(&self) -> Result<()> {
        let file = self
            .project_file_path()
            .ok_or_else(|| AppError::Config("no project file set".to_string()))?;

        if !file.exists() {
            let dir = file.parent().unwrap_or_else(|| Path::new("."));
            if !dir.is_dir() {
                return Err(AppError::unwritable(
                    dir,
                    "unable to write to project directory",
                ));
            }
        }

        let content = self.to_json()?;
        fs::write(&file, content)
            .map_err(|e| AppError::unwritable(&file, format!("unable to write to project file: {e}")))?;
        log::info!("Saved project descriptor to: {}", file.display());
        Ok(())
    }

    /// The public fields only, with keys in alphabetical order.
    pub fn public_properties(&self) -> Result<BTreeMap<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(AppError::InvalidArgument(format!(
                "project serialized to a non-object: {other}"
            ))),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let mut text = to_pretty_json(&self.public_properties()?)?;
        text.push('\n');
        Ok(text)
    }

    pub fn resolved_content_type(&self) -> ContentType {
        ContentType::from_alias(&self.content_type)
    }

    /// The content type as an HTTP response would carry it.
    pub fn full_content_type(&self) -> String {
        self.resolved_content_type().mime().to_string()
    }

    /// Binds the descriptor to a file. Input and output roots default to the
    /// file's directory when not already set.
    pub fn set_project_file(&mut self, file: &Path) -> &mut Self {
        self.project_file = file
            .file_name()
            .map(|name| name.to_string_lossy().to_string());

        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if self.input_dir.is_none() {
            self.input_dir = Some(dir.clone());
        }
        if self.output_dir.is_none() {
            self.output_dir = Some(dir);
        }
        self
    }

    pub fn project_file(&self) -> Option<&str> {
        self.project_file.as_deref()
    }

    pub fn project_file_path(&self) -> Option<PathBuf> {
        let name = self.project_file.as_ref()?;
        Some(self.input_root().join(name))
    }

    pub fn input_dir(&self) -> Option<&Path> {
        self.input_dir.as_deref()
    }

    pub fn set_input_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.input_dir = Some(dir.into());
        self
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Absolute input root, `.` when unset.
    pub fn input_root(&self) -> PathBuf {
        absolutize(self.input_dir.as_deref().unwrap_or_else(|| Path::new(".")))
    }

    /// Absolute output root, `.` when unset.
    pub fn output_root(&self) -> PathBuf {
        absolutize(self.output_dir.as_deref().unwrap_or_else(|| Path::new(".")))
    }

    pub fn src_dir(&self) -> PathBuf {
        self.input_root().join(SOURCE_DIR)
    }

    pub fn dist_path(&self) -> PathBuf {
        self.output_root().join(&self.dist_dir)
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        if self.output_file.is_empty() {
            return None;
        }
        Some(self.dist_path().join(&self.output_file))
    }

    pub fn min_output_path(&self) -> Option<PathBuf> {
        if self.output_min_file.is_empty() {
            return None;
        }
        Some(self.dist_path().join(&self.output_min_file))
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
