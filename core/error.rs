use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("File Unreadable: Path '{path}', Reason: {reason}")]
    FileUnreadable { path: PathBuf, reason: String },

    #[error("File Unwritable: Path '{path}', Reason: {reason}")]
    FileUnwritable { path: PathBuf, reason: String },

    #[error("File Invalid: Path '{path}', Reason: {reason}")]
    FileInvalid { path: PathBuf, reason: String },

    #[error("Project Error: {0}")]
    Config(String),

    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Serialization Error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Minify Error: {0}")]
    Minify(String),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Duration Parsing Error: {0}")]
    DurationParse(String),
}

impl AppError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::FileUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unwritable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::FileUnwritable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::FileInvalid {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit status for a command that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::FileUnreadable { .. } | AppError::Io(_) => 2,
            AppError::FileUnwritable { .. } => 3,
            AppError::Minify(_) => 4,
            AppError::InvalidArgument(_) | AppError::DurationParse(_) => 5,
            AppError::JsonSerialize(_) => 6,
            AppError::FileInvalid { .. } | AppError::Config(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_error_kinds() {
        assert_eq!(AppError::unreadable("a", "gone").exit_code(), 2);
        assert_eq!(AppError::unwritable("a", "denied").exit_code(), 3);
        assert_eq!(AppError::invalid("a", "not json").exit_code(), 1);
        assert_eq!(AppError::Config("x".into()).exit_code(), 1);
        assert_eq!(AppError::Minify("x".into()).exit_code(), 4);
        assert_eq!(AppError::DurationParse("x".into()).exit_code(), 5);
    }

    #[test]
    fn display_names_the_path() {
        let err = AppError::unreadable("src/core.js", "file not found");
        assert_eq!(
            err.to_string(),
            "File Unreadable: Path 'src/core.js', Reason: file not found"
        );
    }
}
