pub mod assemble;
pub mod change;
pub mod content_type;
pub mod deploy;
pub mod error;
pub mod finder;
pub mod json;
pub mod pipeline;
pub mod project;
pub mod resolve;
pub mod scaffold;
pub mod watch;
pub mod write;

pub use assemble::{assemble, relative_path};
pub use change::{content_digest, has_changed, strip_script_header};
pub use content_type::{CommentStyle, ContentType};
pub use deploy::copy_dir;
pub use error::{AppError, Result};
pub use finder::FileFinder;
pub use pipeline::{BuildReport, Builder, Minifier};
pub use project::{DEFAULT_PROJECT_FILENAME, Project};
pub use resolve::{FileRole, ResolvedFile, resolve};
pub use watch::{DEFAULT_WATCH_DELAY, parse_watch_delay};
pub use write::{make_directory, write_file, write_if_changed};
