use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectOpts {
    #[arg(
        short = 'p',
        long,
        help = "Project descriptor file, or a directory containing onescript.json (default: ./onescript.json).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(
    name = "onescript",
    author,
    version,
    about = "Concatenate a project's source files into one distributable file.",
    long_about = "onescript reads a project descriptor (onescript.json), collects the declared main \nfiles and every matching file in the module directories under src/, and writes them \nas one artifact into the dist folder, only when the content actually changed.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  onescript init --file core.js --dir ext\n  onescript build\n  onescript watch --delay 500ms\n  onescript deploy ../public/js",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(about = "Create a project descriptor and its source skeleton.")]
    Init(InitArgs),

    #[command(about = "Create any missing source directories and main files.")]
    Bootstrap(BootstrapArgs),

    #[command(visible_alias = "b", about = "Build the artifact if the sources changed.")]
    Build(BuildArgs),

    #[command(
        visible_alias = "w",
        about = "Rebuild automatically when source files or the descriptor change."
    )]
    Watch(WatchArgs),

    #[command(
        visible_alias = "ls",
        about = "List the files a build would include, in load order."
    )]
    Files(FilesArgs),

    #[command(visible_alias = "s", about = "Show the project descriptor and derived paths.")]
    Show(ShowArgs),

    #[command(about = "Copy the whole output directory to a destination.")]
    Copy(CopyArgs),

    #[command(about = "Copy the dist directory to a destination.")]
    Deploy(CopyArgs),

    #[command(about = "Generate or save shell completion scripts.")]
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    #[clap(flatten)]
    pub project: ProjectOpts,

    #[arg(long = "file", value_name = "FILE", action = clap::ArgAction::Append, help = "Main file under src/, in load order (repeatable).", help_heading = "Descriptor")]
    pub files: Vec<String>,

    #[arg(long = "dir", value_name = "DIR", action = clap::ArgAction::Append, help = "Module directory under src/ (repeatable) [default: libs].", help_heading = "Descriptor")]
    pub directories: Vec<String>,

    #[arg(long = "ext", value_name = "EXT", action = clap::ArgAction::Append, help = "Extension to collect from module directories (repeatable) [default: js].", help_heading = "Descriptor")]
    pub extensions: Vec<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Artifact filename [default: onescript.js].",
        help_heading = "Descriptor"
    )]
    pub output: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Minified artifact filename [default: onescript.min.js].",
        help_heading = "Descriptor"
    )]
    pub output_min: Option<String>,

    #[arg(
        long,
        value_name = "TYPE",
        help = "js, css, javascript, stylesheet or a MIME type [default: text/javascript].",
        help_heading = "Descriptor"
    )]
    pub content_type: Option<String>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Folder under the project that receives artifacts [default: dist].",
        help_heading = "Descriptor"
    )]
    pub dist: Option<String>,

    #[arg(
        long,
        help = "Do not write the build manifest header.",
        help_heading = "Descriptor"
    )]
    pub no_script_header: bool,

    #[arg(
        long,
        help = "Do not write separator comments between files.",
        help_heading = "Descriptor"
    )]
    pub no_file_header: bool,

    #[arg(long, help = "Overwrite an existing descriptor.")]
    pub force: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BootstrapArgs {
    #[clap(flatten)]
    pub project: ProjectOpts,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[clap(flatten)]
    pub project: ProjectOpts,

    #[arg(
        long,
        help = "Print the artifact to stdout with a Content-type header, as a live file.",
        help_heading = "Output Control"
    )]
    pub print: bool,

    #[arg(
        long,
        help = "Write the artifact even if only the timestamp changed.",
        help_heading = "Output Control"
    )]
    pub force_write: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    #[clap(flatten)]
    pub project: ProjectOpts,

    #[arg(
        long,
        value_name = "DELAY_STRING",
        help = "Set debounce delay for watch mode [default: 300ms]"
    )]
    pub delay: Option<String>,

    #[arg(long, help = "Clear the terminal before each rebuild.")]
    pub clear: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilesArgs {
    #[clap(flatten)]
    pub project: ProjectOpts,

    #[arg(long, help = "Print the listing as JSON.")]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    #[clap(flatten)]
    pub project: ProjectOpts,
}

#[derive(Args, Debug, Clone)]
pub struct CopyArgs {
    #[clap(flatten)]
    pub project: ProjectOpts,

    #[arg(required = true, value_name = "DEST", help = "Destination directory.")]
    pub dest: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_enum,
        value_name = "SHELL",
        default_value = "fish",
        help = "Shell to generate completions for."
    )]
    pub shell: Shell,

    #[arg(long, help = "Save completion script to the shell's default location.")]
    pub save: bool,

    #[arg(long, requires = "save", help = "Overwrite an existing completion file.")]
    pub force: bool,
}
