pub mod build;
pub mod completion;
pub mod deploy;
pub mod files;
pub mod init;
pub mod show;
