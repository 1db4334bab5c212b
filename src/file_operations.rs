use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileOperationError {
    #[error("Failed to determine working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    #[error("Source file does not exist: {0}")]
    SourceMissing(PathBuf),

    #[error("Refusing to overwrite existing file: {0}")]
    TargetExists(PathBuf),

    #[error("Failed to rename {from} to {to}: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

/// Capability for the directory holding the episode files
pub trait FileStore {
    /// Absolute path of `name` inside the store
    fn resolve(&self, name: &str) -> PathBuf;

    /// Renames `from` to `to`, failing if `to` already exists
    fn rename(&self, from: &str, to: &str) -> Result<(), FileOperationError>;
}

/// File store over a directory of the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the process's current working directory
    pub fn current_dir() -> Result<Self, FileOperationError> {
        std::env::current_dir()
            .map(Self::new)
            .map_err(FileOperationError::WorkingDirectory)
    }
}

impl FileStore for LocalFileStore {
    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), FileOperationError> {
        let source = self.resolve(from);
        let destination = self.resolve(to);

        if !source.is_file() {
            return Err(FileOperationError::SourceMissing(source));
        }
        // fs::rename silently replaces the destination on Unix
        if destination.exists() {
            return Err(FileOperationError::TargetExists(destination));
        }

        fs::rename(&source, &destination).map_err(|e| FileOperationError::RenameFailed {
            from: source,
            to: destination,
            source: e,
        })
    }
}
