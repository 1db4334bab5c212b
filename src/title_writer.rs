//! Container title tagging
//!
//! This module writes the episode's display title into the container metadata
//! using the `mkvpropedit` CLI from MKVToolNix.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while writing a title
#[derive(Debug, Error)]
pub enum TitleWriterError {
    /// The utility could not be started (usually not installed)
    #[error("Failed to launch {program}: {source}. Is MKVToolNix installed?")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    /// The utility ran but reported failure
    #[error("{program} failed on {path} with exit code {code:?}:\n{output}")]
    Failed {
        program: String,
        path: PathBuf,
        code: Option<i32>,
        output: String,
    },
}

/// Capability for setting the title field of a video container
pub trait TitleWriter {
    /// Sets the container title of the file at `path`
    ///
    /// Returns the tool's combined output for display.
    fn write_title(&self, path: &Path, title: &str) -> Result<String, TitleWriterError>;
}

/// Title writer backed by the `mkvpropedit` binary
pub struct MkvPropEditWriter {
    program: String,
}

impl Default for MkvPropEditWriter {
    fn default() -> Self {
        Self::new("mkvpropedit")
    }
}

impl MkvPropEditWriter {
    /// Creates a writer invoking `program` (a name on PATH or a full path)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to mkvpropedit; the title is a single argv element
    fn arguments(path: &Path, title: &str) -> Vec<String> {
        vec![
            path.display().to_string(),
            "--edit".to_string(),
            "info".to_string(),
            "--set".to_string(),
            format!("title={}", title),
        ]
    }
}

impl TitleWriter for MkvPropEditWriter {
    fn write_title(&self, path: &Path, title: &str) -> Result<String, TitleWriterError> {
        let args = Self::arguments(path, title);
        debug!(program = %self.program, ?args, "running metadata editor");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| TitleWriterError::Launch {
                program: self.program.clone(),
                source,
            })?;

        // stdout followed by stderr
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim_end().to_string();

        if !output.status.success() {
            return Err(TitleWriterError::Failed {
                program: self.program.clone(),
                path: path.to_path_buf(),
                code: output.status.code(),
                output: combined,
            });
        }

        Ok(combined)
    }
}
