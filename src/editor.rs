//! External editor bridge.
//!
//! Collects free text by handing a temporary file to the user's editor and
//! reading it back once the editor exits. The call blocks; the terminal
//! adapter is responsible for getting out of the way while it runs.

use std::fs;
use std::io::{self, Write};
use std::process::Command;

use log::{debug, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no editor command configured")]
    NoCommand,

    #[error("could not prepare temporary file: {0}")]
    TempFile(#[source] io::Error),

    #[error("failed to start editor '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("editor '{program}' exited with {status}")]
    NonZeroExit { program: String, status: String },

    #[error("could not read back edited file: {0}")]
    Read(#[source] io::Error),

    #[error("terminal could not be suspended: {0}")]
    Terminal(#[source] io::Error),
}

/// Something that can turn a draft into edited text.
pub trait Editor {
    /// Edit `draft` and return the full resulting text.
    fn launch(&self, draft: &str) -> Result<String, EditorError>;
}

/// Runs an external program against a temporary markdown file.
///
/// `command` may carry arguments (`"code --wait"`); the file path is
/// appended last.
pub struct SystemEditor {
    pub command: String,
}

impl SystemEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Editor for SystemEditor {
    fn launch(&self, draft: &str) -> Result<String, EditorError> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(EditorError::NoCommand)?;
        let args: Vec<&str> = parts.collect();

        let mut file = tempfile::Builder::new()
            .prefix("pjs-entry-")
            .suffix(".md")
            .tempfile()
            .map_err(EditorError::TempFile)?;
        file.write_all(draft.as_bytes())
            .and_then(|_| file.flush())
            .map_err(EditorError::TempFile)?;
        // Close our handle before the editor opens the file; the path is
        // removed when `path` drops on every return below.
        let path = file.into_temp_path();

        info!("Launching editor: {} {}", self.command, path.display());
        let status = Command::new(program)
            .args(&args)
            .arg(&path)
            .status()
            .map_err(|source| EditorError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            warn!("Editor '{}' exited with {}", program, status);
            return Err(EditorError::NonZeroExit {
                program: program.to_string(),
                status: status.to_string(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(EditorError::Read)?;
        debug!("Editor returned {} bytes", contents.len());
        Ok(contents)
    }
}
