//! PDF export of a project's entries.
//!
//! The document is plain markdown piped into pandoc; where the PDF lands
//! is the exporter's business, not the caller's.

use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::{info, warn};
use thiserror::Error;

use crate::store::{Entry, StoreError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there are no entries to print")]
    NothingToExport,

    #[error("could not load entries: {0}")]
    Store(#[from] StoreError),

    #[error("'{0}' was not found, is it installed?")]
    MissingProgram(String),

    #[error("export failed: {0}")]
    Io(#[from] io::Error),

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

pub trait Exporter {
    fn export(&self, entries: &[Entry]) -> Result<(), ExportError>;
}

/// Join entries into a single markdown document, oldest first.
pub fn entries_document(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(Entry::to_markdown)
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

pub struct PandocExporter {
    pub program: String,
    pub output: PathBuf,
}

impl PandocExporter {
    pub fn new(program: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            output: output.into(),
        }
    }
}

impl Exporter for PandocExporter {
    fn export(&self, entries: &[Entry]) -> Result<(), ExportError> {
        if entries.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let mut child = Command::new(&self.program)
            .args(["-f", "markdown", "-o"])
            .arg(&self.output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ExportError::MissingProgram(self.program.clone()),
                _ => ExportError::Io(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let document = entries_document(entries);
            // The exit status decides the outcome if the child stops reading early.
            if let Err(e) = stdin.write_all(document.as_bytes())
                && e.kind() != ErrorKind::BrokenPipe
            {
                return Err(ExportError::Io(e));
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} exited with {}: {}", self.program, output.status, stderr);
            return Err(ExportError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        info!(
            "Exported {} entries to {}",
            entries.len(),
            self.output.display()
        );
        Ok(())
    }
}
