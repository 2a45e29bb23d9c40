//! Repository traits consumed by the session controller.
//!
//! The controller only ever sees these traits, so tests can swap in an
//! in-memory store and the binary can hand over the SQLite one.

use thiserror::Error;

use super::types::{Entry, Project};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("project {0} does not exist")]
    ProjectNotFound(i64),

    #[error("entry is empty, nothing was saved")]
    EmptyEntry,

    #[error("project name cannot be blank")]
    BlankProjectName,

    #[error("could not create database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Entry access scoped by project id.
pub trait EntryRepository {
    /// All entries of a project, oldest first.
    fn get_entries_by_project_id(&self, project_id: i64) -> Result<Vec<Entry>, StoreError>;

    fn create_entry(&self, project_id: i64, body: &str) -> Result<Entry, StoreError>;
}

pub trait ProjectRepository {
    /// All projects, oldest first.
    fn get_all_projects(&self) -> Result<Vec<Project>, StoreError>;

    fn create_project(&self, name: &str) -> Result<Project, StoreError>;
}
