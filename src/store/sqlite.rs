//! SQLite-backed repository.
//!
//! One connection, opened at startup and shared by every screen for the
//! lifetime of the process. The schema is created on open if missing.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::repository::{EntryRepository, ProjectRepository, StoreError};
use super::types::{Entry, Project};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS entries (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id  INTEGER NOT NULL REFERENCES projects(id),
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_entries_project_created
    ON entries(project_id, created_at);
"#;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        debug!("Opening database at {}", path.display());
        let store = Self::from_connection(Connection::open(path)?)?;
        info!("Database ready at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn project_exists(&self, project_id: i64) -> Result<bool, StoreError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM projects WHERE id = ?1",
                params![project_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        project_id: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get::<_, DateTime<Utc>>(3)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get::<_, DateTime<Utc>>(2)?,
    })
}

impl EntryRepository for SqliteStore {
    fn get_entries_by_project_id(&self, project_id: i64) -> Result<Vec<Entry>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, project_id, body, created_at
            FROM entries
            WHERE project_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )?;
        let entries = stmt
            .query_map(params![project_id], entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("Loaded {} entries for project {}", entries.len(), project_id);
        Ok(entries)
    }

    fn create_entry(&self, project_id: i64, body: &str) -> Result<Entry, StoreError> {
        if body.trim().is_empty() {
            return Err(StoreError::EmptyEntry);
        }
        if !self.project_exists(project_id)? {
            return Err(StoreError::ProjectNotFound(project_id));
        }

        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO entries (project_id, body, created_at) VALUES (?1, ?2, ?3)",
            params![project_id, body, created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("Created entry {} in project {}", id, project_id);

        Ok(Entry {
            id,
            project_id,
            body: body.to_string(),
            created_at,
        })
    }
}

impl ProjectRepository for SqliteStore {
    fn get_all_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM projects ORDER BY created_at ASC, id ASC")?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    fn create_project(&self, name: &str) -> Result<Project, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::BlankProjectName);
        }

        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO projects (name, created_at) VALUES (?1, ?2)",
            params![name, created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("Created project {} ({})", id, name);

        Ok(Project {
            id,
            name: name.to_string(),
            created_at,
        })
    }
}
