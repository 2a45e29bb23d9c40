//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::io;

use chrono::{Duration, TimeZone, Utc};

use crate::export::{ExportError, Exporter};
use crate::store::{Entry, EntryRepository, Project, ProjectRepository, StoreError};

pub const TEST_PROJECT_ID: i64 = 1;

pub fn test_project() -> Project {
    Project {
        id: TEST_PROJECT_ID,
        name: "test project".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// In-memory entry repository with switchable failures.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<Entry>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    /// A store holding one entry per body for the test project, a minute apart.
    pub fn with_entries(bodies: &[&str]) -> Self {
        let store = Self::default();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        for (i, body) in bodies.iter().enumerate() {
            store.entries.borrow_mut().push(Entry {
                id: i as i64 + 1,
                project_id: TEST_PROJECT_ID,
                body: body.to_string(),
                created_at: start + Duration::minutes(i as i64),
            });
        }
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

fn simulated() -> StoreError {
    StoreError::Io(io::Error::other("simulated store failure"))
}

impl EntryRepository for MemoryStore {
    fn get_entries_by_project_id(&self, project_id: i64) -> Result<Vec<Entry>, StoreError> {
        if self.fail_reads.get() {
            return Err(simulated());
        }
        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect())
    }

    fn create_entry(&self, project_id: i64, body: &str) -> Result<Entry, StoreError> {
        if self.fail_writes.get() {
            return Err(simulated());
        }
        let mut entries = self.entries.borrow_mut();
        let created_at = entries
            .last()
            .map(|e| e.created_at + Duration::minutes(1))
            .unwrap_or_else(Utc::now);
        let entry = Entry {
            id: entries.len() as i64 + 1,
            project_id,
            body: body.to_string(),
            created_at,
        };
        entries.push(entry.clone());
        Ok(entry)
    }
}

/// Only the test project exists; reads fail with the same switch as entries.
impl ProjectRepository for MemoryStore {
    fn get_all_projects(&self) -> Result<Vec<Project>, StoreError> {
        if self.fail_reads.get() {
            return Err(simulated());
        }
        Ok(vec![test_project()])
    }

    fn create_project(&self, _name: &str) -> Result<Project, StoreError> {
        Err(StoreError::BlankProjectName)
    }
}

/// Exporter that remembers what it was handed.
#[derive(Default)]
pub struct RecordingExporter {
    exports: RefCell<Vec<Vec<Entry>>>,
    fail: bool,
}

impl RecordingExporter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Bodies from the most recent export, empty if none happened.
    pub fn exported_bodies(&self) -> Vec<String> {
        self.exports
            .borrow()
            .last()
            .map(|entries| entries.iter().map(|e| e.body.clone()).collect())
            .unwrap_or_default()
    }
}

impl Exporter for RecordingExporter {
    fn export(&self, entries: &[Entry]) -> Result<(), ExportError> {
        if self.fail {
            return Err(ExportError::Failed {
                program: "pandoc".to_string(),
                status: "exit status: 43".to_string(),
                stderr: "simulated".to_string(),
            });
        }
        self.exports.borrow_mut().push(entries.to_vec());
        Ok(())
    }
}
