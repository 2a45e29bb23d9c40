//! # Store
//!
//! Persistence for projects and entries. The rest of the crate talks to
//! the [`EntryRepository`] and [`ProjectRepository`] traits; [`SqliteStore`]
//! is the implementation the binary uses.

mod repository;
mod sqlite;
mod types;

pub use repository::{EntryRepository, ProjectRepository, StoreError};
pub use sqlite::SqliteStore;
pub use types::{Entry, Project};
