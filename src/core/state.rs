//! # Entry View State
//!
//! Session state for one project's entry view. Created when the view is
//! entered, discarded when the user goes back to the project list.
//!
//! ```text
//! EntryView
//! ├── project: Project               // active project
//! ├── entries: Vec<Entry>            // snapshot, replaced on refresh
//! ├── pager: Pager                   // current page / total
//! ├── viewport: ViewportSize         // content area size
//! ├── alert: String                  // transient confirmation ("printed!")
//! ├── error: String                  // transient error text
//! ├── mode: Mode                     // Viewing / AwaitingEditor / Exiting
//! ├── draft: String                  // editor text not yet saved
//! └── editor_failure: EditorFailurePolicy
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use log::info;

use crate::core::config::EditorFailurePolicy;
use crate::core::pager::Pager;
use crate::store::{Entry, EntryRepository, Project, StoreError};

pub const NO_ENTRIES_TEXT: &str = "There are no entries for this project";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    /// External editor is running; input is not processed.
    AwaitingEditor,
    /// Terminal state, every later action is ignored.
    Exiting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u16,
    pub height: u16,
}

impl ViewportSize {
    /// Size of the content area for a terminal of `width` x `height`.
    /// A seventh of the rows is kept for help, error, pager and alert.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Self {
            width,
            height: content_height(height),
        }
    }
}

pub fn content_height(height: u16) -> u16 {
    height - height / 7
}

#[derive(Debug)]
pub struct EntryView {
    pub project: Project,
    pub entries: Vec<Entry>,
    pub pager: Pager,
    pub viewport: ViewportSize,
    pub alert: String,
    pub error: String,
    pub mode: Mode,
    pub draft: String,
    pub editor_failure: EditorFailurePolicy,
}

impl EntryView {
    pub fn new(project: Project, entries: Vec<Entry>, viewport: ViewportSize) -> Self {
        let pager = Pager::new(entries.len());
        Self {
            project,
            entries,
            pager,
            viewport,
            alert: String::new(),
            error: String::new(),
            mode: Mode::Viewing,
            draft: String::new(),
            editor_failure: EditorFailurePolicy::default(),
        }
    }

    /// Enter the view for `project`. Failing to load the entries is fatal
    /// for the view: there is nothing sensible to show.
    pub fn load(
        repo: &dyn EntryRepository,
        project: Project,
        viewport: ViewportSize,
    ) -> Result<Self, StoreError> {
        let entries = repo.get_entries_by_project_id(project.id)?;
        info!(
            "Opened project {} ({}) with {} entries",
            project.id,
            project.name,
            entries.len()
        );
        Ok(Self::new(project, entries, viewport))
    }

    pub fn with_editor_failure(mut self, policy: EditorFailurePolicy) -> Self {
        self.editor_failure = policy;
        self
    }

    /// The entry on the current page, if any.
    pub fn current_entry(&self) -> Option<&Entry> {
        self.pager.current().and_then(|i| self.entries.get(i))
    }

    /// Markdown for the current page.
    pub fn page_markdown(&self) -> String {
        match self.current_entry() {
            Some(entry) => entry.to_markdown(),
            None => NO_ENTRIES_TEXT.to_string(),
        }
    }

    /// Replace the snapshot after a refresh. The page is kept when it is
    /// still valid, otherwise it goes back to the first page.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        if self.pager.page() >= entries.len() {
            self.pager.set_page(0);
        }
        self.entries = entries;
        self.pager.set_total(self.entries.len());
    }

    pub fn is_exiting(&self) -> bool {
        self.mode == Mode::Exiting
    }
}
