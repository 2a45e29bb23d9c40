//! # Actions
//!
//! Everything that can happen in the entry view becomes an `Action`.
//! User presses `c`? That's `Action::Key(Key::Char('c'))`.
//! The editor returns? That's `Action::EditorFinished(text)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns at most one `Effect`. No side effects here. I/O
//! happens in `Services::perform` (repository, exporter) and in the
//! terminal adapter (editor), and every effect comes back as exactly one
//! new action.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                              │
//!            Action  ←  perform / editor  ←────┘
//! ```

use std::rc::Rc;

use log::{debug, info, warn};

use crate::core::config::EditorFailurePolicy;
use crate::core::keymap::{KEYMAP, Key};
use crate::core::state::{EntryView, Mode, ViewportSize};
use crate::editor::EditorError;
use crate::export::{ExportError, Exporter};
use crate::store::{Entry, EntryRepository, StoreError};

pub const PRINTED_ALERT: &str = "printed!";

#[derive(Debug)]
pub enum Action {
    Resize { width: u16, height: u16 },
    Key(Key),
    EditorFinished(Result<String, EditorError>),
    EntryCreated(Result<Entry, StoreError>),
    EntriesRefreshed(Result<Vec<Entry>, StoreError>),
    Printed(Result<(), ExportError>),
}

/// Follow-up work requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    LaunchEditor { draft: String },
    CreateEntry { project_id: i64, body: String },
    RefreshEntries { project_id: i64 },
    Print { project_id: i64 },
    /// Leave the entry view for the project list.
    Back,
    Quit,
}

pub fn update(view: &mut EntryView, action: Action) -> Effect {
    if view.mode == Mode::Exiting {
        debug!("Ignoring {:?} while exiting", action);
        return Effect::None;
    }

    match action {
        Action::Resize { width, height } => {
            view.viewport = ViewportSize::for_terminal(width, height);
            Effect::None
        }
        Action::Key(key) => handle_key(view, key),
        Action::EditorFinished(Ok(body)) => {
            view.mode = Mode::Viewing;
            view.draft = body.clone();
            Effect::CreateEntry {
                project_id: view.project.id,
                body,
            }
        }
        Action::EditorFinished(Err(e)) => {
            warn!("Editor failed: {}", e);
            match view.editor_failure {
                EditorFailurePolicy::Report => {
                    view.mode = Mode::Viewing;
                    view.error = e.to_string();
                    Effect::None
                }
                EditorFailurePolicy::Quit => {
                    view.mode = Mode::Exiting;
                    Effect::Quit
                }
            }
        }
        Action::EntryCreated(Ok(entry)) => {
            info!("Entry {} saved", entry.id);
            view.draft.clear();
            Effect::RefreshEntries {
                project_id: view.project.id,
            }
        }
        Action::EntryCreated(Err(e)) => {
            warn!("Could not save entry: {}", e);
            view.error = e.to_string();
            Effect::None
        }
        Action::EntriesRefreshed(Ok(entries)) => {
            view.replace_entries(entries);
            view.mode = Mode::Viewing;
            Effect::None
        }
        Action::EntriesRefreshed(Err(e)) => {
            warn!("Could not refresh entries: {}", e);
            view.error = e.to_string();
            view.mode = Mode::Viewing;
            Effect::None
        }
        Action::Printed(Ok(())) => {
            view.alert = PRINTED_ALERT.to_string();
            Effect::None
        }
        Action::Printed(Err(e)) => {
            warn!("Print failed: {}", e);
            view.error = e.to_string();
            Effect::None
        }
    }
}

fn handle_key(view: &mut EntryView, key: Key) -> Effect {
    // Quit is honoured in every mode.
    if KEYMAP.quit.matches(key) {
        view.mode = Mode::Exiting;
        return Effect::Quit;
    }
    if view.mode == Mode::AwaitingEditor {
        return Effect::None;
    }

    if KEYMAP.create.matches(key) {
        view.mode = Mode::AwaitingEditor;
        Effect::LaunchEditor {
            draft: view.draft.clone(),
        }
    } else if KEYMAP.back.matches(key) {
        Effect::Back
    } else if KEYMAP.print.matches(key) {
        Effect::Print {
            project_id: view.project.id,
        }
    } else {
        view.pager.handle_key(key);
        Effect::None
    }
}

// ============================================================================
// Effect execution
// ============================================================================

/// Collaborators used to carry out effects.
pub struct Services {
    pub entries: Rc<dyn EntryRepository>,
    pub exporter: Rc<dyn Exporter>,
}

impl Services {
    /// Run a repository or export effect and return its single result.
    /// `LaunchEditor`, `Back`, `Quit` and `None` are not handled here.
    pub fn perform(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::CreateEntry { project_id, body } => Some(Action::EntryCreated(
                self.entries.create_entry(project_id, &body),
            )),
            Effect::RefreshEntries { project_id } => Some(Action::EntriesRefreshed(
                self.entries.get_entries_by_project_id(project_id),
            )),
            Effect::Print { project_id } => {
                let result = self
                    .entries
                    .get_entries_by_project_id(project_id)
                    .map_err(ExportError::from)
                    .and_then(|entries| self.exporter.export(&entries));
                Some(Action::Printed(result))
            }
            Effect::LaunchEditor { .. } | Effect::Back | Effect::Quit | Effect::None => None,
        }
    }
}

/// What the caller should do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Back,
    Quit,
}

/// Feed `action` through `update` and keep executing effects until none
/// is left. `launch_editor` runs the editor synchronously with the draft.
pub fn dispatch<F>(
    view: &mut EntryView,
    action: Action,
    services: &Services,
    mut launch_editor: F,
) -> Outcome
where
    F: FnMut(&str) -> Result<String, EditorError>,
{
    let mut next = Some(action);
    while let Some(action) = next.take() {
        debug!("Dispatching {:?}", action);
        let effect = update(view, action);
        next = match effect {
            Effect::None => None,
            Effect::Back => return Outcome::Back,
            Effect::Quit => return Outcome::Quit,
            Effect::LaunchEditor { draft } => {
                Some(Action::EditorFinished(launch_editor(&draft)))
            }
            other => services.perform(other),
        };
    }
    Outcome::Continue
}
