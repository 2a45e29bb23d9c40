//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screens,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Screens
//!
//! - **Projects**: the project list, shown at start and after `esc`.
//! - **Entries**: one project's entries, driven by the core reducer.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms and only redraws after
//! an event. All pending events are drained before the next draw.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use std::io::{self, stdout};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, info, warn};
use ratatui::DefaultTerminal;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Text};

use crate::core::action::{Action, Outcome, Services, dispatch};
use crate::core::config::{ResolvedConfig, ThemeMode};
use crate::core::state::{EntryView, ViewportSize};
use crate::editor::{Editor, EditorError, SystemEditor};
use crate::error::AppError;
use crate::export::PandocExporter;
use crate::store::{Project, ProjectRepository, SqliteStore};
use crate::tui::component::EventHandler;
use crate::tui::components::{ProjectEvent, ProjectListState, Viewport};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::markdown::{MarkdownRenderer, Renderer};

const IDLE_POLL: Duration = Duration::from_millis(500);
const RENDER_FAILED_TEXT: &str = "[could not render entry]";

/// Presentation state for an open project.
pub struct EntryScreen {
    view: EntryView,
    viewport: Viewport,
    renderer: Box<dyn Renderer>,
    theme: ThemeMode,
    /// Markdown currently in the viewport.
    shown: Option<String>,
}

impl EntryScreen {
    fn new(view: EntryView, theme: ThemeMode) -> Self {
        Self::with_renderer(view, Box::new(MarkdownRenderer), theme)
    }

    fn with_renderer(view: EntryView, renderer: Box<dyn Renderer>, theme: ThemeMode) -> Self {
        let mut screen = Self {
            view,
            viewport: Viewport::default(),
            renderer,
            theme,
            shown: None,
        };
        screen.materialize();
        screen
    }

    /// Sync the viewport with the view. The size always follows; the
    /// content is only rebuilt (and the scroll reset) when the page shows
    /// something different.
    fn materialize(&mut self) {
        self.viewport
            .set_size(self.view.viewport.width, self.view.viewport.height);

        let markdown = self.view.page_markdown();
        if self.shown.as_deref() == Some(markdown.as_str()) {
            return;
        }
        match self.renderer.render(&markdown, self.theme) {
            Ok(text) => self.viewport.set_content(text),
            Err(e) => {
                warn!("Failed to render page {}: {}", self.view.pager.page(), e);
                self.view.error = format!("render failed: {}", e);
                self.viewport.set_content(Text::from(Line::styled(
                    RENDER_FAILED_TEXT,
                    Style::default().fg(Color::Red),
                )));
            }
        }
        self.shown = Some(markdown);
    }
}

/// Leaves raw mode and the alternate screen so a child process can own
/// the terminal. Dropping it takes the terminal back.
struct SuspendedTerminal {
    resume: fn(),
}

impl SuspendedTerminal {
    fn new() -> io::Result<Self> {
        Self::with(leave_terminal, resume_terminal)
    }

    /// The guard exists before `suspend` runs, so a half-done suspend is
    /// still undone.
    fn with(suspend: impl FnOnce() -> io::Result<()>, resume: fn()) -> io::Result<Self> {
        let guard = Self { resume };
        suspend()?;
        debug!("Terminal suspended");
        Ok(guard)
    }
}

impl Drop for SuspendedTerminal {
    fn drop(&mut self) {
        (self.resume)();
        debug!("Terminal resumed");
    }
}

fn leave_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, Show)
}

fn resume_terminal() {
    let _ = enable_raw_mode();
    let _ = execute!(stdout(), EnterAlternateScreen, Hide);
}

/// Run `editor` with the TUI suspended, then force a full repaint.
fn run_editor(
    terminal: &mut DefaultTerminal,
    editor: &dyn Editor,
    draft: &str,
) -> Result<String, EditorError> {
    let result = {
        let _suspended = SuspendedTerminal::new().map_err(EditorError::Terminal)?;
        editor.launch(draft)
    };
    terminal.clear().map_err(EditorError::Terminal)?;
    result
}

pub fn run(config: &ResolvedConfig, store: Rc<SqliteStore>) -> Result<(), AppError> {
    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, config, store);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    config: &ResolvedConfig,
    store: Rc<SqliteStore>,
) -> Result<(), AppError> {
    let services = Services {
        entries: store.clone(),
        exporter: Rc::new(PandocExporter::new(
            config.pandoc.clone(),
            config.pdf_output.clone(),
        )),
    };
    let editor = SystemEditor::new(config.editor.clone());

    let mut projects = ProjectListState::new(store.get_all_projects()?);
    let mut entries: Option<EntryScreen> = None;
    let mut needs_redraw = true;

    info!("TUI started with {} projects", projects.projects.len());

    loop {
        if needs_redraw {
            terminal.draw(|f| match entries.as_mut() {
                Some(screen) => ui::draw_entries(f, screen),
                None => ui::draw_projects(f, &mut projects),
            })?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL)?;
        let pending = std::iter::from_fn(|| poll_event_immediate().ok().flatten());

        for event in first_event.into_iter().chain(pending) {
            needs_redraw = true;

            let Some(screen) = entries.as_mut() else {
                match projects.handle_event(&event) {
                    Some(ProjectEvent::Open(project)) => {
                        entries = Some(open_project(terminal, &store, project, config)?);
                    }
                    Some(ProjectEvent::Quit) => return Ok(()),
                    None => {}
                }
                continue;
            };

            if screen.viewport.handle_event(&event).is_some() {
                continue;
            }

            let action = match event {
                TuiEvent::Key(key) => Action::Key(key),
                TuiEvent::Resize(width, height) => Action::Resize { width, height },
            };
            let outcome = dispatch(&mut screen.view, action, &services, |draft| {
                info!("Launching editor '{}'", editor.command);
                run_editor(terminal, &editor, draft)
            });
            screen.materialize();

            match outcome {
                Outcome::Continue => {}
                Outcome::Back => {
                    entries = None;
                    reload_projects(&mut projects, store.as_ref());
                }
                Outcome::Quit => {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }
    }
}

fn open_project(
    terminal: &DefaultTerminal,
    store: &SqliteStore,
    project: Project,
    config: &ResolvedConfig,
) -> Result<EntryScreen, AppError> {
    let size = terminal.size()?;
    let view = EntryView::load(
        store,
        project,
        ViewportSize::for_terminal(size.width, size.height),
    )?
    .with_editor_failure(config.editor_failure);
    Ok(EntryScreen::new(view, config.theme))
}

/// Refresh the list after leaving an entry view. A failure keeps the old
/// list and is shown on the screen.
fn reload_projects(projects: &mut ProjectListState, repo: &dyn ProjectRepository) {
    match repo.get_all_projects() {
        Ok(list) => projects.set_projects(list),
        Err(e) => {
            warn!("Failed to reload projects: {}", e);
            projects.set_error(format!("could not reload projects: {}", e));
        }
    }
}
