//! # Project List Component
//!
//! Full-screen list of projects. Enter opens the selected project's
//! entry view, q quits.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ProjectListState` lives on the project screen
//! - `ProjectList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::keymap::Key;
use crate::store::Project;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const HELP_TEXT: &str = " ↑/k ↓/j Move  Enter Open  q Quit ";

/// Persistent state for the project list.
pub struct ProjectListState {
    pub projects: Vec<Project>,
    pub selected: usize,
    pub list_state: ListState,
    /// Last failure to show under the list; empty when there is none.
    pub error: String,
}

impl ProjectListState {
    pub fn new(projects: Vec<Project>) -> Self {
        let mut list_state = ListState::default();
        if !projects.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            projects,
            selected: 0,
            list_state,
            error: String::new(),
        }
    }

    /// Swap in a fresh project list, keeping the selection when possible.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.error.clear();
        if self.projects.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.projects.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = error.into();
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.selected)
    }
}

/// Events emitted by the project list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectEvent {
    Open(Project),
    Quit,
}

impl EventHandler for ProjectListState {
    type Event = ProjectEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ProjectEvent> {
        let TuiEvent::Key(key) = *event else {
            return None;
        };
        match key {
            Key::Char('q') | Key::Interrupt => Some(ProjectEvent::Quit),
            Key::Up | Key::Char('k') => {
                if !self.projects.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            Key::Down | Key::Char('j') => {
                if !self.projects.is_empty() {
                    self.selected = (self.selected + 1).min(self.projects.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            Key::Enter => self.selected_project().cloned().map(ProjectEvent::Open),
            _ => None,
        }
    }
}

/// Transient render wrapper for the project list.
pub struct ProjectList<'a> {
    state: &'a mut ProjectListState,
}

impl<'a> ProjectList<'a> {
    pub fn new(state: &'a mut ProjectListState) -> Self {
        Self { state }
    }
}

impl Component for ProjectList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = if self.state.error.is_empty() {
            area
        } else {
            let [list_area, error_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
            frame.render_widget(
                Paragraph::new(self.state.error.as_str()).style(Style::default().fg(Color::Red)),
                error_area,
            );
            list_area
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Projects ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(HELP_TEXT).centered())
            .padding(Padding::horizontal(1));

        if self.state.projects.is_empty() {
            let empty = Paragraph::new("No projects yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .projects
            .iter()
            .enumerate()
            .map(|(i, project)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let date = project
                    .created_at
                    .with_timezone(&chrono::Local)
                    .format("%b %d")
                    .to_string();
                ListItem::new(Line::from(vec![
                    Span::styled(date, style),
                    Span::styled("  ", style),
                    Span::styled(project.name.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
