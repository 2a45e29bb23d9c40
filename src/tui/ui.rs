use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::config::ThemeMode;
use crate::core::keymap::KEYMAP;
use crate::tui::EntryScreen;
use crate::tui::component::Component;
use crate::tui::components::{PagerDots, ProjectList, ProjectListState};

pub fn draw_projects(frame: &mut Frame, state: &mut ProjectListState) {
    ProjectList::new(state).render(frame, frame.area());
}

/// Entry screen: the content on top, then the chrome rows. The content
/// height comes from the view state; the chrome gets what is left, filled
/// in order status (project, dots, alert), error, help. A short terminal
/// loses the help line before it loses an error.
pub fn draw_entries(frame: &mut Frame, screen: &mut EntryScreen) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(screen.view.viewport.height), Min(0)]);
    let [content_area, chrome_area] = layout.areas(frame.area());

    screen.viewport.render(frame, content_area);

    let mut status = vec![
        Span::styled(
            screen.view.project.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    status.extend(PagerDots::new(&screen.view.pager, screen.theme).line().spans);
    if !screen.view.alert.is_empty() {
        status.push(Span::raw("  "));
        status.push(Span::styled(
            screen.view.alert.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let mut chrome = vec![Line::from(status)];
    if !screen.view.error.is_empty() {
        chrome.push(Line::styled(
            screen.view.error.clone(),
            Style::default().fg(Color::Red),
        ));
    }
    chrome.push(Line::styled(
        KEYMAP.help_line(),
        Style::default().fg(muted_color(screen.theme)),
    ));
    frame.render_widget(Paragraph::new(chrome), chrome_area);
}

fn muted_color(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Dark => Color::Indexed(241),
        ThemeMode::Light => Color::Indexed(246),
    }
}
