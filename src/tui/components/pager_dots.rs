//! Dot-style page indicator: one `•` per page, the current one highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::config::ThemeMode;
use crate::core::pager::Pager;
use crate::tui::component::Component;

const DOT: &str = "•";

pub struct PagerDots<'a> {
    pager: &'a Pager,
    mode: ThemeMode,
}

impl<'a> PagerDots<'a> {
    pub fn new(pager: &'a Pager, mode: ThemeMode) -> Self {
        Self { pager, mode }
    }

    fn colors(&self) -> (Color, Color) {
        match self.mode {
            ThemeMode::Dark => (Color::Indexed(252), Color::Indexed(238)),
            ThemeMode::Light => (Color::Indexed(235), Color::Indexed(250)),
        }
    }

    pub fn line(&self) -> Line<'static> {
        let (active, inactive) = self.colors();
        let current = self.pager.page();
        Line::from(
            (0..self.pager.total())
                .map(|i| {
                    let color = if i == current { active } else { inactive };
                    Span::styled(DOT, Style::default().fg(color))
                })
                .collect::<Vec<_>>(),
        )
    }
}

impl Component for PagerDots<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.pager.total() == 0 {
            return;
        }
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_one_dot_per_page() {
        let mut pager = Pager::new(3);
        pager.set_page(1);
        let line = PagerDots::new(&pager, ThemeMode::Dark).line();
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].style.fg, Some(Color::Indexed(252)));
        assert_eq!(line.spans[0].style.fg, Some(Color::Indexed(238)));
    }

    #[test]
    fn test_light_palette() {
        let pager = Pager::new(2);
        let line = PagerDots::new(&pager, ThemeMode::Light).line();
        assert_eq!(line.spans[0].style.fg, Some(Color::Indexed(235)));
        assert_eq!(line.spans[1].style.fg, Some(Color::Indexed(250)));
    }

    #[test]
    fn test_no_pages_draws_nothing() {
        let pager = Pager::new(0);
        let mut terminal = Terminal::new(TestBackend::new(5, 1)).unwrap();
        terminal
            .draw(|f| PagerDots::new(&pager, ThemeMode::Dark).render(f, f.area()))
            .unwrap();
        assert!(
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .all(|c| c.symbol() == " ")
        );
    }

    #[test]
    fn test_draws_dots() {
        let pager = Pager::new(3);
        let mut terminal = Terminal::new(TestBackend::new(5, 1)).unwrap();
        terminal
            .draw(|f| PagerDots::new(&pager, ThemeMode::Dark).render(f, f.area()))
            .unwrap();
        let dots = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|c| c.symbol() == DOT)
            .count();
        assert_eq!(dots, 3);
    }
}
