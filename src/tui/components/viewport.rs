//! # Viewport Component
//!
//! Fixed-size, scrollable display buffer for one page of rendered text.
//!
//! The viewport does not decide what it shows. The parent hands it styled
//! text with [`Viewport::set_content`]; ratatui word-wraps it to the width
//! and the viewport shows `height` lines starting at the scroll offset.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::core::keymap::KEYMAP;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct Viewport {
    width: u16,
    height: u16,
    content: Text<'static>,
    offset: usize,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Resize without touching the content. The offset is re-clamped.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Replace the content and scroll back to the top.
    pub fn set_content(&mut self, content: Text<'static>) {
        self.content = content;
        self.offset = 0;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    fn paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.content.clone()).wrap(Wrap { trim: false })
    }

    /// Number of rows the content takes once wrapped to `width`.
    pub fn wrapped_height(&self) -> usize {
        if self.width == 0 {
            return 0;
        }
        self.paragraph().line_count(self.width)
    }

    fn max_offset(&self) -> usize {
        self.wrapped_height().saturating_sub(self.height as usize)
    }

    /// Draw the visible slice into `buf`, clipped to `area` and to the
    /// viewport's own size.
    pub fn draw(&self, area: Rect, buf: &mut Buffer) {
        let area = Rect {
            width: area.width.min(self.width),
            height: area.height.min(self.height),
            ..area
        };
        if area.is_empty() {
            return;
        }
        let offset = u16::try_from(self.offset).unwrap_or(u16::MAX);
        self.paragraph().scroll((offset, 0)).render(area, buf);
    }
}

impl Component for Viewport {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.draw(area, frame.buffer_mut());
    }
}

impl EventHandler for Viewport {
    type Event = ();

    /// Scroll keys are consumed here; anything else is left for the caller.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let TuiEvent::Key(key) = *event else {
            return None;
        };
        if KEYMAP.scroll_up.matches(key) {
            self.scroll_up(1);
            Some(())
        } else if KEYMAP.scroll_down.matches(key) {
            self.scroll_down(1);
            Some(())
        } else {
            None
        }
    }
}
