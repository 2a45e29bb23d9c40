//! # Pager
//!
//! Tracks which page is showing out of how many. One entry per page, so
//! page N is entry N. Movement is clamped at both ends; there is no
//! wraparound.

use super::keymap::{KEYMAP, Key};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    total: usize,
}

impl Pager {
    pub fn new(total: usize) -> Self {
        Self { page: 0, total }
    }

    /// Set the page count. Shrinking below the current page clamps it to
    /// the new last page (or 0 when empty).
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page = self.page.min(total.saturating_sub(1));
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Active index; 0 when there are no pages.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Active index, or `None` when there is nothing to show.
    pub fn current(&self) -> Option<usize> {
        (self.total > 0).then_some(self.page)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total.saturating_sub(1));
    }

    pub fn on_last_page(&self) -> bool {
        self.page + 1 >= self.total
    }

    pub fn advance(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    pub fn retreat(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Page navigation for keys the controller doesn't claim.
    /// Returns true if the key was a navigation key.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if KEYMAP.next_page.matches(key) {
            self.advance();
            true
        } else if KEYMAP.prev_page.matches(key) {
            self.retreat();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_first_page() {
        let pager = Pager::new(3);
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.current(), Some(0));
        assert_eq!(pager.total(), 3);
    }

    #[test]
    fn test_empty_pager_has_no_current_page() {
        let pager = Pager::new(0);
        assert_eq!(pager.current(), None);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_advance_past_last_is_noop() {
        let mut pager = Pager::new(2);
        pager.advance();
        assert_eq!(pager.page(), 1);
        pager.advance();
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_retreat_before_first_is_noop() {
        let mut pager = Pager::new(2);
        pager.retreat();
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_navigation_on_empty_stays_at_zero() {
        let mut pager = Pager::new(0);
        pager.advance();
        pager.retreat();
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.current(), None);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut pager = Pager::new(5);
        pager.set_page(4);
        pager.set_total(2);
        assert_eq!(pager.page(), 1);
        pager.set_total(0);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_growing_total_keeps_page() {
        let mut pager = Pager::new(2);
        pager.advance();
        pager.set_total(3);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_set_page_is_clamped() {
        let mut pager = Pager::new(3);
        pager.set_page(10);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_handle_key_navigation() {
        let mut pager = Pager::new(3);
        assert!(pager.handle_key(Key::Right));
        assert!(pager.handle_key(Key::Char('l')));
        assert_eq!(pager.page(), 2);
        assert!(pager.handle_key(Key::PageUp));
        assert!(pager.handle_key(Key::Char('h')));
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_handle_key_ignores_other_keys() {
        let mut pager = Pager::new(3);
        assert!(!pager.handle_key(Key::Char('x')));
        assert!(!pager.handle_key(Key::Enter));
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_navigation_never_leaves_bounds() {
        for total in 0..6usize {
            let mut pager = Pager::new(total);
            let keys = [Key::Right, Key::Right, Key::Left, Key::Right, Key::Right,
                Key::Right, Key::Right, Key::Left, Key::Left, Key::Left, Key::Left];
            for key in keys {
                pager.handle_key(key);
                if total == 0 {
                    assert_eq!(pager.current(), None);
                } else {
                    assert!(pager.page() < total);
                }
            }
        }
    }
}
