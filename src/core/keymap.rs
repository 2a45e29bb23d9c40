//! Key bindings for the entry view.
//!
//! Keys are described with a small terminal-agnostic [`Key`] type so the
//! reducer never sees crossterm types. The help line is generated from the
//! same bindings that drive dispatch.

/// A single key press, as far as the core cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Esc,
    /// Ctrl+C
    Interrupt,
}

#[derive(Debug, Clone, Copy)]
pub struct Binding {
    keys: &'static [Key],
    pub help_key: &'static str,
    pub help_desc: &'static str,
}

impl Binding {
    pub const fn new(
        keys: &'static [Key],
        help_key: &'static str,
        help_desc: &'static str,
    ) -> Self {
        Self {
            keys,
            help_key,
            help_desc,
        }
    }

    pub fn matches(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    pub prev_page: Binding,
    pub next_page: Binding,
    pub scroll_up: Binding,
    pub scroll_down: Binding,
    pub back: Binding,
    pub create: Binding,
    pub print: Binding,
    pub quit: Binding,
}

pub const KEYMAP: Keymap = Keymap {
    prev_page: Binding::new(&[Key::Left, Key::Char('h'), Key::PageUp], "←/h", "prev"),
    next_page: Binding::new(&[Key::Right, Key::Char('l'), Key::PageDown], "→/l", "next"),
    scroll_up: Binding::new(&[Key::Up, Key::Char('k')], "↑/k", "scroll"),
    scroll_down: Binding::new(&[Key::Down, Key::Char('j')], "↓/j", "scroll"),
    back: Binding::new(&[Key::Esc], "esc", "back"),
    create: Binding::new(&[Key::Char('c')], "c", "create"),
    print: Binding::new(&[Key::Char('p')], "p", "print"),
    quit: Binding::new(&[Key::Char('q'), Key::Interrupt], "q", "quit"),
};

impl Keymap {
    /// One-line help text, e.g. `←/h prev  →/l next  ↑/k ↓/j scroll ...`.
    /// Adjacent bindings with the same description share one item.
    pub fn help_line(&self) -> String {
        let mut items: Vec<(String, &str)> = Vec::new();
        for binding in [
            self.prev_page,
            self.next_page,
            self.scroll_up,
            self.scroll_down,
            self.create,
            self.print,
            self.back,
            self.quit,
        ] {
            match items.last_mut() {
                Some((keys, desc)) if *desc == binding.help_desc => {
                    keys.push(' ');
                    keys.push_str(binding.help_key);
                }
                _ => items.push((binding.help_key.to_string(), binding.help_desc)),
            }
        }
        items
            .iter()
            .map(|(keys, desc)| format!("{} {}", keys, desc))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_matches_q_and_interrupt() {
        assert!(KEYMAP.quit.matches(Key::Char('q')));
        assert!(KEYMAP.quit.matches(Key::Interrupt));
        assert!(!KEYMAP.quit.matches(Key::Esc));
    }

    #[test]
    fn test_no_key_is_bound_twice() {
        let all = [
            KEYMAP.prev_page,
            KEYMAP.next_page,
            KEYMAP.scroll_up,
            KEYMAP.scroll_down,
            KEYMAP.back,
            KEYMAP.create,
            KEYMAP.print,
            KEYMAP.quit,
        ];
        let mut seen = Vec::new();
        for binding in all {
            for key in binding.keys {
                assert!(!seen.contains(key), "{:?} bound twice", key);
                seen.push(*key);
            }
        }
    }

    #[test]
    fn test_help_line_lists_every_action() {
        let help = KEYMAP.help_line();
        for word in ["prev", "next", "scroll", "back", "create", "print", "quit"] {
            assert!(help.contains(word), "help missing {word}: {help}");
        }
    }

    #[test]
    fn test_help_line_fits_80_columns() {
        let help = KEYMAP.help_line();
        assert!(help.chars().count() <= 80, "{} columns: {help}", help.chars().count());
        assert!(help.ends_with("q quit"));
        assert!(help.contains("↑/k ↓/j scroll"));
        assert_eq!(help.matches("scroll").count(), 1);
    }
}
