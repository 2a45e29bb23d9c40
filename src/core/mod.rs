//! # Core Application Logic
//!
//! The entry view's state machine. It knows nothing about the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • EntryView (state)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. update() is     │
//!                    │  pure; effects run in   │
//!                    │  Services / the editor. │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Store    │      │  Export /  │
//!     │  Adapter   │      │  (SQLite)  │      │   Editor   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `EntryView` struct, all session state in one place
//! - [`action`]: The `Action` enum, the reducer and effect execution
//! - [`pager`]: Page index / total tracking
//! - [`keymap`]: Key bindings and help text
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod keymap;
pub mod pager;
pub mod state;
