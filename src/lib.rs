//! pjs: a terminal journal, one project at a time.

pub mod core;
pub mod editor;
pub mod error;
pub mod export;
pub mod store;
pub mod tui;

#[cfg(test)]
pub mod test_support;
