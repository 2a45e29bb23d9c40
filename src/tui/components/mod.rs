//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that borrow everything they draw:
//! - `PagerDots`: page indicator under the entry
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state and react to events:
//! - `Viewport`: scrollable, soft-wrapped content area
//! - `ProjectListState` / `ProjectList`: project picker
//!
//! Each file holds the state type, its events, rendering and tests.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── pager_dots.rs    (• • • indicator)
//! ├── project_list.rs  (project picker)
//! └── viewport.rs      (entry content area)
//! ```

pub mod pager_dots;
pub mod project_list;
pub mod viewport;

pub use pager_dots::PagerDots;
pub use project_list::{ProjectEvent, ProjectList, ProjectListState};
pub use viewport::Viewport;
