//! # TUI Components
//!
//! - `ListController`: the one generic, type-erased drill-down list.
//! - `TitleBar`: breadcrumb and loading indicator.
//!
//! Components receive external data as props and keep only presentation
//! state of their own, so they can be rendered against a `TestBackend`.

pub mod list_view;
mod title_bar;

pub use list_view::{ListController, ListEvent, ListSource};
pub use title_bar::TitleBar;
