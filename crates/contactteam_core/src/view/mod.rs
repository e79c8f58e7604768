//! Filter, sort and group pipeline for the contact list.
//!
//! # Responsibility
//! - Turn one community plus per-session UI state (query, tab, sort order)
//!   into the ordered, grouped view model consumed by rendering.
//! - Keep the pipeline pure so it can run on every keystroke.
//!
//! # Invariants
//! - No category in a view has zero contacts.
//! - Leaders precede members in every category regardless of direction.
//! - Surviving categories keep dataset order.
//! - The query is lowercased but never trimmed here.

pub mod collation;
mod engine;

pub use collation::lithuanian_cmp;
pub use engine::{
    category_tabs, compute_view, compute_view_with, CategoryScope, CategoryTab, CategoryView,
    DirectoryView, SortDirection, ViewParseError, ALL_CATEGORIES_TOKEN, ALL_TAB_LABEL,
};
