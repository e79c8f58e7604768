//! Core logic for the ContactTeam community directory.
//! This crate is the single source of truth for lookup, filtering and
//! preference behavior; presentation layers only render its results.

pub mod actions;
pub mod directory;
pub mod logging;
pub mod model;
pub mod session;
pub mod theme;
pub mod view;

pub use actions::{
    call_uri, copy_phone, display_phone, profile_link, Clipboard, ClipboardError, CopyOutcome,
};
pub use directory::{DatasetError, DatasetResult, Directory};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::community::{Category, Community, Contact, Dataset, LEADER_ROLE};
pub use session::{
    attempt_login, logout, resolve_route, LoginOutcome, Route, Screen, INVALID_CODE_MESSAGE,
};
pub use theme::{
    MemoryPreferenceStore, ModeMarker, PreferenceError, PreferenceStore, RootModeFlag,
    SqlitePreferenceStore, SystemAppearance, ThemeContext, ThemeError, ThemeMode, ThemeSource,
    DARK_MODE_KEY, PREFERENCE_SCHEMA_VERSION,
};
pub use view::{
    category_tabs, compute_view, compute_view_with, lithuanian_cmp, CategoryScope, CategoryTab,
    CategoryView, DirectoryView, SortDirection, ViewParseError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
