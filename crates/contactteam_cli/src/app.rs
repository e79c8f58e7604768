//! Application root: resolved configuration, dataset and theme context.
//!
//! # Responsibility
//! - Turn CLI flags and environment into one immutable configuration.
//! - Own the single `ThemeContext` and pass it to rendering explicitly.

use crate::cli::Cli;
use anyhow::Context;
use contactteam_core::{
    default_log_level, init_logging, Directory, RootModeFlag, SqlitePreferenceStore,
    SystemAppearance, ThemeContext,
};
use log::info;
use std::path::PathBuf;

const STATE_DB_FILE_NAME: &str = "contactteam.sqlite3";
const STATE_DIR_NAME: &str = "contactteam";
const PREFERS_DARK_ENV: &str = "CONTACTTEAM_PREFERS_DARK";

pub type Theme = ThemeContext<SqlitePreferenceStore, RootModeFlag>;

/// Reads the "prefers dark" signal from `CONTACTTEAM_PREFERS_DARK`.
pub struct EnvAppearance;

impl SystemAppearance for EnvAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        parse_flag(&std::env::var(PREFERS_DARK_ENV).ok()?)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "dark" => Some(true),
        "0" | "false" | "no" | "light" => Some(false),
        _ => None,
    }
}

pub struct AppRoot {
    pub directory: Directory,
    pub theme: Theme,
}

impl AppRoot {
    pub fn bootstrap(cli: &Cli) -> anyhow::Result<Self> {
        if let Some(log_dir) = cli.log_dir.as_deref() {
            let level = cli.log_level.as_deref().unwrap_or(default_log_level());
            init_logging(level, log_dir).context("failed to initialize logging")?;
        }

        let directory = match cli.data.as_ref() {
            Some(path) => Directory::from_path(path)
                .with_context(|| format!("failed to load dataset `{}`", path.display()))?,
            None => Directory::bundled().context("bundled dataset is invalid")?,
        };

        let state_dir = cli
            .state_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(STATE_DIR_NAME));
        let theme = load_theme(state_dir)?;

        info!(
            "event=app_bootstrap module=cli status=ok communities={} theme={}",
            directory.communities().len(),
            theme.mode().as_str()
        );
        Ok(Self { directory, theme })
    }
}

fn load_theme(state_dir: PathBuf) -> anyhow::Result<Theme> {
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("failed to create state dir `{}`", state_dir.display()))?;
    let store = SqlitePreferenceStore::open(state_dir.join(STATE_DB_FILE_NAME))
        .context("failed to open preference store")?;
    Ok(ThemeContext::load(
        store,
        RootModeFlag::default(),
        &EnvAppearance,
    ))
}
