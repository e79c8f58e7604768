use clap::{Parser, Subcommand, ValueEnum};
use contactteam_core::{CategoryScope, SortDirection};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contactteam", version, about = "Community contact directory")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "CONTACTTEAM_DATA",
        help = "Dataset JSON file (defaults to the bundled dataset)"
    )]
    pub data: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "CONTACTTEAM_STATE_DIR",
        help = "Directory holding the local preference store"
    )]
    pub state_dir: Option<PathBuf>,
    #[arg(long, global = true, env = "CONTACTTEAM_LOG_LEVEL")]
    pub log_level: Option<String>,
    #[arg(
        long,
        global = true,
        env = "CONTACTTEAM_LOG_DIR",
        help = "Absolute directory for rolling logs (logging is off when unset)"
    )]
    pub log_dir: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve an access code to its community route.
    Login { code: String },
    /// Render the directory behind a route such as `/community/<id>`.
    Open {
        path: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Render the directory of one community.
    List {
        community: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// List the category tabs of one community.
    Tabs { community: String },
    /// Act on one contact.
    Contact {
        community: String,
        category: String,
        contact: String,
        #[arg(long, value_enum, default_value_t = ContactAction::Show)]
        action: ContactAction,
    },
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    #[arg(long, short, default_value = "")]
    pub query: String,
    #[arg(long, short, default_value = "all", value_parser = parse_scope)]
    pub category: CategoryScope,
    #[arg(long, short, default_value = "asc", value_parser = parse_direction)]
    pub sort: SortDirection,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    Show,
    Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContactAction {
    Show,
    Call,
    Copy,
    Profile,
}

fn parse_scope(value: &str) -> Result<CategoryScope, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn parse_direction(value: &str) -> Result<SortDirection, String> {
    value.parse().map_err(|err| format!("{err}"))
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};
    use contactteam_core::{CategoryScope, SortDirection};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_parses_view_tokens() {
        let cli = Cli::parse_from([
            "contactteam",
            "list",
            "vka",
            "--query",
            "kaz",
            "--category",
            "elniai",
            "--sort",
            "desc",
        ]);
        match cli.command {
            Commands::List { community, view } => {
                assert_eq!(community, "vka");
                assert_eq!(view.query, "kaz");
                assert_eq!(view.category, CategoryScope::Only("elniai".to_string()));
                assert_eq!(view.sort, SortDirection::Desc);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_sort_direction() {
        assert!(Cli::try_parse_from(["contactteam", "list", "vka", "--sort", "up"]).is_err());
    }
}
