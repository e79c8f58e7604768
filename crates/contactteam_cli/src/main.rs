//! `contactteam` command-line front end.
//!
//! # Responsibility
//! - Act as the presentation layer over `contactteam_core`.
//! - Keep per-invocation view state (query, tab, sort) out of the core.

mod app;
mod cli;
mod clipboard;
mod render;

use anyhow::{anyhow, bail};
use app::AppRoot;
use clap::Parser;
use cli::{Cli, Commands, ContactAction, ThemeCommands, ViewArgs};
use clipboard::SystemClipboard;
use contactteam_core::{
    attempt_login, call_uri, category_tabs, compute_view, copy_phone, display_phone,
    profile_link, resolve_route, Community, Contact, CopyOutcome, LoginOutcome, Route, Screen,
};
use render::{directory_out, print_directory, print_json, print_json_error, Palette, TabOut};
use serde_json::json;
use std::process::ExitCode;

const COPIED_LABEL: &str = "Nukopijuota!";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut root = AppRoot::bootstrap(&cli)?;

    match cli.command {
        Commands::Login { code } => match attempt_login(&root.directory, &code) {
            LoginOutcome::Navigate(route) => {
                if cli.json {
                    print_json(json!({ "route": route.path() }))?;
                } else {
                    println!("{route}");
                }
            }
            LoginOutcome::Rejected { message } => {
                if cli.json {
                    print_json_error(json!({ "message": message }))?;
                } else {
                    eprintln!("{message}");
                }
                return Ok(ExitCode::from(2));
            }
        },
        Commands::Open { path, view } => {
            return render_route(&root, &Route::parse(&path), &view, cli.json);
        }
        Commands::List { community, view } => {
            return render_route(&root, &Route::Community(community), &view, cli.json);
        }
        Commands::Tabs { community } => {
            let community = require_community(&root, &community)?;
            let tabs = category_tabs(community)
                .into_iter()
                .map(TabOut::from)
                .collect::<Vec<_>>();
            if cli.json {
                print_json(&tabs)?;
            } else {
                for tab in &tabs {
                    println!("{}\t{}", tab.token, tab.label);
                }
            }
        }
        Commands::Contact {
            community,
            category,
            contact,
            action,
        } => {
            let community = require_community(&root, &community)?;
            let contact = community
                .category(&category)
                .and_then(|category| category.contacts.iter().find(|c| c.id == contact))
                .ok_or_else(|| anyhow!("contact `{category}/{contact}` not found"))?;
            run_contact_action(contact, action, cli.json)?;
        }
        Commands::Theme { command } => {
            if let ThemeCommands::Toggle = command {
                if let Err(err) = root.theme.toggle() {
                    eprintln!("warning: {err}");
                }
            }
            let mode = root.theme.mode().as_str();
            if cli.json {
                print_json(json!({ "theme": mode, "darkMode": root.theme.is_dark() }))?;
            } else {
                println!("{mode}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn require_community<'a>(root: &'a AppRoot, id: &str) -> anyhow::Result<&'a Community> {
    root.directory
        .find_community_by_id(id)
        .ok_or_else(|| anyhow!("community `{id}` not found"))
}

fn render_route(
    root: &AppRoot,
    route: &Route,
    args: &ViewArgs,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let community = match resolve_route(&root.directory, route) {
        Screen::Directory(community) => community,
        Screen::Login => {
            let target = Route::Login;
            if json {
                print_json_error(json!({ "redirect": target.path() }))?;
            } else {
                eprintln!("redirect: {target}");
            }
            return Ok(ExitCode::from(2));
        }
    };

    let view = compute_view(community, &args.query, &args.category, args.sort);
    let out = directory_out(community, root.theme.mode(), &view);
    if json {
        print_json(&out)?;
    } else {
        print_directory(&out, &Palette::for_marker(root.theme.marker()));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_contact_action(contact: &Contact, action: ContactAction, json: bool) -> anyhow::Result<()> {
    match action {
        ContactAction::Show => {
            if json {
                print_json(render::ContactOut::from(contact))?;
            } else {
                println!("{}", contact.full_name());
                if let Some(phone) = contact.phone.as_deref() {
                    println!("phone: {}", display_phone(phone));
                }
                if let Some(role) = contact.role.as_deref() {
                    println!("role: {role}");
                }
                if let Some(secondary) = contact.secondary_role.as_deref() {
                    println!("secondary role: {secondary}");
                }
                if !contact.tags.is_empty() {
                    println!("tags: {}", contact.tags.join(", "));
                }
                if let Some(link) = profile_link(contact) {
                    println!("facebook: {link}");
                }
            }
        }
        ContactAction::Call => {
            let uri = call_uri(contact).ok_or_else(|| anyhow!("contact has no phone number"))?;
            if json {
                print_json(json!({ "uri": uri }))?;
            } else {
                println!("{uri}");
            }
        }
        ContactAction::Profile => {
            let link = profile_link(contact).ok_or_else(|| anyhow!("contact has no profile link"))?;
            if json {
                print_json(json!({ "url": link }))?;
            } else {
                println!("{link}");
            }
        }
        ContactAction::Copy => {
            let outcome = copy_phone(contact, &mut SystemClipboard::new());
            if outcome == CopyOutcome::NoPhone {
                bail!("contact has no phone number");
            }
            if json {
                let copied = outcome == CopyOutcome::Copied;
                print_json(json!({ "copied": copied }))?;
            } else if outcome == CopyOutcome::Copied {
                println!("{COPIED_LABEL}");
            }
        }
    }
    Ok(())
}
