//! Text and JSON rendering of core view models.

use contactteam_core::{
    call_uri, display_phone, Category, CategoryTab, Community, Contact, DirectoryView,
    RootModeFlag, ThemeMode,
};
use serde::Serialize;
use std::io::IsTerminal;

const EMPTY_STATE_TITLE: &str = "Kontaktų nerasta";
const EMPTY_STATE_HINT: &str =
    "Pabandykite pakeisti paieškos užklausą arba pasirinkite kitą kategoriją.";

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Failure envelope; `error` carries the details.
#[derive(Serialize)]
pub struct JsonError<T: Serialize> {
    pub ok: bool,
    pub error: T,
}

pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

pub fn print_json_error<T: Serialize>(error: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonError { ok: false, error })?
    );
    Ok(())
}

/// ANSI styling keyed off the root mode flag; plain when not a terminal.
pub struct Palette {
    heading: &'static str,
    muted: &'static str,
    reset: &'static str,
}

impl Palette {
    pub fn for_marker(marker: &RootModeFlag) -> Self {
        if !std::io::stdout().is_terminal() {
            return Self {
                heading: "",
                muted: "",
                reset: "",
            };
        }
        if marker.is_set() {
            Self {
                heading: "\x1b[1;96m",
                muted: "\x1b[37m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                heading: "\x1b[1;34m",
                muted: "\x1b[90m",
                reset: "\x1b[0m",
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactOut<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_role: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub tags: &'a [String],
}

impl<'a> From<&'a Contact> for ContactOut<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            id: &contact.id,
            first_name: &contact.first_name,
            last_name: &contact.last_name,
            phone: contact.phone.as_deref(),
            display_phone: contact.phone.as_deref().map(display_phone),
            role: contact.role.as_deref(),
            call_uri: call_uri(contact),
            facebook: contact.facebook.as_deref(),
            secondary_role: contact.secondary_role.as_deref(),
            tags: &contact.tags,
        }
    }
}

#[derive(Serialize)]
pub struct CategoryOut<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub label: &'a str,
    pub leaders: Vec<ContactOut<'a>>,
    pub members: Vec<ContactOut<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOut<'a> {
    pub community_id: &'a str,
    pub community_name: &'a str,
    pub logo_path: &'a str,
    pub theme: &'static str,
    pub empty: bool,
    pub categories: Vec<CategoryOut<'a>>,
}

pub fn directory_out<'a>(
    community: &'a Community,
    theme: ThemeMode,
    view: &DirectoryView<'a>,
) -> DirectoryOut<'a> {
    DirectoryOut {
        community_id: &community.id,
        community_name: &community.name,
        logo_path: &community.logo_path,
        theme: theme.as_str(),
        empty: view.is_empty(),
        categories: view
            .categories
            .iter()
            .map(|category| {
                let record: &'a Category = category.category;
                CategoryOut {
                    id: &record.id,
                    name: &record.name,
                    label: record.label(),
                    leaders: category.leaders().iter().map(|c| ContactOut::from(*c)).collect(),
                    members: category.members().iter().map(|c| ContactOut::from(*c)).collect(),
                }
            })
            .collect(),
    }
}

pub fn print_directory(out: &DirectoryOut<'_>, palette: &Palette) {
    println!("{}{}{}", palette.heading, out.community_name, palette.reset);

    if out.empty {
        println!();
        println!("{EMPTY_STATE_TITLE}");
        println!("{}{EMPTY_STATE_HINT}{}", palette.muted, palette.reset);
        return;
    }

    for category in &out.categories {
        println!();
        println!("{}{}{}", palette.heading, category.name, palette.reset);
        for contact in category.leaders.iter().chain(category.members.iter()) {
            println!("  {}", contact_line(contact, category.label, palette));
        }
    }
}

fn contact_line(contact: &ContactOut<'_>, label: &str, palette: &Palette) -> String {
    let mut line = format!("{} {}", contact.first_name, contact.last_name);
    if let Some(role) = contact.role {
        line.push_str(&format!(" [{role}]"));
    }
    if let Some(secondary) = contact.secondary_role {
        line.push_str(&format!(" [{secondary}]"));
    }
    if !contact.tags.is_empty() {
        line.push_str(&format!(" #{}", contact.tags.join(" #")));
    }
    line.push_str(&format!("\t{label}"));
    match contact.display_phone.as_deref() {
        Some(phone) => line.push_str(&format!("\t{phone}")),
        None => line.push_str(&format!("\t{}-{}", palette.muted, palette.reset)),
    }
    line
}

#[derive(Serialize)]
pub struct TabOut<'a> {
    pub token: &'a str,
    pub label: &'a str,
}

impl<'a> From<CategoryTab<'a>> for TabOut<'a> {
    fn from(tab: CategoryTab<'a>) -> Self {
        Self {
            token: tab.token,
            label: tab.label,
        }
    }
}
