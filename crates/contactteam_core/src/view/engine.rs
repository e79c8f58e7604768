//! `compute_view` and its request/response types.

use super::collation::lithuanian_cmp;
use crate::model::community::{Category, Community, Contact};
use log::debug;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Tab token selecting every category.
pub const ALL_CATEGORIES_TOKEN: &str = "all";
/// Display label of the "all" tab.
pub const ALL_TAB_LABEL: &str = "Visi";

/// Which categories are eligible for the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryScope {
    #[default]
    All,
    /// Exactly one category, by id.
    Only(String),
}

impl CategoryScope {
    fn admits(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(category_id) => category.id == *category_id,
        }
    }

    /// Tab token for this scope.
    pub fn as_token(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_TOKEN,
            Self::Only(category_id) => category_id,
        }
    }
}

impl FromStr for CategoryScope {
    type Err = ViewParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" => Err(ViewParseError::EmptyCategory),
            ALL_CATEGORIES_TOKEN => Ok(Self::All),
            category_id => Ok(Self::Only(category_id.to_string())),
        }
    }
}

/// Direction of the name ordering. Does not affect leader-first placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the opposite direction (sort toggle button).
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ViewParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ViewParseError::UnsupportedDirection(other.to_string())),
        }
    }
}

/// Parse errors for view request tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewParseError {
    EmptyCategory,
    UnsupportedDirection(String),
}

impl Display for ViewParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "category token must not be empty"),
            Self::UnsupportedDirection(value) => {
                write!(f, "unsupported sort direction `{value}`; expected asc|desc")
            }
        }
    }
}

impl Error for ViewParseError {}

/// One surviving category and its ordered contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView<'a> {
    pub category: &'a Category,
    contacts: Vec<&'a Contact>,
    leader_count: usize,
}

impl<'a> CategoryView<'a> {
    /// All retained contacts: leaders first, then members.
    pub fn contacts(&self) -> &[&'a Contact] {
        &self.contacts
    }

    /// Retained contacts with the leader role.
    pub fn leaders(&self) -> &[&'a Contact] {
        &self.contacts[..self.leader_count]
    }

    /// Retained contacts without the leader role.
    pub fn members(&self) -> &[&'a Contact] {
        &self.contacts[self.leader_count..]
    }
}

/// Ordered, grouped view model for one community.
///
/// An empty view is a valid state (render "no contacts found").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryView<'a> {
    pub categories: Vec<CategoryView<'a>>,
}

impl DirectoryView<'_> {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contact_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.contacts.len())
            .sum()
    }
}

/// One entry of the category tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTab<'a> {
    /// Token accepted by `CategoryScope::from_str`.
    pub token: &'a str,
    pub label: &'a str,
}

/// Lists the tab strip: "all" first, then categories in dataset order.
pub fn category_tabs(community: &Community) -> Vec<CategoryTab<'_>> {
    std::iter::once(CategoryTab {
        token: ALL_CATEGORIES_TOKEN,
        label: ALL_TAB_LABEL,
    })
    .chain(community.categories.iter().map(|category| CategoryTab {
        token: category.id.as_str(),
        label: category.name.as_str(),
    }))
    .collect()
}

/// Computes the view model using Lithuanian collation for names.
pub fn compute_view<'a>(
    community: &'a Community,
    query: &str,
    scope: &CategoryScope,
    direction: SortDirection,
) -> DirectoryView<'a> {
    compute_view_with(community, query, scope, direction, lithuanian_cmp)
}

/// Computes the view model with a caller-provided name comparator.
///
/// # Contract
/// - Pure: inputs are borrowed immutably, the result is a new structure.
/// - A contact matches when the lowercased query is a substring of its
///   lowercased first or last name, or of its raw phone number.
/// - A contact without a phone can only match by name.
pub fn compute_view_with<'a, C>(
    community: &'a Community,
    query: &str,
    scope: &CategoryScope,
    direction: SortDirection,
    collate: C,
) -> DirectoryView<'a>
where
    C: Fn(&str, &str) -> Ordering,
{
    let needle = query.to_lowercase();

    let categories = community
        .categories
        .iter()
        .filter(|category| scope.admits(category))
        .filter_map(|category| {
            let mut keyed = category
                .contacts
                .iter()
                .filter(|contact| matches_query(contact, &needle))
                .map(|contact| (contact.full_name().to_lowercase(), contact))
                .collect::<Vec<_>>();
            if keyed.is_empty() {
                return None;
            }

            keyed.sort_by(|(left_key, left), (right_key, right)| {
                right
                    .is_leader()
                    .cmp(&left.is_leader())
                    .then_with(|| direction.apply(collate(left_key.as_str(), right_key.as_str())))
            });

            let contacts = keyed
                .into_iter()
                .map(|(_, contact)| contact)
                .collect::<Vec<_>>();
            let leader_count = contacts.iter().take_while(|c| c.is_leader()).count();
            Some(CategoryView {
                category,
                contacts,
                leader_count,
            })
        })
        .collect::<Vec<_>>();

    let view = DirectoryView { categories };
    debug!(
        "event=view_compute module=view status=ok community_id={} scope={} direction={} query_len={} categories={} contacts={}",
        community.id,
        scope.as_token(),
        direction.as_str(),
        query.chars().count(),
        view.categories.len(),
        view.contact_count()
    );
    view
}

fn matches_query(contact: &Contact, needle: &str) -> bool {
    contact.first_name.to_lowercase().contains(needle)
        || contact.last_name.to_lowercase().contains(needle)
        || contact
            .phone
            .as_deref()
            .is_some_and(|phone| phone.contains(needle))
}
