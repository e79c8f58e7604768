//! Dataset loading and community lookup.
//!
//! # Responsibility
//! - Load the community dataset once (bundled or from an explicit file).
//! - Resolve communities by access code or id with exact-match semantics.
//!
//! # Invariants
//! - A loaded `Directory` has unique access codes and unique ids per scope.
//! - Lookups never fail; a miss is `None`.

mod load;

pub use load::{DatasetError, DatasetResult, BUNDLED_DATASET};

use crate::model::community::{Community, Dataset};
use log::{debug, info};

/// Read-only view over the loaded community collection.
#[derive(Debug, Clone)]
pub struct Directory {
    dataset: Dataset,
}

impl Directory {
    /// Returns all communities in dataset order.
    pub fn communities(&self) -> &[Community] {
        &self.dataset.communities
    }

    /// Finds the community whose access code equals `code` exactly.
    ///
    /// Case-sensitive, no partial matching. Blank input is always a miss;
    /// callers trim user input before calling.
    pub fn find_community_by_code(&self, code: &str) -> Option<&Community> {
        if code.trim().is_empty() {
            debug!("event=community_lookup module=directory status=miss by=code reason=blank");
            return None;
        }

        let found = self
            .dataset
            .communities
            .iter()
            .find(|community| community.login_code == code);
        match found {
            Some(community) => info!(
                "event=community_lookup module=directory status=ok by=code community_id={}",
                community.id
            ),
            None => info!("event=community_lookup module=directory status=miss by=code"),
        }
        found
    }

    /// Finds one community by exact id. Used by deep links.
    pub fn find_community_by_id(&self, id: &str) -> Option<&Community> {
        if id.trim().is_empty() {
            return None;
        }

        let found = self
            .dataset
            .communities
            .iter()
            .find(|community| community.id == id);
        if found.is_none() {
            info!("event=community_lookup module=directory status=miss by=id");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::Directory;

    fn directory() -> Directory {
        Directory::from_json_str(
            r#"{"communities": [
                {"id": "a", "name": "A", "loginCode": "CODE-A", "logoPath": "/a.png", "categories": []},
                {"id": "b", "name": "B", "loginCode": "code-b", "logoPath": "/b.png", "categories": []}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn code_lookup_is_exact_and_case_sensitive() {
        let directory = directory();
        assert_eq!(
            directory.find_community_by_code("CODE-A").map(|c| c.id.as_str()),
            Some("a")
        );
        assert!(directory.find_community_by_code("code-a").is_none());
        assert!(directory.find_community_by_code("CODE").is_none());
        assert!(directory.find_community_by_code(" CODE-A").is_none());
    }

    #[test]
    fn blank_code_is_always_a_miss() {
        let directory = directory();
        assert!(directory.find_community_by_code("").is_none());
        assert!(directory.find_community_by_code("   \t").is_none());
    }

    #[test]
    fn id_lookup_is_exact() {
        let directory = directory();
        assert_eq!(
            directory.find_community_by_id("b").map(|c| c.login_code.as_str()),
            Some("code-b")
        );
        assert!(directory.find_community_by_id("B").is_none());
        assert!(directory.find_community_by_id("").is_none());
    }
}
