//! Dataset decoding and integrity checks.

use super::Directory;
use crate::model::community::Dataset;
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Dataset compiled into the binary.
pub const BUNDLED_DATASET: &str = include_str!("../../data/contacts.json");

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset load error.
///
/// The bundled dataset is checked by tests, so in practice these surface only
/// for files passed explicitly by the caller.
#[derive(Debug)]
pub enum DatasetError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    DuplicateLoginCode(String),
    DuplicateCommunityId(String),
    DuplicateCategoryId {
        community_id: String,
        category_id: String,
    },
    DuplicateContactId {
        community_id: String,
        category_id: String,
        contact_id: String,
    },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read dataset `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid dataset json: {err}"),
            // Codes are shared secrets of a sort; do not echo them.
            Self::DuplicateLoginCode(community_id) => write!(
                f,
                "community `{community_id}` reuses an access code of an earlier community"
            ),
            Self::DuplicateCommunityId(id) => write!(f, "duplicate community id `{id}`"),
            Self::DuplicateCategoryId {
                community_id,
                category_id,
            } => write!(
                f,
                "duplicate category id `{category_id}` in community `{community_id}`"
            ),
            Self::DuplicateContactId {
                community_id,
                category_id,
                contact_id,
            } => write!(
                f,
                "duplicate contact id `{contact_id}` in category `{community_id}/{category_id}`"
            ),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl Directory {
    /// Loads the dataset compiled into the binary.
    pub fn bundled() -> DatasetResult<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    /// Loads a dataset file from disk.
    ///
    /// # Side effects
    /// - Emits `dataset_load` logging events with duration and status.
    pub fn from_path(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            error!(
                "event=dataset_load module=directory status=error mode=file duration_ms={} error_code=dataset_read_failed",
                started_at.elapsed().as_millis()
            );
            DatasetError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json_str(&raw)
    }

    /// Decodes and validates a dataset from JSON text.
    pub fn from_json_str(raw: &str) -> DatasetResult<Self> {
        let started_at = Instant::now();
        let dataset = match serde_json::from_str::<Dataset>(raw)
            .map_err(DatasetError::from)
            .and_then(|dataset| validate(&dataset).map(|()| dataset))
        {
            Ok(dataset) => dataset,
            Err(err) => {
                error!(
                    "event=dataset_load module=directory status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        info!(
            "event=dataset_load module=directory status=ok duration_ms={} communities={}",
            started_at.elapsed().as_millis(),
            dataset.communities.len()
        );
        Ok(Self { dataset })
    }
}

fn validate(dataset: &Dataset) -> DatasetResult<()> {
    let mut codes = HashSet::new();
    let mut community_ids = HashSet::new();

    for community in &dataset.communities {
        if !community_ids.insert(community.id.as_str()) {
            return Err(DatasetError::DuplicateCommunityId(community.id.clone()));
        }
        if !codes.insert(community.login_code.as_str()) {
            return Err(DatasetError::DuplicateLoginCode(community.id.clone()));
        }

        let mut category_ids = HashSet::new();
        for category in &community.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(DatasetError::DuplicateCategoryId {
                    community_id: community.id.clone(),
                    category_id: category.id.clone(),
                });
            }

            let mut contact_ids = HashSet::new();
            for contact in &category.contacts {
                if !contact_ids.insert(contact.id.as_str()) {
                    return Err(DatasetError::DuplicateContactId {
                        community_id: community.id.clone(),
                        category_id: category.id.clone(),
                        contact_id: contact.id.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}
