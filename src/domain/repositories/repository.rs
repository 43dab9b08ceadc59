// src/domain/repositories/repository.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::str::FromStr;

/// Persistence for the whole bookmark list, stored as one blob.
pub trait BookmarkStore: Debug + Send + Sync {
    /// Read the persisted list in display order.
    ///
    /// An absent blob yields the configured first-run list; a present one is
    /// normalized (missing ids and order values filled in).
    fn load(&self) -> DomainResult<Vec<Bookmark>>;

    /// Overwrite the persisted blob with `bookmarks`; there are no partial updates.
    fn save(&self, bookmarks: &[Bookmark]) -> DomainResult<()>;
}

/// What `load` yields when nothing has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedPolicy {
    /// Start with no bookmarks
    #[default]
    Empty,
    /// Start with a small fixed set of popular sites
    Defaults,
}

impl SeedPolicy {
    pub fn bookmarks(self) -> Vec<Bookmark> {
        match self {
            SeedPolicy::Empty => Vec::new(),
            SeedPolicy::Defaults => [
                (1, "Google", "https://www.google.com", "🔍"),
                (2, "GitHub", "https://github.com", "🐙"),
                (3, "YouTube", "https://www.youtube.com", "📺"),
            ]
            .into_iter()
            .enumerate()
            .map(|(order, (id, name, url, icon))| Bookmark {
                id,
                name: name.to_string(),
                url: url.to_string(),
                icon: icon.to_string(),
                order,
                date_added: None,
                date_modified: None,
            })
            .collect(),
        }
    }
}

impl FromStr for SeedPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empty" => Ok(SeedPolicy::Empty),
            "defaults" => Ok(SeedPolicy::Defaults),
            other => Err(DomainError::Other(format!(
                "unknown seed policy '{}', expected 'empty' or 'defaults'",
                other
            ))),
        }
    }
}
