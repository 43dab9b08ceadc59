// src/application/command.rs
use crate::domain::bookmark::{Bookmark, BookmarkId};

/// Raw form input for a new bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub name: String,
    pub url: String,
    pub icon: Option<String>,
}

impl BookmarkDraft {
    pub fn new(name: impl Into<String>, url: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            icon,
        }
    }
}

/// Everything a presentation layer may ask the bookmark controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkCommand {
    Add(BookmarkDraft),
    Remove {
        id: BookmarkId,
    },
    Update {
        id: BookmarkId,
        name: String,
        url: String,
        icon: Option<String>,
    },
    Reorder {
        source: BookmarkId,
        target: BookmarkId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added(Bookmark),
    Removed(Bookmark),
    /// Removal declined at the confirmation prompt
    Cancelled,
    Updated(Bookmark),
    /// `false` when the reorder was a no-op
    Reordered(bool),
}

/// Result of importing a batch of drafts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: Vec<String>,
}
