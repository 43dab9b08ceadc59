// src/infrastructure/json.rs

use crate::domain::bookmark::{Bookmark, BookmarkId};
use crate::domain::error::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst, TimestampMilliSeconds};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Persisted shape of one bookmark.
///
/// Accepts the minimal shape (`id, name, url, icon`) as well as the extended
/// one (`order, dateAdded, dateModified`). Timestamps are written as epoch
/// milliseconds and read from either milliseconds or RFC 3339 strings.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonBookmark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookmarkId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(TimestampMilliSeconds<i64>, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<PickFirst<(TimestampMilliSeconds<i64>, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl JsonBookmark {
    /// Create from a domain `Bookmark`
    pub fn from_domain(bookmark: &Bookmark) -> Self {
        Self {
            id: Some(bookmark.id),
            name: bookmark.name.clone(),
            url: bookmark.url.clone(),
            icon: bookmark.icon.clone(),
            order: Some(bookmark.order as i64),
            date_added: bookmark.date_added,
            date_modified: bookmark.date_modified,
        }
    }

    pub fn from_domain_collection(bookmarks: &[Bookmark]) -> Vec<Self> {
        bookmarks.iter().map(Self::from_domain).collect()
    }
}

pub fn to_json(bookmarks: &[Bookmark]) -> DomainResult<String> {
    serde_json::to_string(&JsonBookmark::from_domain_collection(bookmarks))
        .map_err(|e| DomainError::SerializationError(e.to_string()))
}

pub fn from_json(blob: &str) -> DomainResult<Vec<JsonBookmark>> {
    serde_json::from_str(blob).map_err(|e| DomainError::DeserializationError(e.to_string()))
}

/// Converts bookmarks to JSON and writes to standard output
/// Standard output is used for pipeable content without colors or formatting
pub fn write_bookmarks_as_json(bookmarks: &[Bookmark]) -> DomainResult<()> {
    let json = serde_json::to_string_pretty(&JsonBookmark::from_domain_collection(bookmarks))
        .map_err(|e| {
            DomainError::SerializationError(format!("Failed to serialize bookmarks to JSON: {}", e))
        })?;

    println!("{}", json);

    // Flush stdout to ensure immediate output
    std::io::stdout()
        .flush()
        .map_err(|e| DomainError::Other(format!("Failed to flush stdout: {}", e)))?;

    Ok(())
}

/// Reads an exported JSON array of bookmarks.
pub fn read_bookmarks_file<P: AsRef<Path>>(path: P) -> DomainResult<Vec<JsonBookmark>> {
    let blob = fs::read_to_string(path.as_ref())?;
    from_json(&blob).map_err(|e| e.context(path.as_ref().display().to_string()))
}
