// src/domain/bookmark.rs
use crate::domain::error::{DomainError, DomainResult};
use chrono::{DateTime, SubsecRound, Utc};
use derive_builder::Builder;
use std::fmt;
use url::Url;

pub type BookmarkId = i64;

/// Schemes that are accepted verbatim even without a `//` authority part.
const OPAQUE_SCHEMES: &[&str] = &["mailto:", "about:", "data:"];

/// Schemes that run script when followed from a page
const SCRIPT_SCHEMES: &[&str] = &["javascript", "vbscript"];

/// Represents a bookmark domain entity
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(setter(into))]
pub struct Bookmark {
    pub id: BookmarkId,
    pub name: String,
    pub url: String,
    pub icon: String,
    /// Mirrors the list position, rewritten on every structural change
    #[builder(default = "0")]
    pub order: usize,
    #[builder(default)]
    pub date_added: Option<DateTime<Utc>>,
    #[builder(default)]
    pub date_modified: Option<DateTime<Utc>>,
}

/// User supplied fields after trimming, validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkFields {
    pub name: String,
    pub url: String,
    pub icon: String,
}

impl BookmarkFields {
    /// Validate raw form input.
    ///
    /// Name and url must be non-empty after trimming, the url gets an
    /// `https://` scheme when it has none, and a blank icon falls back to
    /// `default_icon`.
    pub fn parse(name: &str, url: &str, icon: Option<&str>, default_icon: &str) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidBookmark(
                "name must not be empty".to_string(),
            ));
        }
        let url = normalize_url(url)?;
        let icon = icon
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .unwrap_or(default_icon)
            .to_string();

        Ok(Self {
            name: name.to_string(),
            url,
            icon,
        })
    }
}

impl Bookmark {
    pub fn new(id: BookmarkId, fields: BookmarkFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            url: fields.url,
            icon: fields.icon,
            order: 0,
            date_added: Some(stamp(now)),
            date_modified: None,
        }
    }

    /// Replace the editable fields and stamp the modification time
    pub fn update(&mut self, fields: BookmarkFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.url = fields.url;
        self.icon = fields.icon;
        self.date_modified = Some(stamp(now));
    }

    /// Case-insensitive name comparison used for the uniqueness rule
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Timestamps are persisted with millisecond precision
fn stamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(3)
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {} <{}>", self.id, self.icon, self.name, self.url)
    }
}

/// Trim the url and prefix `https://` when no scheme is present.
pub fn normalize_url(raw: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidBookmark(
            "url must not be empty".to_string(),
        ));
    }

    let lower = trimmed.to_lowercase();
    let has_scheme =
        trimmed.contains("://") || OPAQUE_SCHEMES.iter().any(|s| lower.starts_with(s));
    let candidate = if has_scheme {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| DomainError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    if SCRIPT_SCHEMES.contains(&parsed.scheme()) {
        return Err(DomainError::InvalidUrl(format!(
            "{}: scheme '{}' is not allowed",
            trimmed,
            parsed.scheme()
        )));
    }
    Ok(candidate)
}
