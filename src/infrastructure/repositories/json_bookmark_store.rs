// src/infrastructure/repositories/json_bookmark_store.rs
use crate::domain::bookmark::{Bookmark, BookmarkId};
use crate::domain::bookmark_list::{smallest_unused_id, BookmarkList};
use crate::domain::error::DomainResult;
use crate::domain::repositories::repository::{BookmarkStore, SeedPolicy};
use crate::domain::repositories::storage::KeyValueStorage;
use crate::infrastructure::json::{self, JsonBookmark};
use chrono::Utc;
use itertools::Itertools;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Fixed key of the persisted bookmark blob
pub const STORAGE_KEY: &str = "newTabBookmarks";

/// Bookmark list serialized as one JSON array under [`STORAGE_KEY`].
#[derive(Debug)]
pub struct JsonBookmarkStore {
    storage: Arc<dyn KeyValueStorage>,
    seed: SeedPolicy,
    default_icon: String,
}

impl JsonBookmarkStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, seed: SeedPolicy, default_icon: &str) -> Self {
        Self {
            storage,
            seed,
            default_icon: default_icon.to_string(),
        }
    }
}

impl BookmarkStore for JsonBookmarkStore {
    #[instrument(skip(self), level = "debug")]
    fn load(&self) -> DomainResult<Vec<Bookmark>> {
        let Some(blob) = self.storage.get(STORAGE_KEY)? else {
            debug!(seed = ?self.seed, "no persisted bookmarks, seeding");
            return Ok(self.seed.bookmarks());
        };

        let records = json::from_json(&blob).map_err(|e| e.context(STORAGE_KEY))?;
        let normalized = normalize(records, &self.default_icon, Utc::now().timestamp_millis());

        // Ids assigned here must survive the process, otherwise they change on every start
        if normalized.repaired {
            debug!("persisting repaired bookmark ids");
            if let Err(e) = self.save(&normalized.bookmarks) {
                warn!(error = %e, "could not persist repaired bookmarks");
            }
        }
        Ok(normalized.bookmarks)
    }

    #[instrument(skip(self, bookmarks), level = "debug", fields(count = bookmarks.len()))]
    fn save(&self, bookmarks: &[Bookmark]) -> DomainResult<()> {
        let blob = json::to_json(bookmarks)?;
        self.storage.set(STORAGE_KEY, &blob)
    }
}

/// Outcome of [`normalize`]
#[derive(Debug, PartialEq)]
pub struct Normalized {
    pub bookmarks: Vec<Bookmark>,
    /// Ids were assigned or records dropped, so the blob no longer matches
    pub repaired: bool,
}

/// Bring persisted records into the in-memory invariants.
///
/// Records without `order` keep their array position as order, the list is
/// stably sorted by order and renumbered. Missing or duplicate ids get fresh
/// ones above every existing id, or the lowest free ids once that range is
/// exhausted. Records without name or url are dropped.
pub fn normalize(records: Vec<JsonBookmark>, default_icon: &str, now_millis: i64) -> Normalized {
    let ranked: Vec<(i64, JsonBookmark)> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| (record.order.unwrap_or(index as i64), record))
        .sorted_by_key(|(order, _)| *order)
        .collect();

    let existing: HashSet<BookmarkId> = ranked.iter().filter_map(|(_, r)| r.id).collect();
    let mut next_id: Option<BookmarkId> = match existing.iter().max() {
        Some(max) => max.checked_add(1).map(|id| id.max(now_millis)),
        None => Some(now_millis),
    };
    let mut seen = HashSet::new();
    let mut repaired = false;

    let mut bookmarks = Vec::with_capacity(ranked.len());
    for (_, record) in ranked {
        if record.name.trim().is_empty() || record.url.trim().is_empty() {
            warn!(id = ?record.id, "dropping persisted bookmark without name or url");
            repaired = true;
            continue;
        }

        let id = match record.id {
            Some(id) if seen.insert(id) => id,
            other => {
                let fresh = match next_id {
                    Some(id) => {
                        next_id = id.checked_add(1);
                        id
                    }
                    None => smallest_unused_id(|id| existing.contains(&id) || seen.contains(&id)),
                };
                seen.insert(fresh);
                repaired = true;
                debug!(old = ?other, fresh, "assigned fresh bookmark id");
                fresh
            }
        };

        let icon = if record.icon.trim().is_empty() {
            default_icon.to_string()
        } else {
            record.icon
        };

        bookmarks.push(Bookmark {
            id,
            name: record.name,
            url: record.url,
            icon,
            order: 0,
            date_added: record.date_added,
            date_modified: record.date_modified,
        });
    }

    Normalized {
        bookmarks: BookmarkList::new(bookmarks).into(),
        repaired,
    }
}
