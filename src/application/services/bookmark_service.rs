// src/application/services/bookmark_service.rs
use crate::application::command::{BookmarkCommand, BookmarkDraft, CommandOutcome, ImportReport};
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::{Bookmark, BookmarkId};
use crate::domain::services::observer::ListObserver;
use std::fmt::Debug;
use std::sync::Arc;

/// Controller over the ordered bookmark list.
///
/// Every mutation is validated, applied in memory, persisted and then
/// announced to the list observers. Failures are reported through the
/// notification collaborator as well as returned.
pub trait BookmarkService: Debug {
    /// Current list in display order
    fn bookmarks(&self) -> &[Bookmark];

    fn get_bookmark(&self, id: BookmarkId) -> Option<&Bookmark>;

    /// Append a new bookmark
    fn add_bookmark(&mut self, name: &str, url: &str, icon: Option<&str>) -> ApplicationResult<Bookmark>;

    /// Delete after confirmation; `Ok(None)` when the user declined
    fn remove_bookmark(&mut self, id: BookmarkId) -> ApplicationResult<Option<Bookmark>>;

    /// Replace name, url and icon in place
    fn update_bookmark(
        &mut self,
        id: BookmarkId,
        name: &str,
        url: &str,
        icon: Option<&str>,
    ) -> ApplicationResult<Bookmark>;

    /// Move `source` to the position `target` occupies; `Ok(false)` for a no-op
    fn reorder_bookmarks(&mut self, source: BookmarkId, target: BookmarkId) -> ApplicationResult<bool>;

    /// Add many drafts with a single write, skipping invalid or duplicate ones
    fn import_bookmarks(&mut self, drafts: Vec<BookmarkDraft>) -> ApplicationResult<ImportReport>;

    /// False after a write failed; the in-memory list is ahead of storage
    fn is_durable(&self) -> bool;

    /// Incremented on every mutation
    fn revision(&self) -> u64;

    /// Called with the full list after every mutation
    fn subscribe(&mut self, observer: Arc<dyn ListObserver>);

    fn execute(&mut self, command: BookmarkCommand) -> ApplicationResult<CommandOutcome> {
        match command {
            BookmarkCommand::Add(draft) => self
                .add_bookmark(&draft.name, &draft.url, draft.icon.as_deref())
                .map(CommandOutcome::Added),
            BookmarkCommand::Remove { id } => Ok(self
                .remove_bookmark(id)?
                .map_or(CommandOutcome::Cancelled, CommandOutcome::Removed)),
            BookmarkCommand::Update {
                id,
                name,
                url,
                icon,
            } => self
                .update_bookmark(id, &name, &url, icon.as_deref())
                .map(CommandOutcome::Updated),
            BookmarkCommand::Reorder { source, target } => self
                .reorder_bookmarks(source, target)
                .map(CommandOutcome::Reordered),
        }
    }
}
