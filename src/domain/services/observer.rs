// src/domain/services/observer.rs
use crate::domain::bookmark::Bookmark;

/// Receives the full list after every mutation so the view can be rebuilt.
pub trait ListObserver: Send + Sync {
    fn list_changed(&self, bookmarks: &[Bookmark]);
}
