// src/application/views/bookmark_view.rs
//! Projection of the bookmark list into what a surface has to draw.
//!
//! Rendering is a pure function of the list, the view mode and the current
//! drag markers. Controls never touch storage; they carry the command a
//! presentation layer hands back to the bookmark service.
use crate::application::command::BookmarkCommand;
use crate::domain::bookmark::{Bookmark, BookmarkId};
use crate::domain::drag::DragGesture;
use serde::Serialize;

pub const EMPTY_PLACEHOLDER: &str = "No bookmarks yet. Add some!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Idle,
    Editing,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Idle => ViewMode::Editing,
            ViewMode::Editing => ViewMode::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Open,
    Edit,
    Delete,
}

/// What activating a control does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    /// Navigate to the bookmark, no state change
    Open { url: String },
    /// Show the edit form prefilled with the record; its submit becomes an update
    BeginEdit { id: BookmarkId },
    /// Hand the command to the bookmark service
    Dispatch(BookmarkCommand),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub kind: ControlKind,
    pub label: &'static str,
    #[serde(skip)]
    pub action: ControlAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Correlation key back to the record
    pub id: BookmarkId,
    pub position: usize,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub draggable: bool,
    pub dragging: bool,
    pub drop_target: bool,
    pub controls: Vec<ControlView>,
}

impl ItemView {
    pub fn control(&self, kind: ControlKind) -> Option<&ControlView> {
        self.controls.iter().find(|c| c.kind == kind)
    }
}

/// Transient markers of an ongoing drag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragMarkers {
    pub source: Option<BookmarkId>,
    pub target: Option<BookmarkId>,
}

impl DragMarkers {
    pub fn from_gesture(gesture: &DragGesture) -> Self {
        if gesture.is_dragging() {
            Self {
                source: gesture.source(),
                target: gesture.target(),
            }
        } else {
            Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub mode: ViewMode,
    pub items: Vec<ItemView>,
    /// Set instead of items when there is nothing to show
    pub placeholder: Option<&'static str>,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: BookmarkId) -> Option<&ItemView> {
        self.items.iter().find(|i| i.id == id)
    }
}

pub fn render(bookmarks: &[Bookmark], mode: ViewMode, markers: DragMarkers) -> ListView {
    if bookmarks.is_empty() {
        return ListView {
            mode,
            items: Vec::new(),
            placeholder: Some(EMPTY_PLACEHOLDER),
        };
    }

    let items = bookmarks
        .iter()
        .enumerate()
        .map(|(position, bookmark)| ItemView {
            id: bookmark.id,
            position,
            name: bookmark.name.clone(),
            url: bookmark.url.clone(),
            icon: bookmark.icon.clone(),
            draggable: true,
            dragging: markers.source == Some(bookmark.id),
            drop_target: markers.target == Some(bookmark.id),
            controls: controls_for(bookmark, mode),
        })
        .collect();

    ListView {
        mode,
        items,
        placeholder: None,
    }
}

fn controls_for(bookmark: &Bookmark, mode: ViewMode) -> Vec<ControlView> {
    let open = ControlView {
        kind: ControlKind::Open,
        label: "open",
        action: ControlAction::Open {
            url: bookmark.url.clone(),
        },
    };
    let delete = ControlView {
        kind: ControlKind::Delete,
        label: "×",
        action: ControlAction::Dispatch(BookmarkCommand::Remove { id: bookmark.id }),
    };

    match mode {
        ViewMode::Idle => vec![open, delete],
        ViewMode::Editing => vec![
            open,
            ControlView {
                kind: ControlKind::Edit,
                label: "edit",
                action: ControlAction::BeginEdit { id: bookmark.id },
            },
            delete,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::repository::SeedPolicy;

    #[test]
    fn given_empty_list_when_render_then_placeholder_only() {
        let view = render(&[], ViewMode::Idle, DragMarkers::default());
        assert!(view.is_empty());
        assert_eq!(view.placeholder, Some(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn given_list_when_render_then_one_item_per_record_in_order() {
        let bookmarks = SeedPolicy::Defaults.bookmarks();
        let view = render(&bookmarks, ViewMode::Idle, DragMarkers::default());

        assert_eq!(view.placeholder, None);
        assert_eq!(
            view.items.iter().map(|i| (i.id, i.position)).collect::<Vec<_>>(),
            vec![(1, 0), (2, 1), (3, 2)]
        );
        assert!(view.items.iter().all(|i| i.draggable && !i.dragging && !i.drop_target));
    }

    #[test]
    fn given_idle_mode_when_render_then_open_and_delete_controls() {
        let bookmarks = SeedPolicy::Defaults.bookmarks();
        let view = render(&bookmarks, ViewMode::Idle, DragMarkers::default());
        let item = view.item(2).unwrap();

        assert!(item.control(ControlKind::Edit).is_none());
        assert_eq!(
            item.control(ControlKind::Delete).unwrap().action,
            ControlAction::Dispatch(BookmarkCommand::Remove { id: 2 })
        );
        assert_eq!(
            item.control(ControlKind::Open).unwrap().action,
            ControlAction::Open {
                url: "https://github.com".to_string()
            }
        );
    }

    #[test]
    fn given_editing_mode_when_render_then_edit_control_present() {
        let bookmarks = SeedPolicy::Defaults.bookmarks();
        let view = render(&bookmarks, ViewMode::Editing, DragMarkers::default());
        let kinds: Vec<_> = view.items[0].controls.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ControlKind::Open, ControlKind::Edit, ControlKind::Delete]);
    }

    #[test]
    fn given_drag_markers_when_render_then_source_and_target_flagged() {
        let bookmarks = SeedPolicy::Defaults.bookmarks();
        let markers = DragMarkers {
            source: Some(1),
            target: Some(3),
        };
        let view = render(&bookmarks, ViewMode::Idle, markers);

        assert!(view.item(1).unwrap().dragging);
        assert!(view.item(3).unwrap().drop_target);
        assert_eq!(view.items.iter().filter(|i| i.drop_target).count(), 1);
    }

    #[test]
    fn given_list_when_render_then_input_untouched() {
        let bookmarks = SeedPolicy::Defaults.bookmarks();
        let before = bookmarks.clone();
        let _ = render(&bookmarks, ViewMode::Editing, DragMarkers::default());
        assert_eq!(bookmarks, before);
    }
}
