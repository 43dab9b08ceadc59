// src/domain/drag.rs
//! Drag/touch reorder gesture, independent of any input-event API.
//!
//! A press on a draggable item arms the gesture (`Pending`). It becomes a
//! drag (`Dragging`) once the press has been held for the configured delay
//! or the input layer reports a native drag start. While dragging, the item
//! under the pointer is tracked as the provisional drop target. Releasing
//! over a target other than the source yields a [`ReorderRequest`].
use crate::domain::bookmark::BookmarkId;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// Nothing draggable under the pointer
    Empty,
    /// The body or drag handle of a rendered item
    Item(BookmarkId),
    /// A link or button inside an item; keeps its click semantics
    Control(BookmarkId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pending {
        source: BookmarkId,
        pressed_at: Instant,
    },
    Dragging {
        source: BookmarkId,
        target: Option<BookmarkId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderRequest {
    pub source: BookmarkId,
    pub target: BookmarkId,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Released before the drag started: treat as a plain click on the item
    Tap(BookmarkId),
    /// Dropped onto another item
    Reorder(ReorderRequest),
    /// Nothing to do (idle, or dropped without a valid target)
    Nothing,
}

#[derive(Debug, Clone)]
pub struct DragGesture {
    phase: DragPhase,
    delay: Duration,
}

impl DragGesture {
    pub fn new(delay: Duration) -> Self {
        Self {
            phase: DragPhase::Idle,
            delay,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Item being dragged, or armed for dragging
    pub fn source(&self) -> Option<BookmarkId> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Pending { source, .. } | DragPhase::Dragging { source, .. } => Some(source),
        }
    }

    /// Provisional drop target; at most one at a time
    pub fn target(&self) -> Option<BookmarkId> {
        match self.phase {
            DragPhase::Dragging { target, .. } => target,
            _ => None,
        }
    }

    pub fn press(&mut self, on: PressTarget, now: Instant) {
        self.phase = match on {
            PressTarget::Item(source) => {
                trace!(source, "drag armed");
                DragPhase::Pending {
                    source,
                    pressed_at: now,
                }
            }
            PressTarget::Control(_) | PressTarget::Empty => DragPhase::Idle,
        };
    }

    /// Native drag-start signal from the input layer
    pub fn start(&mut self) {
        if let DragPhase::Pending { source, .. } = self.phase {
            debug!(source, "drag started");
            self.phase = DragPhase::Dragging {
                source,
                target: None,
            };
        }
    }

    /// Promote a pending press to a drag once the delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let DragPhase::Pending { pressed_at, .. } = self.phase {
            if now.saturating_duration_since(pressed_at) >= self.delay {
                self.start();
            }
        }
    }

    /// Pointer moved over `hovered` (the topmost draggable item, if any).
    pub fn hover(&mut self, hovered: Option<BookmarkId>, now: Instant) {
        self.tick(now);
        if let DragPhase::Dragging { source, target } = &mut self.phase {
            let source = *source;
            let next = hovered.filter(|id| *id != source);
            if *target != next {
                trace!(?next, "drop target changed");
                *target = next;
            }
        }
    }

    /// Pointer left every valid drop target
    pub fn leave(&mut self) {
        if let DragPhase::Dragging { target, .. } = &mut self.phase {
            *target = None;
        }
    }

    /// Finish the interaction; the gesture is idle afterwards regardless of outcome.
    pub fn release(&mut self) -> Release {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        match phase {
            DragPhase::Idle => Release::Nothing,
            DragPhase::Pending { source, .. } => Release::Tap(source),
            DragPhase::Dragging {
                source,
                target: Some(target),
            } if source != target => {
                debug!(source, target, "drop");
                Release::Reorder(ReorderRequest { source, target })
            }
            DragPhase::Dragging { .. } => Release::Nothing,
        }
    }

    /// Abort without reordering, e.g. on focus loss or a cancelled touch
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(150);

    fn dragging_from(source: BookmarkId) -> (DragGesture, Instant) {
        let t0 = Instant::now();
        let mut gesture = DragGesture::new(DELAY);
        gesture.press(PressTarget::Item(source), t0);
        gesture.start();
        (gesture, t0)
    }

    #[test]
    fn given_press_on_control_when_press_then_stays_idle() {
        let mut gesture = DragGesture::new(DELAY);
        gesture.press(PressTarget::Control(1), Instant::now());
        assert_eq!(gesture.phase(), DragPhase::Idle);
        assert_eq!(gesture.release(), Release::Nothing);
    }

    #[test]
    fn given_release_before_delay_when_release_then_tap() {
        let t0 = Instant::now();
        let mut gesture = DragGesture::new(DELAY);
        gesture.press(PressTarget::Item(1), t0);
        gesture.hover(Some(2), t0 + Duration::from_millis(10));

        assert!(!gesture.is_dragging());
        assert_eq!(gesture.target(), None);
        assert_eq!(gesture.release(), Release::Tap(1));
        assert_eq!(gesture.phase(), DragPhase::Idle);
    }

    #[test]
    fn given_held_press_when_delay_elapses_then_dragging() {
        let t0 = Instant::now();
        let mut gesture = DragGesture::new(DELAY);
        gesture.press(PressTarget::Item(1), t0);

        gesture.tick(t0 + Duration::from_millis(100));
        assert!(!gesture.is_dragging());

        gesture.tick(t0 + DELAY);
        assert!(gesture.is_dragging());
        assert_eq!(gesture.source(), Some(1));
    }

    #[test]
    fn given_drag_when_hover_source_then_no_target_marked() {
        let (mut gesture, t0) = dragging_from(1);
        gesture.hover(Some(1), t0);
        assert_eq!(gesture.target(), None);
    }

    #[test]
    fn given_drag_when_hover_moves_then_single_latest_target() {
        let (mut gesture, t0) = dragging_from(1);
        gesture.hover(Some(2), t0);
        assert_eq!(gesture.target(), Some(2));
        gesture.hover(Some(3), t0);
        assert_eq!(gesture.target(), Some(3));

        assert_eq!(
            gesture.release(),
            Release::Reorder(ReorderRequest {
                source: 1,
                target: 3
            })
        );
        assert_eq!(gesture.phase(), DragPhase::Idle);
    }

    #[test]
    fn given_pointer_left_targets_when_release_then_nothing() {
        let (mut gesture, t0) = dragging_from(1);
        gesture.hover(Some(2), t0);
        gesture.leave();
        assert_eq!(gesture.target(), None);
        assert_eq!(gesture.release(), Release::Nothing);
    }

    #[test]
    fn given_drag_when_cancel_then_idle_without_reorder() {
        let (mut gesture, t0) = dragging_from(1);
        gesture.hover(Some(2), t0);
        gesture.cancel();
        assert_eq!(gesture.phase(), DragPhase::Idle);
        assert_eq!(gesture.release(), Release::Nothing);
    }

    #[test]
    fn given_idle_when_start_then_still_idle() {
        let mut gesture = DragGesture::new(DELAY);
        gesture.start();
        assert_eq!(gesture.phase(), DragPhase::Idle);
    }
}
