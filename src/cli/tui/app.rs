// src/cli/tui/app.rs
//! State of the interactive terminal page, free of any terminal I/O.
use crate::application::command::{BookmarkCommand, CommandOutcome};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::views::bookmark_view::{render, DragMarkers, ListView, ViewMode};
use crate::application::ClockPoller;
use crate::cli::clock_commands::TerminalClockDisplay;
use crate::domain::bookmark::{Bookmark, BookmarkId};
use crate::domain::drag::{DragGesture, PressTarget, Release};
use crate::domain::services::observer::ListObserver;
use crate::infrastructure::confirmation::ConfirmationGate;
use crate::infrastructure::notification::{Toast, ToastQueue};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::widgets::ListState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Side effect the event loop has to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Open(String),
    Quit,
}

/// Delete waiting for a y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: BookmarkId,
    pub name: String,
}

/// Screen row of a rendered item, recorded while drawing for mouse hit tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemHit {
    pub row: u16,
    pub id: BookmarkId,
    /// First column of the delete control, if one is drawn
    pub control_col: Option<u16>,
}

/// Set whenever the screen is stale; the bookmark service raises it on
/// every list change.
#[derive(Debug)]
pub struct RedrawFlag(AtomicBool);

impl Default for RedrawFlag {
    fn default() -> Self {
        Self(AtomicBool::new(true))
    }
}

impl RedrawFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Read and clear
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

impl ListObserver for RedrawFlag {
    fn list_changed(&self, _bookmarks: &[Bookmark]) {
        self.raise();
    }
}

pub struct App<S: BookmarkService> {
    service: S,
    gate: Arc<ConfirmationGate>,
    toasts: Arc<ToastQueue>,
    poller: ClockPoller,
    clocks: TerminalClockDisplay,
    redraw: Arc<RedrawFlag>,
    pub mode: ViewMode,
    pub list_state: ListState,
    pub drag: DragGesture,
    pub pending_delete: Option<PendingDelete>,
    pub hits: Vec<ItemHit>,
}

impl<S: BookmarkService> App<S> {
    pub fn new(
        mut service: S,
        gate: Arc<ConfirmationGate>,
        toasts: Arc<ToastQueue>,
        poller: ClockPoller,
        drag: DragGesture,
    ) -> Self {
        let clocks = TerminalClockDisplay::for_poller(&poller);
        let redraw = Arc::new(RedrawFlag::default());
        service.subscribe(redraw.clone());
        let mut list_state = ListState::default();
        if !service.bookmarks().is_empty() {
            list_state.select(Some(0));
        }
        let mut app = Self {
            service,
            gate,
            toasts,
            poller,
            clocks,
            redraw,
            mode: ViewMode::Idle,
            list_state,
            drag,
            pending_delete: None,
            hits: Vec::new(),
        };
        app.refresh_clocks();
        app
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.service.bookmarks()
    }

    pub fn view(&self) -> ListView {
        render(self.bookmarks(), self.mode, DragMarkers::from_gesture(&self.drag))
    }

    pub fn revision(&self) -> u64 {
        self.service.revision()
    }

    /// False once a change could not be saved
    pub fn is_durable(&self) -> bool {
        self.service.is_durable()
    }

    pub fn request_redraw(&self) {
        self.redraw.raise();
    }

    /// True when something changed since the last call
    pub fn take_redraw(&self) -> bool {
        self.redraw.take()
    }

    pub fn clock_lines(&self) -> Vec<String> {
        self.clocks.lines()
    }

    pub fn toast(&self, now: Instant) -> Option<Toast> {
        self.toasts.current(now)
    }

    pub fn refresh_clocks(&mut self) {
        self.poller.tick_once(Utc::now(), &mut self.clocks);
    }

    pub fn selected_id(&self) -> Option<BookmarkId> {
        self.list_state
            .selected()
            .and_then(|i| self.bookmarks().get(i))
            .map(|b| b.id)
    }

    fn select_id(&mut self, id: BookmarkId) {
        if let Some(pos) = self.bookmarks().iter().position(|b| b.id == id) {
            self.list_state.select(Some(pos));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.bookmarks().len();
        let selected = match (self.list_state.selected(), len) {
            (_, 0) => None,
            (Some(i), _) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    fn step(&mut self, forward: bool) {
        let len = self.bookmarks().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.list_state.select(Some(next));
    }

    /// Move the selected bookmark one place down or up
    fn shift_selected(&mut self, forward: bool) {
        let Some(current) = self.list_state.selected() else {
            return;
        };
        let neighbour = if forward {
            current.checked_add(1)
        } else {
            current.checked_sub(1)
        };
        let (Some(source), Some(target)) = (
            self.bookmarks().get(current).map(|b| b.id),
            neighbour.and_then(|n| self.bookmarks().get(n)).map(|b| b.id),
        ) else {
            return;
        };
        self.reorder(source, target);
    }

    fn reorder(&mut self, source: BookmarkId, target: BookmarkId) {
        // failures are already on the toast line
        if let Err(e) = self.service.execute(BookmarkCommand::Reorder { source, target }) {
            warn!("Reorder failed: {}", e);
        }
        self.select_id(source);
    }

    fn ask_delete(&mut self, id: BookmarkId) {
        if let Some(bookmark) = self.service.get_bookmark(id) {
            self.pending_delete = Some(PendingDelete {
                id,
                name: bookmark.name.clone(),
            });
        }
    }

    fn answer_delete(&mut self, approved: bool) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        if approved {
            self.gate.arm();
        }
        match self.service.execute(BookmarkCommand::Remove { id: pending.id }) {
            Ok(CommandOutcome::Removed(_)) => self.clamp_selection(),
            Ok(_) => debug!(id = pending.id, "delete cancelled"),
            Err(e) => warn!("Delete failed: {}", e),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        if self.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.answer_delete(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.answer_delete(false),
                _ => {}
            }
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppAction::Quit);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppAction::Quit),
            KeyCode::Char('j') | KeyCode::Down => self.step(true),
            KeyCode::Char('k') | KeyCode::Up => self.step(false),
            KeyCode::Char('J') => self.shift_selected(true),
            KeyCode::Char('K') => self.shift_selected(false),
            KeyCode::Char('e') => self.mode = self.mode.toggled(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.ask_delete(id);
                }
            }
            KeyCode::Enter => {
                let id = self.selected_id()?;
                return self.service.get_bookmark(id).map(|b| AppAction::Open(b.url.clone()));
            }
            _ => {}
        }
        None
    }

    fn hit(&self, column: u16, row: u16) -> PressTarget {
        match self.hits.iter().find(|h| h.row == row) {
            Some(hit) if hit.control_col.is_some_and(|c| column >= c) => PressTarget::Control(hit.id),
            Some(hit) => PressTarget::Item(hit.id),
            None => PressTarget::Empty,
        }
    }

    fn hovered(&self, row: u16) -> Option<BookmarkId> {
        self.hits.iter().find(|h| h.row == row).map(|h| h.id)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Option<AppAction> {
        if self.pending_delete.is_some() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self.hit(mouse.column, mouse.row);
                self.drag.press(target, now);
                if let PressTarget::Control(id) = target {
                    self.ask_delete(id);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.start();
                match self.hovered(mouse.row) {
                    Some(id) => self.drag.hover(Some(id), now),
                    None => self.drag.leave(),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => match self.drag.release() {
                Release::Tap(id) => self.select_id(id),
                Release::Reorder(request) => self.reorder(request.source, request.target),
                Release::Nothing => {}
            },
            _ => {}
        }
        None
    }

    /// Periodic housekeeping: clocks and the press-and-hold drag delay
    pub fn on_tick(&mut self, now: Instant) {
        self.drag.tick(now);
        self.refresh_clocks();
    }

    /// Focus lost or terminal resized mid-gesture
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }
}
