// src/infrastructure/notification.rs
use crate::domain::services::notification::{Notification, Notifier, Severity};
use std::collections::VecDeque;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use std::time::Instant;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Colored one-line messages on stderr, keeping stdout pipeable
#[derive(Debug, Clone, Copy)]
pub struct StderrNotifier {
    no_color: bool,
}

impl StderrNotifier {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }
}

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        let color_choice = if self.no_color || !io::stderr().is_terminal() {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        let mut stderr = StandardStream::stderr(color_choice);
        let color = match notification.severity {
            Severity::Info => Color::Cyan,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
        };
        // Nothing sensible is left to do when stderr itself fails
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = writeln!(stderr, "{}", notification.message);
        let _ = stderr.reset();
    }
}

/// A notification together with the moment it was raised
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub raised_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at)
            >= self.notification.severity.display_duration()
    }
}

/// Queue drained by the TUI status line
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    /// Most recent toast still on screen at `now`; expired ones are dropped.
    pub fn current(&self, now: Instant) -> Option<Toast> {
        let mut toasts = self.toasts.lock().ok()?;
        toasts.retain(|t| !t.is_expired(now));
        toasts.back().cloned()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push_back(Toast {
                notification,
                raised_at: Instant::now(),
            });
        }
    }
}
