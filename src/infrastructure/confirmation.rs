// src/infrastructure/confirmation.rs
use crate::domain::services::confirmation::Confirmation;
use crate::util::helper::confirm;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Interactive y/N prompt on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        confirm(prompt)
    }
}

/// Fixed answer, e.g. for `--yes`
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmation for AutoConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        debug!(answer = self.0, "auto-answering: {}", prompt);
        self.0
    }
}

/// Answer collected beforehand by a modal dialog.
///
/// `arm` records a "yes"; the next `confirm` consumes it, so every
/// destructive call needs its own approval.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    armed: AtomicBool,
}

impl ConfirmationGate {
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

impl Confirmation for ConfirmationGate {
    fn confirm(&self, _prompt: &str) -> bool {
        self.armed.swap(false, Ordering::SeqCst)
    }
}
