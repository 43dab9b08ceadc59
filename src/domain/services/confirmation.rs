// src/domain/services/confirmation.rs

/// Yes/no surface consulted before destructive operations.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}
