// src/application/mod.rs
pub mod command;
pub mod error;
pub mod services;
pub mod views;

// Re-export key services for easier imports
pub use services::bookmark_service_impl::BookmarkServiceImpl;
pub use services::clock_service::ClockPoller;
