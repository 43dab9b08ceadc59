pub mod bookmark;
pub mod bookmark_list;
pub mod clock;
pub mod drag;
pub mod error;
pub mod repositories;
pub mod services;
