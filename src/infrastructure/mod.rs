pub mod confirmation;
pub mod di;
pub mod error;
pub mod html;
pub mod json;
pub mod notification;
pub mod repositories;
pub mod storage;
