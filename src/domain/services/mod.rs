pub mod confirmation;
pub mod notification;
pub mod observer;
