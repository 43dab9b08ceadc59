pub mod repository;
pub mod storage;
