pub mod json_bookmark_store;
