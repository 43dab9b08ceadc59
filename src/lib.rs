// src/lib.rs
#![crate_type = "lib"]
#![crate_name = "newtab"]

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

// CLI modules
pub mod cli;
pub mod config;
pub mod exitcode;
pub mod util;
