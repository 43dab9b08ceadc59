// src/cli/args.rs
use crate::domain::bookmark::BookmarkId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Bookmark launcher with world clocks, as a CLI, a TUI and a static new-tab page
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the default configuration as TOML
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all bookmarks in display order
    List {
        #[arg(long = "json", help = "output as json")]
        is_json: bool,

        #[arg(short = 'e', long = "edit", help = "show the edit controls of each item")]
        edit: bool,
    },

    /// Add a bookmark at the end of the list
    Add {
        name: String,

        /// URL; https:// is assumed when no scheme is given
        url: String,

        #[arg(short = 'i', long = "icon", help = "emoji or short text shown before the name")]
        icon: Option<String>,
    },

    /// Change name, url or icon of a bookmark
    Edit {
        id: BookmarkId,

        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        #[arg(short = 'u', long = "url")]
        url: Option<String>,

        #[arg(short = 'i', long = "icon")]
        icon: Option<String>,
    },

    /// Delete a bookmark after confirmation
    Delete {
        id: BookmarkId,

        #[arg(short = 'y', long = "yes", help = "do not ask for confirmation")]
        yes: bool,
    },

    /// Move bookmark SOURCE to the position TARGET occupies
    Move { source: BookmarkId, target: BookmarkId },

    /// Open a bookmark in the default browser
    Open { id: BookmarkId },

    /// Show the local date and the configured world clocks
    Clock {
        #[arg(short = 'w', long = "watch", help = "refresh every second until Ctrl-C")]
        watch: bool,

        #[arg(long = "ticks", value_name = "N", help = "stop watching after N refreshes")]
        ticks: Option<u64>,
    },

    /// Render the new-tab page as static HTML
    Page {
        #[arg(short = 'o', long = "output", value_name = "FILE", help = "write to FILE instead of stdout")]
        output: Option<PathBuf>,

        #[arg(short = 'e', long = "edit", help = "render in edit mode")]
        edit: bool,
    },

    /// Interactive terminal interface
    Tui,

    /// Print the persisted bookmark JSON
    Export,

    /// Add bookmarks from an exported JSON file, skipping existing names
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}
