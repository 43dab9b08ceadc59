// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use clap::CommandFactory;
use std::io;

pub mod args;
pub mod bookmark_commands;
pub mod clock_commands;
pub mod completion;
pub mod display;
pub mod error;
pub mod tui;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    let no_color = cli.no_color;
    let command = match cli.command {
        Some(Commands::Completion { shell }) => return handle_completion(&shell),
        Some(command) => command,
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    let services = ServiceContainer::new(settings)?;
    match command {
        Commands::List { is_json, edit } => bookmark_commands::list(&services, is_json, edit, no_color),
        Commands::Add { name, url, icon } => bookmark_commands::add(&services, name, url, icon, no_color),
        Commands::Edit { id, name, url, icon } => {
            bookmark_commands::edit(&services, id, name, url, icon, no_color)
        }
        Commands::Delete { id, yes } => bookmark_commands::delete(&services, id, yes, no_color),
        Commands::Move { source, target } => {
            bookmark_commands::move_bookmark(&services, source, target, no_color)
        }
        Commands::Open { id } => bookmark_commands::open(&services, id, no_color),
        Commands::Clock { watch, ticks } => clock_commands::clock(&services.clock_poller, watch, ticks),
        Commands::Page { output, edit } => {
            bookmark_commands::page(&services, output.as_deref(), edit, no_color)
        }
        Commands::Tui => tui::run(&services),
        Commands::Export => bookmark_commands::export(&services, no_color),
        Commands::Import { file } => bookmark_commands::import(&services, &file, no_color),
        Commands::Completion { shell } => handle_completion(&shell),
    }
}

fn handle_completion(shell: &str) -> CliResult<()> {
    // Installation hint on stderr, script on stdout
    match shell.to_lowercase().as_str() {
        "bash" => eprintln!("# To use, run: eval \"$(newtab completion bash)\""),
        "zsh" => eprintln!("# To use, run: newtab completion zsh > ~/.zfunc/_newtab"),
        "fish" => eprintln!(
            "# To use, run: newtab completion fish > ~/.config/fish/completions/newtab.fish"
        ),
        _ => {}
    }

    completion::generate_completion(shell, &mut io::stdout()).map_err(|e| {
        CliError::CommandFailed(format!("Failed to generate completion script: {}", e))
    })
}
