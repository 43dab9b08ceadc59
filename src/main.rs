// src/main.rs
use clap::Parser;
use newtab::cli::args::Cli;
use newtab::config::load_settings;
use newtab::exitcode;
use std::io::{IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();
    let no_color = cli.no_color;

    setup_logging(cli.debug, no_color);

    // Must work even when the current config or environment is broken
    if cli.generate_config {
        println!("{}", newtab::config::generate_default_config());
        return;
    }

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            report_error(&format!("Failed to load settings: {}", e), no_color);
            std::process::exit(exitcode::USAGE);
        }
    };

    if let Err(e) = newtab::cli::execute_command(cli, &settings) {
        debug!("command failed: {:?}", e);
        report_error(&format!("Error: {}", e), no_color);
        std::process::exit(e.exit_code());
    }
}

// use stderr as human output in order to make stdout output passable to downstream processes
fn report_error(message: &str, no_color: bool) {
    let choice = if no_color || !std::io::stderr().is_terminal() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
    let _ = writeln!(stderr, "{}", message);
    let _ = stderr.reset();
}

fn setup_logging(verbosity: u8, no_color: bool) {
    debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Terminal backends are chatty at trace level
    let noisy_modules = ["mio", "crossterm", "ratatui"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_cli_command_when_verify_then_debug_asserts_pass() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }
}
