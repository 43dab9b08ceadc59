// src/cli/completion.rs
use crate::cli::args::Cli;
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io::{self, Write};
use tracing::{debug, instrument};

/// Generates the completion script for `shell` ("bash", "zsh" or "fish") into `out`.
///
/// ```bash
/// eval "$(newtab completion bash)"
/// newtab completion fish > ~/.config/fish/completions/newtab.fish
/// ```
#[instrument(level = "debug", skip(out))]
pub fn generate_completion<W: Write>(shell: &str, out: &mut W) -> io::Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match shell.to_lowercase().as_str() {
        "bash" => {
            debug!("Generating bash completion");
            generate(Bash, &mut cmd, bin_name, out);
        }
        "zsh" => {
            debug!("Generating zsh completion");
            generate(Zsh, &mut cmd, bin_name, out);
        }
        "fish" => {
            debug!("Generating fish completion");
            generate(Fish, &mut cmd, bin_name, out);
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unsupported shell: {}. Supported shells: bash, zsh, fish", shell),
            ))
        }
    }
    Ok(())
}
