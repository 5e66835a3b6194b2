use std::io::Write;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

pub fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let script = render_completions(shell);

    match output_path {
        Some(path) => {
            std::fs::write(path, script)?;
            println!("{}", path.display());
        }
        None => std::io::stdout().lock().write_all(script.as_bytes())?,
    }
    Ok(())
}

/// Completion script for `shell`, named after the binary clap knows.
pub fn render_completions(shell: CompletionShell) -> String {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    let mut script = Vec::new();
    generate(clap_shell(shell), &mut command, bin_name, &mut script);
    String::from_utf8_lossy(&script).into_owned()
}

const fn clap_shell(shell: CompletionShell) -> Shell {
    match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
    }
}
