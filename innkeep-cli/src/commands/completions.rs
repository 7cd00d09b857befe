//! `innkeep completions <shell>`: writes a completion script to stdout and
//! install hints to stderr.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Installed binary name
const BIN_NAME: &str = "innkeep";

/// Completion script generator.
#[derive(Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            match self.shell {
                Shell::Bash => {
                    eprintln!("# Install with:");
                    eprintln!("#   innkeep completions bash > ~/.local/share/bash-completion/completions/innkeep");
                }
                Shell::Zsh => {
                    eprintln!("# Install with:");
                    eprintln!("#   innkeep completions zsh > ~/.zsh/completions/_innkeep");
                    eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
                }
                Shell::Fish => {
                    eprintln!("# Install with:");
                    eprintln!("#   innkeep completions fish > ~/.config/fish/completions/innkeep.fish");
                }
                Shell::PowerShell => {
                    eprintln!("# Load with:");
                    eprintln!("#   innkeep completions powershell | Out-String | Invoke-Expression");
                }
                _ => {}
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
