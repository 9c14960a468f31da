//! # Shell Completion
//!
//! Generates shell completion scripts so subcommands and their aliases tab
//! complete.

use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write the completion script for `shell` to `writer`
pub fn write_completions<W: Write>(shell: Shell, writer: &mut W) -> Result<()> {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();

  generate(shell, &mut cmd, app_name, writer);

  Ok(())
}

/// Generate shell completions for the specified shell on stdout
pub fn generate_completions(shell: Shell) -> Result<()> {
  write_completions(shell, &mut io::stdout())
}

#[cfg(test)]
mod tests {
  use clap_complete::Shell;

  use super::write_completions;

  #[test]
  fn test_generate_completions_succeeds() {
    let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

    for shell in shells {
      let mut out = Vec::new();
      let result = write_completions(shell, &mut out);
      assert!(result.is_ok(), "Failed to generate completions for {shell:?}");
      assert!(!out.is_empty());
    }
  }

  #[test]
  fn test_bash_completions_include_subcommands() {
    let mut out = Vec::new();
    write_completions(Shell::Bash, &mut out).unwrap();
    let script = String::from_utf8(out).unwrap();
    assert!(script.contains("rec-fix-up"));
    assert!(script.contains("show-tree"));
  }
}
