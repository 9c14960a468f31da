//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output.

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply the mode as the process-wide override and report whether colors
  /// are on.
  pub fn apply(self) -> bool {
    match self {
      ColorMode::Always | ColorMode::Yes => {
        owo_colors::set_override(true);
        console::set_colors_enabled(true);
        true
      }
      ColorMode::Never | ColorMode::No => {
        owo_colors::set_override(false);
        console::set_colors_enabled(false);
        false
      }
      // Leave detection to the terminal
      ColorMode::Auto => console::colors_enabled(),
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
#[allow(clippy::print_stdout)]
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
#[allow(clippy::print_stderr)]
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
#[allow(clippy::print_stdout)]
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
#[allow(clippy::print_stdout)]
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}

/// Format a branch name
pub fn format_branch(name: &str) -> String {
  name.bright_cyan().bold().to_string()
}

/// Format the echo line for a git invocation
pub fn format_git_invocation(program: &str, args: &[&str]) -> String {
  format!("{} {}", program.bright_white().on_green(), args.join(" "))
}

/// Echo a git invocation before it runs
#[allow(clippy::print_stdout)]
pub fn print_git_invocation(program: &str, args: &[&str]) {
  println!("{}", format_git_invocation(program, args));
}
