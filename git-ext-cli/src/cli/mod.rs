//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches each subcommand to its handler
//! with a git session built from the user's configuration.

mod commit;
mod completion;
mod info;
mod remote;
mod tree;
mod upstream;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use git_ext_core::output::ColorMode;
use git_ext_core::{GitExtConfig, GitRunner, Session, SystemGit};
use tracing::debug;

/// Top-level CLI command for git-ext
#[derive(Parser)]
#[command(name = "git-ext")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Shortcuts for working with stacked git branches")]
#[command(
  long_about = "git-ext bundles the git sequences needed to keep a stack of single-commit\n\
        branches in shape: rebuilding a branch on its upstream, splitting the tip commit\n\
        off into a new branch, drawing the branch tree and purging merged branches.\n\n\
        Put the binary on your PATH to run it as `git ext <command>`."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages and echo every git command\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Run git in this directory instead of the current one
  #[arg(short = 'C', long = "repo", value_name = "PATH")]
  pub repo: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for git-ext
#[derive(Subcommand)]
pub enum Commands {
  /// Print the full hash of HEAD
  #[command(name = "lasthash", alias = "lh")]
  LastHash,

  /// Print the upstream of the current branch
  #[command(alias = "shup")]
  ShowUp,

  /// Rebuild the current branch on its upstream
  #[command(long_about = "Rebuild the current branch on its upstream.\n\n\
            Resets the branch to its upstream and cherry-picks the previous tip commit\n\
            back on top. Only the tip commit is kept, so use it on single-commit branches.")]
  #[command(alias = "fu")]
  FixUp,

  /// Track BRANCH and rebuild the current branch on it
  Up(upstream::UpArgs),

  /// Rebuild every branch between TERMINAL and the current branch
  #[command(long_about = "Rebuild a whole stack of branches.\n\n\
            Follows upstreams from the current branch until TERMINAL is reached, then\n\
            rebuilds each branch on its upstream starting with the one closest to\n\
            TERMINAL. With --push every rebuilt branch is force-pushed.")]
  #[command(alias = "rup")]
  RecFixUp(upstream::RecFixUpArgs),

  /// Move the tip commit onto a new branch stacked on the current one
  #[command(name = "commit-br", alias = "cbr")]
  CommitBr(commit::CommitBranchArgs),

  /// Show local branches nested under their upstreams
  #[command(alias = "tree")]
  ShowTree(tree::TreeArgs),

  /// Force-push the current branch to the remote
  #[command(alias = "po")]
  PushOrigin,

  /// Delete local branches whose remote branches were pruned
  #[command(long_about = "Delete local branches whose remote branches are gone.\n\n\
            Asks `git remote prune` which remote-tracking branches under PREFIX/ would be\n\
            pruned, deletes the matching local branches and then prunes the remote.")]
  Purge(remote::PurgeArgs),

  /// Stage everything, amend the tip commit and force-push
  #[command(alias = "aap")]
  AddAmendPushOrigin,

  /// Pull the base branch and rebuild the current branch on it
  #[command(alias = "rl")]
  RebaseOntoLatest(upstream::RebaseOntoLatestArgs),

  /// Reset the current branch to its copy on the remote
  #[command(alias = "rho")]
  ResetHardOrigin,

  /// Generate shell completions
  #[command(long_about = "Generates shell completion scripts for git-ext commands.\n\n\
            Supported shells include bash, zsh, fish, elvish and powershell.")]
  Completion(completion::CompletionArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  let Cli {
    verbose,
    colors,
    repo,
    command,
  } = cli;
  let colors = colors.apply();

  if let Commands::Completion(completion) = command {
    return completion::handle_completion_command(completion);
  }

  let session = build_session(verbose > 0, repo)?;

  match command {
    Commands::LastHash => info::handle_lasthash_command(&session),
    Commands::ShowUp => info::handle_show_up_command(&session),
    Commands::FixUp => upstream::handle_fix_up_command(&session),
    Commands::Up(up) => upstream::handle_up_command(&session, up),
    Commands::RecFixUp(rec) => upstream::handle_rec_fix_up_command(&session, rec),
    Commands::CommitBr(commit) => commit::handle_commit_branch_command(&session, commit),
    Commands::ShowTree(tree) => tree::handle_tree_command(&session, tree, colors),
    Commands::PushOrigin => remote::handle_push_origin_command(&session),
    Commands::Purge(purge) => remote::handle_purge_command(&session, purge),
    Commands::AddAmendPushOrigin => remote::handle_add_amend_push_origin_command(&session),
    Commands::RebaseOntoLatest(rebase) => upstream::handle_rebase_onto_latest_command(&session, rebase),
    Commands::ResetHardOrigin => remote::handle_reset_hard_origin_command(&session),
    Commands::Completion(completion) => completion::handle_completion_command(completion),
  }
}

fn build_session(verbose: bool, repo: Option<PathBuf>) -> Result<Session> {
  let config = GitExtConfig::load()?;
  let mut git = SystemGit::new(config.git.clone());
  if let Some(repo) = repo {
    debug!(repo = %repo.display(), "running git outside the current directory");
    git = git.in_dir(repo);
  }
  Ok(Session::new(GitRunner::new(git, verbose), config))
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_aliases_resolve() {
    let cli = Cli::try_parse_from(["git-ext", "rup", "main", "--push"]).unwrap();
    match cli.command {
      Commands::RecFixUp(args) => {
        assert_eq!(args.terminal, "main");
        assert!(args.push);
      }
      _ => panic!("expected rec-fix-up"),
    }

    let cli = Cli::try_parse_from(["git-ext", "tree", "--status"]).unwrap();
    assert!(matches!(cli.command, Commands::ShowTree(tree::TreeArgs { status: true })));
  }

  #[test]
  fn test_global_flags() {
    let cli = Cli::try_parse_from(["git-ext", "-vv", "--colors", "never", "-C", "/tmp/repo", "lh"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Never);
    assert_eq!(cli.repo, Some(PathBuf::from("/tmp/repo")));
    assert!(matches!(cli.command, Commands::LastHash));
  }

  #[test]
  fn test_purge_requires_prefix() {
    assert!(Cli::try_parse_from(["git-ext", "purge"]).is_err());
    let cli = Cli::try_parse_from(["git-ext", "purge", "me", "-y"]).unwrap();
    assert!(matches!(cli.command, Commands::Purge(remote::PurgeArgs { ref prefix, yes: true }) if prefix == "me"));
  }

  #[test]
  fn test_rebase_onto_latest_base_is_optional() {
    let cli = Cli::try_parse_from(["git-ext", "rl"]).unwrap();
    assert!(matches!(
      cli.command,
      Commands::RebaseOntoLatest(upstream::RebaseOntoLatestArgs { branch: None })
    ));
  }
}
