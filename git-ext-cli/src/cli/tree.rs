//! # Show Tree Command
//!
//! Draws local branches nested under the branches they track.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use console::Term;
use git_ext_core::TreeRenderer;
use git_ext_core::output::{print_info, print_warning};
use git_ext_core::workflow::Session;
use git_ext_core::workflow::tree::load_branch_graph;

/// Arguments for the show-tree command
#[derive(Args)]
pub struct TreeArgs {
  /// Add ahead/behind columns
  #[arg(long)]
  pub status: bool,
}

pub(crate) fn handle_tree_command(session: &Session, args: TreeArgs, colors: bool) -> Result<()> {
  let graph = load_branch_graph(session)?;
  if graph.is_empty() {
    print_info("No local branches.");
    return Ok(());
  }

  if graph.current().is_none() {
    print_warning("HEAD is not on a local branch");
  }

  let term = Term::stdout();
  let width = term.size_checked().map(|(_, cols)| usize::from(cols));
  let renderer = TreeRenderer::new(&graph, session.config.tree.clone(), session.config.remote_marker())
    .no_color(!colors)
    .show_status(args.status)
    .max_width(width);

  let rows = renderer.rows(&graph.roots())?;
  let mut stdout = io::stdout().lock();
  renderer
    .write_table(&mut stdout, &rows)
    .context("Failed to write the branch tree")?;
  stdout.flush()?;
  Ok(())
}
