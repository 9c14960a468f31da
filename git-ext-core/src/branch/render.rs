//! # Branch Tree Renderer
//!
//! Walks a [`BranchGraph`] from its roots and turns it into indented rows,
//! then lays the rows out as a borderless three column table (branch, hash,
//! commit subject) on any writer.

use std::collections::HashSet;
use std::io::{self, Write};

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::object::{Columns, Segment};
use tabled::settings::{Alignment, Padding, Style, Width};

use super::entry::Divergence;
use super::graph::{BranchGraph, BranchNode};
use crate::config::TreeStyle;
use crate::error::CycleError;

/// What a row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
  /// Upstream on the configured remote, drawn above its local children
  Remote,
  /// Upstream that is neither local nor on the remote
  Missing,
  Branch { current: bool },
}

/// One line of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
  pub label: String,
  pub sha: String,
  pub message: String,
  pub kind: RowKind,
  pub divergence: Divergence,
}

impl TreeRow {
  fn synthetic(label: String, kind: RowKind) -> Self {
    Self {
      label,
      sha: String::new(),
      message: String::new(),
      kind,
      divergence: Divergence::default(),
    }
  }
}

/// Turns a branch graph into rows and tables.
pub struct TreeRenderer<'a> {
  pub graph: &'a BranchGraph,
  pub style: TreeStyle,
  /// Upstreams containing this marker are drawn as remote branches
  pub remote_marker: String,
  pub no_color: bool,
  /// Add ahead/behind columns
  pub show_status: bool,
  /// Terminal width the table should fit in, if known
  pub max_width: Option<usize>,
}

impl<'a> TreeRenderer<'a> {
  pub fn new(graph: &'a BranchGraph, style: TreeStyle, remote_marker: impl Into<String>) -> Self {
    Self {
      graph,
      style,
      remote_marker: remote_marker.into(),
      no_color: false,
      show_status: false,
      max_width: None,
    }
  }

  pub const fn no_color(mut self, no_color: bool) -> Self {
    self.no_color = no_color;
    self
  }

  pub const fn show_status(mut self, show_status: bool) -> Self {
    self.show_status = show_status;
    self
  }

  pub const fn max_width(mut self, max_width: Option<usize>) -> Self {
    self.max_width = max_width;
    self
  }

  /// Rows for every tree hanging off `roots`, depth first.
  pub fn rows(&self, roots: &[&BranchNode]) -> Result<Vec<TreeRow>, CycleError> {
    let mut rows = Vec::new();
    let mut visited = HashSet::new();

    for root in roots {
      let depth = self.graph.depth(root.name())?;
      if let Some(row) = self.upstream_row(root, depth) {
        rows.push(row);
      }
      self.collect_rows(root, depth, &mut visited, &mut Vec::new(), &mut rows)?;
    }

    Ok(rows)
  }

  /// Row drawn above a root whose upstream is not a local branch.
  fn upstream_row(&self, root: &BranchNode, depth: usize) -> Option<TreeRow> {
    let upstream = root.upstream().filter(|up| !up.is_empty())?;
    let prefix = self.style.prefix_for_depth(depth.saturating_sub(1));

    if upstream.contains(&self.remote_marker) {
      Some(TreeRow::synthetic(format!("{prefix}{upstream}"), RowKind::Remote))
    } else if !self.graph.contains(upstream) {
      Some(TreeRow::synthetic(format!("{prefix}{upstream} [missing]"), RowKind::Missing))
    } else {
      None
    }
  }

  fn collect_rows(
    &self,
    node: &BranchNode,
    depth: usize,
    visited: &mut HashSet<String>,
    stack: &mut Vec<String>,
    rows: &mut Vec<TreeRow>,
  ) -> Result<(), CycleError> {
    if !visited.insert(node.name().to_string()) {
      let mut path = stack.clone();
      path.push(node.name().to_string());
      return Err(CycleError { path });
    }
    stack.push(node.name().to_string());

    let marker = if node.desc.current { "* " } else { "" };
    rows.push(TreeRow {
      label: format!("{}{}{}", self.style.prefix_for_depth(depth), marker, node.name()),
      sha: node.desc.sha.clone(),
      message: node.desc.message.clone(),
      kind: RowKind::Branch {
        current: node.desc.current,
      },
      divergence: node.desc.divergence(),
    });

    for child_name in &node.downstream {
      if let Some(child) = self.graph.get(child_name) {
        self.collect_rows(child, depth + 1, visited, stack, rows)?;
      }
    }

    stack.pop();
    Ok(())
  }

  /// Render `rows` as a table into `writer`.
  pub fn write_table<W: Write>(&self, writer: &mut W, rows: &[TreeRow]) -> io::Result<()> {
    if rows.is_empty() {
      return Ok(());
    }

    let mut builder = Builder::default();
    for row in rows {
      builder.push_record(self.cells(row));
    }

    let mut table = builder.build();
    table.with(Style::empty());
    table.modify(Segment::all(), Padding::new(0, 2, 0, 0));
    table.modify(Columns::first(), Alignment::left());
    table.modify(Columns::one(1), Width::truncate(self.style.sha_width.max(1)));
    table.modify(Columns::one(1), Alignment::right());
    table.modify(Columns::last(), Alignment::left());
    table.modify(Columns::last(), Padding::zero());

    if let Some(width) = self.message_width(rows) {
      table.modify(Columns::last(), Width::truncate(width).suffix("…"));
    }

    for line in table.to_string().lines() {
      writeln!(writer, "{}", line.trim_end())?;
    }
    Ok(())
  }

  /// Room left for the message column once the other columns are laid out.
  fn message_width(&self, rows: &[TreeRow]) -> Option<usize> {
    let max_width = self.max_width?;
    let label_width = rows
      .iter()
      .map(|row| console::measure_text_width(&row.label))
      .max()
      .unwrap_or(0);
    let sha_width = rows
      .iter()
      .map(|row| row.sha.chars().count())
      .max()
      .unwrap_or(0)
      .min(self.style.sha_width);
    let status_width = if self.show_status { 2 * (6 + 2) } else { 0 };

    let used = label_width + 2 + sha_width + 2 + status_width;
    Some(max_width.saturating_sub(used).max(10))
  }

  fn cells(&self, row: &TreeRow) -> Vec<String> {
    let mut cells = vec![self.paint_label(row), row.sha.clone()];

    if self.show_status {
      let ahead = row.divergence.ahead.map(|n| format!("+{n}")).unwrap_or_default();
      let behind = match (row.divergence.behind, row.divergence.gone) {
        (_, true) => "gone".to_string(),
        (Some(n), false) => format!("-{n}"),
        (None, false) => String::new(),
      };
      cells.push(self.paint(ahead, |s| s.green().to_string()));
      cells.push(self.paint(behind, |s| s.red().to_string()));
    }

    let message = match row.kind {
      RowKind::Branch { current: true } => self.paint(row.message.clone(), |s| s.green().to_string()),
      _ => row.message.clone(),
    };
    cells.push(message);
    cells
  }

  fn paint_label(&self, row: &TreeRow) -> String {
    let label = row.label.clone();
    match row.kind {
      RowKind::Remote => self.paint(label, |s| s.blue().to_string()),
      RowKind::Missing => self.paint(label, |s| s.red().to_string()),
      RowKind::Branch { current: true } => self.paint(label, |s| s.green().bold().to_string()),
      RowKind::Branch { current: false } => label,
    }
  }

  fn paint(&self, text: String, color: impl Fn(&str) -> String) -> String {
    if self.no_color || text.is_empty() {
      text
    } else {
      color(&text)
    }
  }
}
