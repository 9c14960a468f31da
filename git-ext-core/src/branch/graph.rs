//! Linking parsed branches into an upstream/downstream forest.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::entry::BranchDescriptor;
use crate::error::CycleError;

/// A branch plus the names of the branches that track it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNode {
  pub desc: BranchDescriptor,
  /// Children in listing order
  pub downstream: Vec<String>,
}

impl BranchNode {
  pub fn name(&self) -> &str {
    &self.desc.name
  }

  pub fn upstream(&self) -> Option<&str> {
    self.desc.upstream.as_deref()
  }
}

/// All local branches keyed by name.
///
/// Nodes refer to their children by name only; lookups go back through the
/// graph.
#[derive(Debug, Clone, Default)]
pub struct BranchGraph {
  nodes: HashMap<String, BranchNode>,
  order: Vec<String>,
}

impl BranchGraph {
  /// Build the graph from descriptors in listing order.
  ///
  /// When a name appears twice the later descriptor replaces the earlier one
  /// but keeps its position.
  pub fn build(descriptors: impl IntoIterator<Item = BranchDescriptor>) -> Self {
    let mut nodes: HashMap<String, BranchNode> = HashMap::new();
    let mut order = Vec::new();

    for desc in descriptors {
      let name = desc.name.clone();
      let node = BranchNode {
        desc,
        downstream: Vec::new(),
      };
      if nodes.insert(name.clone(), node).is_some() {
        warn!(branch = %name, "branch listed more than once, keeping the last entry");
      } else {
        order.push(name);
      }
    }

    for name in &order {
      let Some(upstream) = nodes.get(name).and_then(|node| node.desc.upstream.clone()) else {
        continue;
      };
      if let Some(parent) = nodes.get_mut(&upstream) {
        parent.downstream.push(name.clone());
      }
    }

    Self { nodes, order }
  }

  pub fn get(&self, name: &str) -> Option<&BranchNode> {
    self.nodes.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.nodes.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Nodes in listing order.
  pub fn iter(&self) -> impl Iterator<Item = &BranchNode> {
    self.order.iter().filter_map(|name| self.nodes.get(name))
  }

  /// The checked-out branch, if the listing marked one.
  pub fn current(&self) -> Option<&BranchNode> {
    self.iter().find(|node| node.desc.current)
  }

  /// Distance from the top of the upstream chain.
  ///
  /// A branch without an upstream is at depth 0. A name missing from the
  /// graph (such as a remote-tracking upstream) also counts as depth 0, so
  /// a branch tracking it sits at depth 1.
  pub fn depth(&self, name: &str) -> Result<usize, CycleError> {
    let mut seen = HashSet::new();
    let mut path = Vec::new();
    let mut depth = 0;
    let mut cursor = name;

    while let Some(upstream) = self.nodes.get(cursor).and_then(BranchNode::upstream) {
      if !seen.insert(cursor) {
        path.push(cursor.to_string());
        return Err(CycleError { path });
      }
      path.push(cursor.to_string());
      depth += 1;
      cursor = upstream;
    }

    Ok(depth)
  }

  /// Branches with no upstream, or whose upstream is not a local branch,
  /// sorted by name.
  pub fn roots(&self) -> Vec<&BranchNode> {
    let mut roots: Vec<&BranchNode> = self
      .nodes
      .values()
      .filter(|node| node.upstream().is_none_or(|up| !self.contains(up)))
      .collect();
    roots.sort_by(|a, b| a.name().cmp(b.name()));
    roots
  }

  /// Fail if any upstream chain loops.
  ///
  /// Branches on a cycle have no root above them and would otherwise never
  /// be drawn.
  pub fn check_acyclic(&self) -> Result<(), CycleError> {
    for name in &self.order {
      self.depth(name)?;
    }
    Ok(())
  }
}
