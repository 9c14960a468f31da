//! # Branch Tree
//!
//! Everything behind `show-tree`: parsing `git branch -vv` output, linking
//! branches to their upstreams, and drawing the result.

pub mod entry;
pub mod graph;
pub mod render;

pub use entry::{BranchDescriptor, Divergence, parse_branch_entry, parse_branch_listing};
pub use graph::{BranchGraph, BranchNode};
pub use render::{RowKind, TreeRenderer, TreeRow};
