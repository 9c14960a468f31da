//! # Configuration Management
//!
//! Locates and loads the optional `config.toml` holding the remote name,
//! default base branch, git executable and tree drawing settings. Every key
//! has a default, so a missing file is the same as an empty one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts;

/// Represents the configuration directory for git-ext
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "git-ext").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }
}

/// How the branch tree is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeStyle {
  /// Spaces per depth level
  pub indent: usize,
  /// Drawn between the indentation and a nested branch name
  pub glyph: String,
  /// Widest hash shown before truncation
  pub sha_width: usize,
}

impl Default for TreeStyle {
  fn default() -> Self {
    Self {
      indent: consts::DEFAULT_INDENT,
      glyph: consts::DEFAULT_BRANCH_GLYPH.to_string(),
      sha_width: consts::DEFAULT_SHA_WIDTH,
    }
  }
}

impl TreeStyle {
  /// Indentation and glyph for a row at `depth`; roots get no prefix.
  pub fn prefix_for_depth(&self, depth: usize) -> String {
    if depth == 0 {
      String::new()
    } else {
      format!("{}{}", " ".repeat(self.indent * depth), self.glyph)
    }
  }
}

/// User settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitExtConfig {
  /// Remote used for pushing, pruning and marking remote upstreams
  pub remote: String,
  /// Branch `rebase-onto-latest` pulls when none is given
  pub default_base: String,
  /// git executable to run
  pub git: String,
  /// Run `submodule init` / `submodule update` after rewriting a branch
  pub update_submodules: bool,
  pub tree: TreeStyle,
}

impl Default for GitExtConfig {
  fn default() -> Self {
    Self {
      remote: consts::DEFAULT_REMOTE.to_string(),
      default_base: consts::DEFAULT_BASE_BRANCH.to_string(),
      git: consts::GIT_EXECUTABLE.to_string(),
      update_submodules: true,
      tree: TreeStyle::default(),
    }
  }
}

impl GitExtConfig {
  /// Load from the path in `GIT_EXT_CONFIG`, or from the platform config
  /// directory.
  pub fn load() -> Result<Self> {
    let path = match std::env::var_os(consts::ENV_CONFIG_PATH) {
      Some(path) => PathBuf::from(path),
      None => ConfigDirs::new()?.config_path(),
    };
    Self::load_from(&path)
  }

  /// Load from `path`, falling back to defaults if the file does not exist.
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!(path = %path.display(), "no config file, using defaults");
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: GitExtConfig =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;

    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
  }

  /// Prefix identifying upstreams that live on the configured remote.
  pub fn remote_marker(&self) -> String {
    format!("{}/", self.remote)
  }
}
