//! Constants for git-ext
//!
//! Executable names, environment variables and the default values used when
//! no configuration file is present.

/// Environment variable pointing at an alternative configuration file
pub const ENV_CONFIG_PATH: &str = "GIT_EXT_CONFIG";

/// Platform-specific Git executable name
#[cfg(windows)]
#[cfg_attr(not(windows), allow(dead_code))]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
#[cfg_attr(windows, allow(dead_code))]
pub const GIT_EXECUTABLE: &str = "git";

/// Remote used for pushing, pruning and recognising remote-tracking upstreams
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch `rebase-onto-latest` pulls when none is given
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Shown in place of an empty commit subject
pub const MESSAGE_PLACEHOLDER: &str = "(no commit message)";

/// Spaces per tree level
pub const DEFAULT_INDENT: usize = 2;

/// Drawn in front of every nested branch
pub const DEFAULT_BRANCH_GLYPH: &str = "└─ ";

/// Widest abbreviated hash shown before truncation
pub const DEFAULT_SHA_WIDTH: usize = 12;
