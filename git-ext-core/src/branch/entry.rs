//! Parsing of `git branch -vv` lines into [`BranchDescriptor`]s.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::consts::MESSAGE_PLACEHOLDER;
use crate::error::{ParseError, ParseFailure};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static REMAINDER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(?:\[([^\]]*)\]\s*)?(.*)$").expect("valid remainder regex"));

static WORKTREE_PATH: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\([^)]*\)\s*").expect("valid worktree path regex"));

static DIVERGENCE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?:ahead (\d+))?(?:, )?(?:behind (\d+))?").expect("valid divergence regex"));

/// One local branch as reported by `git branch -vv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
  /// Checked out in this working copy
  pub current: bool,
  pub name: String,
  /// Abbreviated commit hash
  pub sha: String,
  /// Tracked branch, local or remote
  pub upstream: Option<String>,
  /// Ahead/behind annotation, possibly empty
  pub status: String,
  /// Subject of the tip commit
  pub message: String,
}

impl BranchDescriptor {
  /// Structured form of [`BranchDescriptor::status`].
  pub fn divergence(&self) -> Divergence {
    Divergence::parse(&self.status)
  }
}

/// How far a branch has drifted from its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divergence {
  pub ahead: Option<u32>,
  pub behind: Option<u32>,
  /// The upstream no longer exists on the remote
  pub gone: bool,
}

impl Divergence {
  pub fn parse(status: &str) -> Self {
    let status = status.trim();
    if status == "gone" {
      return Self {
        gone: true,
        ..Self::default()
      };
    }

    match DIVERGENCE.captures(status) {
      Some(caps) => Self {
        ahead: caps.get(1).and_then(|m| m.as_str().parse().ok()),
        behind: caps.get(2).and_then(|m| m.as_str().parse().ok()),
        gone: false,
      },
      None => Self::default(),
    }
  }
}

/// Parse one line of `git branch -vv` output.
///
/// The expected shape is `[*] <name> <sha> [[<upstream>[: <status>]]] <message>`.
/// A leading `+` (branch checked out in another worktree) is stripped like
/// `*` but does not mark the branch as current, and the `(<path>)` git prints
/// after its hash is dropped.
pub fn parse_branch_entry(line: &str) -> Result<BranchDescriptor, ParseError> {
  let trimmed = line.trim();
  let current = trimmed.starts_with('*');
  let other_worktree = trimmed.starts_with('+');
  let body = trimmed.trim_start_matches(['*', '+']).trim_start();

  let parts: Vec<&str> = WHITESPACE.splitn(body, 3).collect();
  let [name, sha, rest] = parts.as_slice() else {
    return Err(ParseError::new(line, ParseFailure::MissingFields));
  };
  if name.is_empty() || sha.is_empty() {
    return Err(ParseError::new(line, ParseFailure::MissingFields));
  }

  // Branches checked out elsewhere carry the worktree path before the upstream.
  let rest = if other_worktree {
    WORKTREE_PATH.replace(rest, "")
  } else {
    (*rest).into()
  };

  let caps = REMAINDER
    .captures(&rest)
    .ok_or_else(|| ParseError::new(line, ParseFailure::UnparseableRemainder))?;

  let (upstream, status) = match caps.get(1) {
    Some(bracket) => match bracket.as_str().split_once(": ") {
      Some((upstream, status)) => (Some(upstream.to_string()), status.to_string()),
      None => (Some(bracket.as_str().to_string()), String::new()),
    },
    None => (None, String::new()),
  };

  let message = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
  let message = if message.is_empty() {
    MESSAGE_PLACEHOLDER.to_string()
  } else {
    message.to_string()
  };

  Ok(BranchDescriptor {
    current,
    name: name.to_string(),
    sha: sha.to_string(),
    upstream: upstream.filter(|up| !up.is_empty()),
    status,
    message,
  })
}

/// Parse a full `git branch -vv` listing.
///
/// Blank lines and detached-HEAD entries are skipped. The first malformed
/// line aborts the whole listing.
pub fn parse_branch_listing(listing: &str) -> Result<Vec<BranchDescriptor>, ParseError> {
  let mut descriptors = Vec::new();
  for line in listing.lines() {
    if line.trim().is_empty() {
      continue;
    }
    if is_detached_head(line) {
      debug!(line, "skipping detached HEAD entry");
      continue;
    }
    descriptors.push(parse_branch_entry(line)?);
  }
  Ok(descriptors)
}

fn is_detached_head(line: &str) -> bool {
  let body = line.trim().trim_start_matches(['*', '+']).trim_start();
  body.starts_with("(HEAD detached") || body.starts_with("(no branch")
}

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;

  #[test]
  fn test_parses_current_branch_with_upstream_and_status() {
    let desc = parse_branch_entry("* feature/x abc1234 [origin/feature/x: ahead 2] add widget").unwrap();

    assert_eq!(
      desc,
      BranchDescriptor {
        current: true,
        name: "feature/x".to_string(),
        sha: "abc1234".to_string(),
        upstream: Some("origin/feature/x".to_string()),
        status: "ahead 2".to_string(),
        message: "add widget".to_string(),
      }
    );
  }

  #[test]
  fn test_without_bracket_group_message_is_whole_remainder() {
    let desc = parse_branch_entry("  scratch   9f8e7d6 wip: try [something] else").unwrap();

    assert!(!desc.current);
    assert_eq!(desc.name, "scratch");
    assert_eq!(desc.sha, "9f8e7d6");
    assert_eq!(desc.upstream, None);
    assert_eq!(desc.status, "");
    assert_eq!(desc.message, "wip: try [something] else");
  }

  #[test]
  fn test_bracket_without_status_is_all_upstream() {
    let desc = parse_branch_entry("  topic 1111111 [main] tidy up").unwrap();

    assert_eq!(desc.upstream.as_deref(), Some("main"));
    assert_eq!(desc.status, "");
    assert_eq!(desc.message, "tidy up");
  }

  #[test]
  fn test_empty_message_uses_placeholder() {
    let desc = parse_branch_entry("  topic 1111111 [main]").unwrap();

    assert_eq!(desc.upstream.as_deref(), Some("main"));
    assert_eq!(desc.message, MESSAGE_PLACEHOLDER);
  }

  #[test]
  fn test_worktree_branch_keeps_upstream() {
    let desc = parse_branch_entry("+ feat 2ebe410 (/tmp/_wt/wt2) [main: behind 1] base").unwrap();

    assert!(!desc.current);
    assert_eq!(desc.name, "feat");
    assert_eq!(desc.sha, "2ebe410");
    assert_eq!(desc.upstream.as_deref(), Some("main"));
    assert_eq!(desc.status, "behind 1");
    assert_eq!(desc.message, "base");
  }

  #[test]
  fn test_worktree_branch_without_upstream() {
    let desc = parse_branch_entry("+ spike 3c4d5e6 (/home/me/src/spike) try it").unwrap();

    assert_eq!(desc.upstream, None);
    assert_eq!(desc.message, "try it");
  }

  #[test]
  fn test_parenthesised_message_is_kept_on_plain_lines() {
    let desc = parse_branch_entry("  topic 1111111 (wip) half done").unwrap();

    assert_eq!(desc.message, "(wip) half done");
  }

  #[test_case("* lonely" ; "name only")]
  #[test_case("  lonely abc1234" ; "name and sha only")]
  #[test_case("*" ; "marker only")]
  #[test_case("" ; "empty line")]
  fn test_too_few_fields_is_an_error(line: &str) {
    let err = parse_branch_entry(line).unwrap_err();
    assert_eq!(err.reason, ParseFailure::MissingFields);
    assert_eq!(err.line, line);
  }

  #[test_case("ahead 2", Some(2), None, false ; "ahead only")]
  #[test_case("behind 3", None, Some(3), false ; "behind only")]
  #[test_case("ahead 1, behind 4", Some(1), Some(4), false ; "both")]
  #[test_case("gone", None, None, true ; "gone")]
  #[test_case("", None, None, false ; "even")]
  fn test_divergence(status: &str, ahead: Option<u32>, behind: Option<u32>, gone: bool) {
    let divergence = Divergence::parse(status);
    assert_eq!(divergence, Divergence { ahead, behind, gone });
  }

  #[test]
  fn test_listing_skips_blank_and_detached_lines() {
    let listing = "* (HEAD detached at 1a2b3c4) 1a2b3c4 bisecting\n  \n  main 5d6e7f8 [origin/main] release\n  topic 9a8b7c6 [main: ahead 1] feature\n";

    let descriptors = parse_branch_listing(listing).unwrap();

    let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["main", "topic"]);
    assert!(descriptors.iter().all(|d| !d.current));
  }

  #[test]
  fn test_listing_aborts_on_first_bad_line() {
    let listing = "  main 5d6e7f8 release\n  broken\n  topic 9a8b7c6 feature\n";

    let err = parse_branch_listing(listing).unwrap_err();
    assert_eq!(err.line, "  broken");
  }
}
