use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use git_ext_test_utils::{GitRepoTestGuard, checkout_branch, create_branch, create_commit, set_upstream};

fn stacked_repo() -> GitRepoTestGuard {
  let guard = GitRepoTestGuard::new();
  create_commit(&guard.repo, "README.md", "hello", "initial commit").unwrap();
  create_branch(&guard.repo, "feature", None).unwrap();
  set_upstream(&guard.repo, "feature", "main").unwrap();
  checkout_branch(&guard.repo, "feature").unwrap();
  create_commit(&guard.repo, "feature.txt", "feature", "add feature").unwrap();
  guard
}

#[test]
fn help_lists_subcommands() {
  cargo_bin_cmd!("git-ext")
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("lasthash"))
    .stdout(predicate::str::contains("rec-fix-up"))
    .stdout(predicate::str::contains("commit-br"))
    .stdout(predicate::str::contains("show-tree"))
    .stdout(predicate::str::contains("purge"));
}

#[test]
fn lasthash_prints_full_hash() {
  let guard = stacked_repo();

  cargo_bin_cmd!("git-ext")
    .env("GIT_EXT_CONFIG", guard.path().join("missing.toml"))
    .args(["--colors", "never", "lasthash"])
    .current_dir(guard.path())
    .assert()
    .success()
    .stdout(predicate::str::is_match("^[0-9a-f]{40}\n$").unwrap());
}

#[test]
fn verbose_echoes_git_command_and_output() {
  let guard = stacked_repo();

  cargo_bin_cmd!("git-ext")
    .env("GIT_EXT_CONFIG", guard.path().join("missing.toml"))
    .args(["-v", "--colors", "never", "lasthash"])
    .current_dir(guard.path())
    .assert()
    .success()
    .stdout(
      predicate::str::is_match(r"(?m)^git log -n 1 --pretty=format:%H\n[0-9a-f]{40}\n[0-9a-f]{40}\n$").unwrap(),
    );
}

#[test]
fn show_tree_prints_each_branch() {
  let guard = stacked_repo();

  cargo_bin_cmd!("git-ext")
    .env("GIT_EXT_CONFIG", guard.path().join("missing.toml"))
    .args(["--colors", "never", "show-tree"])
    .current_dir(guard.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("main"))
    .stdout(predicate::str::contains("└─ * feature"))
    .stdout(predicate::str::contains("add feature"));
}

#[test]
fn repo_flag_runs_git_elsewhere() {
  let guard = stacked_repo();

  cargo_bin_cmd!("git-ext")
    .env("GIT_EXT_CONFIG", guard.path().join("missing.toml"))
    .arg("-C")
    .arg(guard.path())
    .arg("show-up")
    .assert()
    .success()
    .stdout("main\n");
}

#[test]
fn commit_br_rejects_empty_name() {
  let guard = stacked_repo();

  cargo_bin_cmd!("git-ext")
    .env("GIT_EXT_CONFIG", guard.path().join("missing.toml"))
    .args(["commit-br", ""])
    .current_dir(guard.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("branch name must not be empty"));
}

#[test]
fn config_file_is_honored() {
  let guard = stacked_repo();
  let config = guard.path().join("git-ext.toml");
  std::fs::write(&config, "[tree]\nglyph = \"+-- \"\n").unwrap();

  cargo_bin_cmd!("git-ext")
    .env("GIT_EXT_CONFIG", &config)
    .args(["--colors", "never", "tree"])
    .current_dir(guard.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("+-- * feature"));
}
