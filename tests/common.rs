#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn hours() -> Command {
    cargo_bin_cmd!("hours")
}

/// Isolated config location: the directory must outlive the returned path.
pub fn temp_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.yaml");
    (dir, path)
}

/// `hours --config <path> <args...>`
pub fn hours_with(cfg: &std::path::Path, args: &[&str]) -> Command {
    let mut cmd = hours();
    cmd.arg("--config").arg(cfg).args(args);
    cmd
}
