//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A small palette covering neutrals, brown, and several hue bands.
pub const SAMPLE_CSV: &str = "\
Name,HEX,RGB,Notes
Vibrant Red,#FF0000,,primary
Forest,,\"rgb(34, 139, 34)\",
Sky Blue,87CEEB,,light
Mocha,#78503C,,
Slate,,\"rgb(128, 128, 128)\",
Snow,#fff,,
";

/// A palette with records that fall back to black.
pub const BROKEN_CSV: &str = "\
Name,HEX,RGB
Good,#000080,
Garbage,,notacolor
Empty,,
";

/// Path to the colorfamily binary
pub fn colorfamily_bin() -> &'static str {
    env!("CARGO_BIN_EXE_colorfamily")
}

/// Temp workspace with an isolated config directory.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Writes `content` to `name` inside the workspace.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Builds a command whose config lives in this workspace.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(colorfamily_bin());
        cmd.env("COLORFAMILY_CONFIG_DIR", self.config_dir());
        cmd.env_remove("RUST_LOG");
        cmd.current_dir(self.dir.path());
        cmd.args(args);
        cmd
    }

    /// Runs the binary and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute colorfamily")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Asserts the exit code, showing stderr on failure.
pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code. stdout: {} stderr: {}",
        stdout(output),
        stderr(output)
    );
}
