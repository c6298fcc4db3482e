#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use hyd::task::Task;
use tempfile::TempDir;

/// A throwaway root directory plus a command runner with a clean
/// environment (no ambient HYD_* variables leaking in).
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("hyd").expect("hyd binary");
        cmd.current_dir(self.path());
        cmd.env_remove("HYD_ROOT");
        cmd.env_remove("HYD_ACTOR");
        cmd.env_remove("HYD_ROLE");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path().join(".hyd")
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir().join("tasks.json")
    }

    pub fn read_tasks(&self) -> Vec<Task> {
        let raw = fs::read_to_string(self.tasks_file()).expect("read tasks.json");
        serde_json::from_str(&raw).expect("parse tasks.json")
    }

    pub fn write_tasks_raw(&self, raw: &str) {
        fs::create_dir_all(self.data_dir()).expect("create data dir");
        fs::write(self.tasks_file(), raw).expect("write tasks.json");
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.path().join(".hyd.toml"), contents).expect("write config");
    }
}

/// Parse the pretty JSON envelope a `--json` invocation prints.
pub fn parse_envelope(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout is a JSON envelope")
}
