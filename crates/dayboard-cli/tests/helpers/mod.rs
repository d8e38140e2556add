use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary data file
pub struct CliTestHarness {
    temp_dir: TempDir,
    data_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary data file
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_path = temp_dir.path().join("board.json");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("dayboard").expect("Failed to find dayboard binary");

        // Point the data file into the temp directory and keep the working
        // directory there too, so no stray dayboard.toml is picked up.
        cmd.env("DAYBOARD_DATA_FILE", &self.data_path);
        cmd.current_dir(self.temp_dir.path());

        cmd
    }

    /// Get the data file path for this test instance
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Helper to run a command, assert success, and return its stdout
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let assert = self.command().args(args).assert().success();
        String::from_utf8_lossy(&assert.get_output().stdout).to_string()
    }
}

/// Pulls the full task UUID out of `add` output. The ID is printed inside
/// color escapes, so scan for the UUID shape instead of splitting words.
pub fn extract_task_id(output: &str) -> String {
    let chars: Vec<char> = output.chars().collect();
    let is_uuid_char = |c: &char| c.is_ascii_hexdigit() || *c == '-';
    for window in chars.windows(36) {
        if window.iter().all(is_uuid_char)
            && window[8] == '-'
            && window[13] == '-'
            && window[18] == '-'
            && window[23] == '-'
        {
            return window.iter().collect();
        }
    }
    panic!("no task ID found in output:\n{}", output);
}

/// Utility predicates for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output indicates successful task creation
    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created task")
            .or(predicate::str::contains("Created recurring task"))
    }

    /// Predicate to check if output contains agenda/list table headers
    pub fn has_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID").and(predicate::str::contains("Task"))
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
