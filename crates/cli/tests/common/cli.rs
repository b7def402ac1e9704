//! CLI command execution helpers
//!
//! Thin wrapper around the `lull` binary that pins every invocation to a
//! store directory and captures output.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// `lull` invocation builder
pub struct LullCommand {
    store_dir: PathBuf,
    args: Vec<String>,
    stdin_data: Option<String>,
}

impl LullCommand {
    /// Create a command operating on the given store directory
    pub fn new(store_dir: impl AsRef<Path>) -> Self {
        Self {
            store_dir: store_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            stdin_data: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Provide stdin data
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    pub fn execute(&self) -> Result<CommandResult> {
        let mut child = Command::new(env!("CARGO_BIN_EXE_lull"))
            .arg("--store")
            .arg(&self.store_dir)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn lull")?;

        // Dropping stdin signals EOF
        if let Some(mut stdin) = child.stdin.take() {
            if let Some(data) = &self.stdin_data {
                stdin.write_all(data.as_bytes())?;
            }
        }

        let output = child
            .wait_with_output()
            .context("Failed to wait for lull")?;

        Ok(CommandResult {
            stdout: strip_ansi(&String::from_utf8_lossy(&output.stdout)),
            stderr: strip_ansi(&String::from_utf8_lossy(&output.stderr)),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Captured command output (ANSI colors removed)
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Count stdout lines starting with `prefix`
    pub fn count_lines(&self, prefix: &str) -> usize {
        self.stdout
            .lines()
            .filter(|line| line.trim_start().starts_with(prefix))
            .count()
    }

    /// ID printed by `lull new` ("Created <id>")
    pub fn created_id(&self) -> Option<String> {
        self.stdout
            .lines()
            .find_map(|line| line.strip_prefix("Created "))
            .map(|id| id.trim().to_string())
    }
}

/// Remove `ESC [ ... m` color sequences
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
