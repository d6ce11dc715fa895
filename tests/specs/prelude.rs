//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for testing `prizm` CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Resolve a binary built elsewhere in this workspace. `prizm` lives in the
/// `prizm-cli` package, a sibling of this root `prizm-specs` test package,
/// so `CARGO_BIN_EXE_*` (only set for a package's own binaries) doesn't
/// reach it — find it relative to the shared `target/` dir instead.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }
    standard
}

fn prizm_binary() -> PathBuf {
    binary_path("prizm")
}

/// Temporary scope directory plus an isolated state dir, wired up so every
/// `prizm` invocation against it never touches the real filesystem outside
/// the test's own tempdirs.
pub struct Project {
    dir: tempfile::TempDir,
    state_dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty scope directory (not yet initialized — the first
    /// `prizm` call against it runs migrations).
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap(), state_dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    /// Write a file under the scope directory, creating parent dirs.
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Build a `prizm` command rooted at this project's scope directory.
    pub fn cli(&self) -> CliBuilder {
        CliBuilder::new().pwd(self.path()).env("PRIZM_STATE_DIR", self.state_path())
    }
}

/// High-level CLI builder for fluent test assertions.
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdin: Option<Vec<u8>>,
}

impl CliBuilder {
    fn new() -> Self {
        Self { args: Vec::new(), dir: None, envs: Vec::new(), stdin: None }
    }

    /// Feed `text` to the child process's stdin.
    pub fn stdin(mut self, text: impl Into<String>) -> Self {
        self.stdin = Some(text.into().into_bytes());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string_lossy().to_string()));
        self
    }

    fn spawn(self) -> Output {
        let mut cmd = Command::new(prizm_binary());
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        cmd.env_remove("PRIZM_SCOPE_ROOT");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("prizm binary should be built by `cargo test`");
        if let Some(stdin) = self.stdin {
            child.stdin.take().unwrap().write_all(&stdin).unwrap();
        } else {
            drop(child.stdin.take());
        }
        child.wait_with_output().expect("command should run")
    }

    /// Run and expect success (exit code 0).
    pub fn passes(self) -> RunAssert {
        let output = self.spawn();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code).
    pub fn fails(self) -> RunAssert {
        let output = self.spawn();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions.
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout does not contain '{expected}'\nstdout: {stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr does not contain '{expected}'\nstderr: {stderr}");
        self
    }
}
