//! Shared test helpers for waiver-request integration tests.
//!
//! All tests use temp directories. Each fixture holds a `waivers/` folder and
//! an `ids.txt` file side by side.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

pub const JANE: &str = "100_Jane Doe_KCS Records Consent_2023.pdf";
pub const JOHN: &str = "101_John Roe_KCS Records Consent_2023.pdf";

/// A temp dir with a waiver folder and an IDs file.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Create the waiver folder with `files` and write `ids` to `ids.txt`.
    pub fn new(files: &[&str], ids: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::create_dir(dir.path().join("waivers")).expect("failed to create waivers dir");
        let fx = Self { dir };
        for name in files {
            fx.add_waiver(name);
        }
        std::fs::write(fx.ids_file(), ids).expect("failed to write ids.txt");
        fx
    }

    pub fn add_waiver(&self, name: &str) {
        std::fs::write(self.folder().join(name), b"%PDF-1.4\n").expect("failed to write waiver");
    }

    pub fn folder(&self) -> PathBuf {
        self.dir.path().join("waivers")
    }

    pub fn ids_file(&self) -> PathBuf {
        self.dir.path().join("ids.txt")
    }

    /// Run the binary on this fixture with extra `args`, feeding `stdin`.
    pub fn run(&self, args: &[&str], stdin: &str) -> Output {
        let folder = self.folder();
        let ids = self.ids_file();
        let mut full: Vec<&str> = vec![
            folder.to_str().expect("utf-8 temp path"),
            ids.to_str().expect("utf-8 temp path"),
        ];
        full.extend_from_slice(args);
        run_in(self.dir.path(), &full, stdin)
    }
}

/// Run waiver-request with `args` in `dir`, feeding `stdin`.
pub fn run_in(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_waiver-request"))
        .args(args)
        .current_dir(dir)
        .env_remove("WAIVER_LOG")
        .env_remove("WAIVER_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to execute waiver-request");
    // The binary may exit before reading stdin (e.g. on a naming violation).
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes());
    child.wait_with_output().expect("failed to wait for waiver-request")
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

/// Assert the process exited with `code`, showing output on failure.
pub fn assert_exit(out: &Output, code: i32) {
    assert_eq!(
        out.status.code(),
        Some(code),
        "unexpected exit status\nstdout: {}\nstderr: {}",
        stdout(out),
        stderr(out),
    );
}
