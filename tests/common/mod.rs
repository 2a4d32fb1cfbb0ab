// Shared test helpers for integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_bithooker"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Runs the binary with the given stdin and args, hooks resolved on PATH.
/// Returns (stdout, stderr, exit_code).
pub fn run_bithooker(stdin_input: &str, args: &[&str]) -> (String, String, i32) {
    let mut all = vec!["--search-path"];
    all.extend_from_slice(args);
    run_bithooker_raw(stdin_input, &all, &[])
}

pub fn run_bithooker_with_settings(
    stdin_input: &str,
    settings: &str,
    args: &[&str],
) -> (String, String, i32) {
    let mut tmpfile = NamedTempFile::new().expect("failed to create temp settings");
    tmpfile
        .write_all(settings.as_bytes())
        .expect("failed to write settings");
    let settings_path = tmpfile.path().to_str().unwrap().to_string();
    let mut all = vec!["--config", settings_path.as_str()];
    all.extend_from_slice(args);
    run_bithooker_raw(stdin_input, &all, &[])
}

/// Runs the binary exactly as given, with extra environment variables.
pub fn run_bithooker_raw(
    stdin_input: &str,
    args: &[&str],
    envs: &[(&str, &str)],
) -> (String, String, i32) {
    let mut cmd = Command::new(binary_path());
    cmd.args(args);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    for key in [
        "BITHOOKER_FORMAT",
        "BITHOOKER_BODY",
        "BITHOOKER_OUTPUT",
        "BITHOOKER_HOOKS_DIR",
        "BITHOOKER_CONFIG",
        "BITHOOKER_LOG",
    ] {
        if !envs.iter().any(|(k, _)| *k == key) {
            cmd.env_remove(key);
        }
    }
    let output = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::ErrorKind;
            let write_result = child
                .stdin
                .take()
                .unwrap()
                .write_all(stdin_input.as_bytes());
            if let Err(e) = write_result {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            child.wait_with_output()
        })
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

/// A `sh -c` hook directive as positional arguments.
pub fn sh_hook(id: &str, script: &str) -> Vec<String> {
    vec![format!("sh@{id}"), " -c".to_string(), format!(" {script}")]
}

pub fn as_strs(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

pub fn read_marker(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
