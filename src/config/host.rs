use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Process-wide state the run depends on, captured once and passed down
/// explicitly.
#[derive(Debug, Clone)]
pub struct Host {
    /// Environment every hook inherits.
    pub env: Vec<(OsString, OsString)>,
    /// Directory hooks are looked up in when nothing else is configured.
    pub executable_dir: PathBuf,
}

impl Host {
    pub fn current() -> Self {
        Host {
            env: std::env::vars_os().collect(),
            executable_dir: executable_dir(),
        }
    }
}

/// Directory of `argv[0]`, falling back to the resolved executable and then
/// the working directory. Hooks installed next to the binary are found this way.
fn executable_dir() -> PathBuf {
    std::env::args_os()
        .next()
        .and_then(|arg0| parent(Path::new(&arg0)))
        .or_else(|| std::env::current_exe().ok().and_then(|exe| parent(&exe)))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parent(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
