//! Sequential, fail-fast execution of decoded hooks.
//!
//! Each hook runs to completion before the next one starts. The first hook
//! that cannot be launched or exits non-zero stops the run; later hooks are
//! never started.

mod relay;

use std::borrow::Cow;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{ChildStderr, ChildStdin, Command, ExitStatus, Stdio};
use std::thread;

use crate::domain::{HookInvocation, HookName};

pub use relay::Separated;

/// Variable carrying the hook's name in its environment.
pub const HOOK_NAME_VAR: &str = "HOOK_NAME";
/// Variable carrying the hook's id in its environment.
pub const HOOK_ID_VAR: &str = "HOOK_ID";

/// How a hook's body is handed to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// Body lines are arguments; stdin is the original input, replayed.
    #[default]
    Args,
    /// Body lines, newline-joined, are the hook's stdin; no arguments.
    Data,
}

/// Where a hook's stdout and stderr go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Stdout streams through a [`Separated`] relay; stderr is captured and
    /// only shown when the hook fails.
    #[default]
    Relay,
    /// Stdout and stderr are inherited from this process.
    Live,
}

/// How hook names map to executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolver {
    /// Join the name onto a hooks directory.
    Directory(PathBuf),
    /// Look the name up on the `PATH` of the hook environment.
    SearchPath,
}

impl Resolver {
    pub fn program(&self, name: &HookName) -> PathBuf {
        match self {
            Resolver::Directory(dir) => dir.join(name.as_str()),
            Resolver::SearchPath => PathBuf::from(name.as_str()),
        }
    }
}

/// A hook failure, naming the hook it happened in.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("[hook] {name} {id}")]
#[diagnostic(code(bithooker::hook))]
pub struct HookError {
    pub name: HookName,
    pub id: String,
    #[source]
    pub failure: HookFailure,
}

/// What went wrong while running a single hook.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum HookFailure {
    #[error("can't launch {}", .program.display())]
    #[diagnostic(code(bithooker::hook::launch))]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("exited with {status}")]
    #[diagnostic(code(bithooker::hook::exit))]
    Exit {
        status: ExitStatus,
        #[source]
        stderr: Option<CapturedStderr>,
    },

    #[error("can't relay hook streams")]
    #[diagnostic(code(bithooker::hook::stream))]
    Stream(#[source] io::Error),
}

/// Stderr a failed hook printed, shown as the innermost cause of its failure.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CapturedStderr(String);

impl CapturedStderr {
    /// `None` when the hook wrote nothing but whitespace.
    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(bytes);
        let text = text.trim_end();
        (!text.trim_start().is_empty()).then(|| CapturedStderr(text.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Runs hooks one after another.
///
/// The environment base replaces this process's environment for every hook;
/// `HOOK_NAME` and `HOOK_ID` are added on top.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    pub resolver: Resolver,
    pub env: Vec<(OsString, OsString)>,
    pub body: BodyMode,
    pub output: OutputMode,
}

impl Dispatcher {
    /// Run every hook in order, stopping at the first failure.
    ///
    /// `input` is replayed to each hook in [`BodyMode::Args`]. In
    /// [`OutputMode::Relay`], hook stdout goes to `relay` behind a fresh
    /// [`Separated`] adapter per hook.
    pub fn run(
        &self,
        hooks: &[HookInvocation],
        input: &[u8],
        relay: &mut dyn Write,
    ) -> Result<(), HookError> {
        for hook in hooks {
            self.run_one(hook, input, relay)
                .map_err(|failure| HookError {
                    name: hook.name().clone(),
                    id: hook.id().to_string(),
                    failure,
                })?;
            tracing::debug!(%hook, "hook succeeded");
        }
        Ok(())
    }

    fn command(&self, hook: &HookInvocation) -> (PathBuf, Command) {
        let program = self.resolver.program(hook.name());
        let mut command = Command::new(&program);
        if self.body == BodyMode::Args {
            command.args(hook.body());
        }
        command
            .env_clear()
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .env(HOOK_NAME_VAR, hook.name().as_str())
            .env(HOOK_ID_VAR, hook.id())
            .stdin(Stdio::piped());
        match self.output {
            OutputMode::Relay => command.stdout(Stdio::piped()).stderr(Stdio::piped()),
            OutputMode::Live => command.stdout(Stdio::inherit()).stderr(Stdio::inherit()),
        };
        (program, command)
    }

    fn run_one(
        &self,
        hook: &HookInvocation,
        input: &[u8],
        relay: &mut dyn Write,
    ) -> Result<(), HookFailure> {
        let (program, mut command) = self.command(hook);
        tracing::debug!(%hook, program = %program.display(), "launching hook");

        let mut child = command
            .spawn()
            .map_err(|source| HookFailure::Launch { program, source })?;

        let payload: Cow<'_, [u8]> = match self.body {
            BodyMode::Args => Cow::Borrowed(input),
            BodyMode::Data => Cow::Owned(hook.payload()),
        };
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (status, fed, captured, relayed) = thread::scope(|scope| {
            let feeder = scope.spawn(move || feed(stdin, &payload));
            let collector = scope.spawn(move || collect(stderr));

            let relayed = match stdout {
                Some(mut stdout) => forward(&mut stdout, &mut *relay),
                None => Ok(()),
            };
            let status = child.wait();

            (status, join(feeder), join(collector), relayed)
        });

        let status = status.map_err(HookFailure::Stream)?;
        tracing::debug!(%hook, %status, "hook exited");
        if !status.success() {
            return Err(HookFailure::Exit {
                status,
                stderr: captured.ok().and_then(|bytes| CapturedStderr::from_bytes(&bytes)),
            });
        }
        fed.and(relayed).and(captured.map(drop)).map_err(HookFailure::Stream)
    }
}

/// Write the stdin payload and close the pipe. A hook that exits without
/// reading its input is not an error.
fn feed(stdin: Option<ChildStdin>, payload: &[u8]) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin.write_all(payload) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn collect(stderr: Option<ChildStderr>) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    if let Some(mut stderr) = stderr {
        stderr.read_to_end(&mut captured)?;
    }
    Ok(captured)
}

/// Stream hook stdout through a fresh separator. If the destination fails,
/// keep draining so the hook is never blocked on a full pipe.
fn forward(stdout: &mut impl Read, relay: &mut dyn Write) -> io::Result<()> {
    let mut separated = Separated::new(relay);
    let result = io::copy(stdout, &mut separated).and_then(|_| separated.flush());
    if result.is_err() {
        io::copy(stdout, &mut io::sink())?;
    }
    result
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}
