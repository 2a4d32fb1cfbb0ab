//! Error chains and exit codes.

use std::io::{self, Write};

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::dispatch::HookError;

/// Exit code for settings and syntax errors; nothing has run yet.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for hook failures and unreadable input.
pub const EXIT_FAILURE: u8 = 1;

/// Any failure that ends a run.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("can't load settings")]
    #[diagnostic(forward(0))]
    Config(#[source] ConfigError),

    #[error("can't read stdin")]
    #[diagnostic(code(bithooker::input))]
    Input(#[source] io::Error),

    #[error("can't decode hooks")]
    #[diagnostic(forward(0))]
    Decode(#[source] DecodeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Hook(#[from] HookError),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) | Error::Decode(_) => EXIT_CONFIG,
            Error::Input(_) | Error::Hook(_) => EXIT_FAILURE,
        }
    }
}

/// Render a diagnostic and its cause chain, outermost first, without color.
pub fn render(diagnostic: &dyn Diagnostic) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .with_links(false)
        .with_width(120);
    let mut rendered = String::new();
    if handler.render_report(&mut rendered, diagnostic).is_err() {
        // Fall back to the bare message chain.
        rendered = chain(diagnostic);
    }
    rendered
}

fn chain(error: &dyn Diagnostic) -> String {
    let mut lines = vec![error.to_string()];
    let mut cause = error.source();
    while let Some(inner) = cause {
        lines.push(inner.to_string());
        cause = inner.source();
    }
    lines.join("\n")
}

/// Write one blank separator line followed by the rendered error.
pub fn write(error: &Error, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", render(error))?;
    out.flush()
}
