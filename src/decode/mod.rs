//! Decoding of hook configuration text into [`HookInvocation`]s.
//!
//! Two source languages are supported: the indented `name@id` directive
//! language and a TOML table mapping hook names to stdin payloads. Both
//! produce the full, ordered invocation list in one pass.

mod directive;
mod normalize;
mod table;

use miette::{NamedSource, SourceSpan};

use crate::domain::{HookInvocation, HookName};

pub use normalize::normalize;

/// Which configuration language the hook text is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `name@id` headers followed by body lines indented with one space.
    #[default]
    Directives,
    /// TOML table of `name` (or `"name@id"`) to string payload.
    Table,
}

/// Errors produced while decoding hook text. All are reported before any
/// hook runs.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    #[error("no hooks specified")]
    #[diagnostic(
        code(bithooker::decode::empty),
        help("pass at least one <name>@<id> directive")
    )]
    Empty,

    #[error("line {line}: invalid hook header {text:?}")]
    #[diagnostic(code(bithooker::decode::header))]
    InvalidHeader {
        line: usize,
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected <name>@<id>")]
        span: SourceSpan,
    },

    #[error("line {line}: hook arguments without a preceding <name>@<id> header")]
    #[diagnostic(
        code(bithooker::decode::orphan_body),
        help("body lines must directly follow their header; a blank line ends a hook")
    )]
    OrphanBody {
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("no header for this line")]
        span: SourceSpan,
    },

    #[error("invalid TOML: {0}")]
    #[diagnostic(code(bithooker::decode::table))]
    Table(String),

    #[error("invalid table key {0:?}, expected <name> or <name>@<id>")]
    #[diagnostic(code(bithooker::decode::table_key))]
    InvalidKey(String),

    #[error("table entry {key:?}: expected a string, found {found}")]
    #[diagnostic(code(bithooker::decode::table_value))]
    NotAString { key: String, found: &'static str },
}

/// Decode `text` in the given format into an ordered invocation list.
///
/// Empty input (nothing but blank lines, or an empty table) is an error.
pub fn decode(text: &str, format: Format) -> Result<Vec<HookInvocation>, DecodeError> {
    let hooks = match format {
        Format::Directives => directive::decode(text)?,
        Format::Table => table::decode(text)?,
    };
    if hooks.is_empty() {
        return Err(DecodeError::Empty);
    }
    tracing::debug!(count = hooks.len(), ?format, "decoded hooks");
    Ok(hooks)
}

/// Split a `name@id` header into its validated parts.
///
/// Exactly one `@`, both sides non-empty and free of whitespace.
fn split_header(text: &str) -> Option<(HookName, &str)> {
    let (name, id) = text.split_once('@')?;
    if id.is_empty() || id.contains('@') || id.chars().any(char::is_whitespace) {
        return None;
    }
    Some((HookName::new(name)?, id))
}
