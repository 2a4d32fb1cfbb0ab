//! Line scanner for the directive language.
//!
//! ```text
//! <name>@<id>
//!  <body line>
//!  <body line>
//!
//! <name>@<id>
//!  <body line>
//! ```
//!
//! Body lines start with exactly one space, which is stripped; anything after
//! it is kept verbatim. A blank line or a new header ends the current hook.

use miette::{NamedSource, SourceSpan};

use super::{split_header, DecodeError};
use crate::domain::{HookInvocation, HookName};

/// Display name for the directive text in rendered diagnostics.
const SOURCE_NAME: &str = "hooks";

enum State {
    ExpectHeader,
    InBody(Pending),
}

struct Pending {
    name: HookName,
    id: String,
    body: Vec<String>,
}

impl Pending {
    fn finish(self) -> HookInvocation {
        HookInvocation::new(self.name, self.id, self.body)
    }
}

/// One physical line with its position in the source.
struct Line<'a> {
    number: usize,
    offset: usize,
    text: &'a str,
}

impl Line<'_> {
    fn span(&self) -> SourceSpan {
        (self.offset, self.text.len()).into()
    }
}

enum Kind<'a> {
    Blank,
    Body(&'a str),
    Header(&'a str),
}

fn classify(text: &str) -> Kind<'_> {
    if let Some(body) = text.strip_prefix(' ') {
        Kind::Body(body)
    } else if text.trim().is_empty() {
        Kind::Blank
    } else {
        Kind::Header(text)
    }
}

/// Iterate lines with 1-based numbers and byte offsets, dropping `\n`/`\r\n`.
fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            let line = Line {
                number: index + 1,
                offset,
                text,
            };
            offset += raw.len();
            line
        })
}

/// Decode directive text. Returns an empty list for blank input; the caller
/// decides whether that is an error.
pub(super) fn decode(source: &str) -> Result<Vec<HookInvocation>, DecodeError> {
    let mut hooks = Vec::new();
    let mut state = State::ExpectHeader;

    for line in lines(source) {
        state = match (state, classify(line.text)) {
            (State::ExpectHeader, Kind::Blank) => State::ExpectHeader,
            (State::InBody(pending), Kind::Blank) => {
                hooks.push(pending.finish());
                State::ExpectHeader
            }
            (State::ExpectHeader, Kind::Body(_)) => {
                return Err(DecodeError::OrphanBody {
                    line: line.number,
                    src: NamedSource::new(SOURCE_NAME, source.to_string()),
                    span: line.span(),
                });
            }
            (State::InBody(mut pending), Kind::Body(body)) => {
                pending.body.push(body.to_string());
                State::InBody(pending)
            }
            (previous, Kind::Header(text)) => {
                if let State::InBody(pending) = previous {
                    hooks.push(pending.finish());
                }
                let (name, id) = split_header(text).ok_or_else(|| DecodeError::InvalidHeader {
                    line: line.number,
                    text: text.to_string(),
                    src: NamedSource::new(SOURCE_NAME, source.to_string()),
                    span: line.span(),
                })?;
                State::InBody(Pending {
                    name,
                    id: id.to_string(),
                    body: Vec::new(),
                })
            }
        };
    }

    if let State::InBody(pending) = state {
        hooks.push(pending.finish());
    }
    Ok(hooks)
}
