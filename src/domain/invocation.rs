use super::HookName;

/// One decoded hook invocation: a `name@id` header plus its body lines.
///
/// Built once by the decoder and never mutated; the dispatcher only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInvocation {
    name: HookName,
    id: String,
    body: Vec<String>,
}

impl HookInvocation {
    pub fn new(name: HookName, id: impl Into<String>, body: Vec<String>) -> Self {
        HookInvocation {
            name,
            id: id.into(),
            body,
        }
    }

    pub fn name(&self) -> &HookName {
        &self.name
    }

    /// Free-form identifier used only in diagnostics and `HOOK_ID`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Body lines in source order, with the single indent space removed.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Body interpreted as a stdin payload: lines joined with `\n`.
    ///
    /// No terminator is added, so a body built with `str::split('\n')`
    /// reproduces its source string exactly.
    pub fn payload(&self) -> Vec<u8> {
        self.body.join("\n").into_bytes()
    }
}

impl std::fmt::Display for HookInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.id)
    }
}
