/// A validated hook program name.
///
/// Non-empty, free of whitespace and of the `@` that separates a directive
/// header's name from its id. Path separators are allowed so a directive can
/// name `lint/size-check` under the hooks directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HookName(String);

impl HookName {
    /// Validate a raw token. Returns `None` when it cannot name a hook.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.contains('@') || raw.chars().any(char::is_whitespace) {
            return None;
        }
        Some(HookName(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for HookName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HookName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for HookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
