/// Clean up a table value before it is used as a stdin payload.
///
/// Multiline quoting tends to leave a newline right after the opening quotes
/// and an extra blank line before the closing ones. Strips one leading `\n`
/// and collapses one trailing `\n\n` into `\n`; each is applied at most once.
pub fn normalize(raw: &str) -> String {
    let value = raw.strip_prefix('\n').unwrap_or(raw);
    match value.strip_suffix("\n\n") {
        Some(rest) => format!("{rest}\n"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_unchanged() {
        assert_eq!(normalize("value"), "value");
    }

    #[test]
    fn single_trailing_newline_unchanged() {
        assert_eq!(normalize("value\n"), "value\n");
    }

    #[test]
    fn removes_newline_prefix() {
        assert_eq!(normalize("\nfoo"), "foo");
    }

    #[test]
    fn collapses_double_newline_suffix() {
        assert_eq!(normalize("foo\n\n"), "foo\n");
    }

    #[test]
    fn removes_prefix_and_collapses_suffix() {
        assert_eq!(normalize("\nfoo\n\n"), "foo\n");
    }

    #[test]
    fn applies_each_rule_once() {
        assert_eq!(normalize("\n\nfoo"), "\nfoo");
        assert_eq!(normalize("foo\n\n\n"), "foo\n\n");
    }

    #[test]
    fn idempotent_on_normalized_values() {
        for value in ["", "foo", "foo\n", "a\n\nb", " \n x", "\tfoo\n"] {
            assert_eq!(normalize(value), value);
            assert_eq!(normalize(&normalize(value)), normalize(value));
        }
    }

    #[test]
    fn lone_newlines() {
        assert_eq!(normalize("\n"), "");
        assert_eq!(normalize("\n\n"), "\n");
    }
}
