//! Escaping of user supplied text before it is embedded in a pattern.

use crate::error::{Error, RexpResult};

/// Escapes every character that has a special meaning outside of a character class
pub(crate) fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => push_control_or_char(&mut out, c),
        }
    }
    out
}

/// Builds the inside of a character class from a list of specs.
///
/// A spec of exactly three characters with a `-` in the middle is a range,
/// anything else is a list of members. Every spec ends up in the same class.
pub(crate) fn char_class(specs: &[&str]) -> RexpResult<String> {
    if specs.is_empty() {
        return Err(Error::InvalidCharClass {
            spec: String::new(),
            reason: "a character class needs at least one spec",
        });
    }

    let mut class = String::new();
    for spec in specs {
        if spec.is_empty() {
            return Err(Error::InvalidCharClass {
                spec: String::new(),
                reason: "empty spec",
            });
        }

        if let Some((from, to)) = as_range(spec) {
            if from > to {
                return Err(Error::InvalidCharClass {
                    spec: spec.to_string(),
                    reason: "range is out of order",
                });
            }
            push_class_member(&mut class, from);
            class.push('-');
            push_class_member(&mut class, to);
        } else {
            for c in spec.chars() {
                push_class_member(&mut class, c);
            }
        }
    }

    Ok(class)
}

fn as_range(spec: &str) -> Option<(char, char)> {
    let mut chars = spec.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(from), Some('-'), Some(to), None) => Some((from, to)),
        _ => None,
    }
}

fn push_class_member(out: &mut String, c: char) {
    match c {
        // `&&` is class intersection in the engine's dialect
        ']' | '[' | '^' | '-' | '\\' | '&' => {
            out.push('\\');
            out.push(c);
        }
        _ => push_control_or_char(out, c),
    }
}

fn push_control_or_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        '\x0c' => out.push_str("\\f"),
        '\x0b' => out.push_str("\\v"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn escapes_special_characters_in_literals() {
        assert_snapshot!(escape_literal("a(b)"), @r"a\(b\)");
        assert_snapshot!(escape_literal("1+1=2?"), @r"1\+1=2\?");
        assert_snapshot!(escape_literal("[x]{2}|^$.*\\"), @r"\[x\]\{2\}\|\^\$\.\*\\");
        assert_snapshot!(escape_literal("a\tb\nc"), @r"a\tb\nc");
        assert_eq!(escape_literal("plain - text"), "plain - text");
    }

    #[test]
    fn builds_classes_from_ranges_and_members() {
        assert_eq!(char_class(&["0-9"]).unwrap(), "0-9");
        assert_eq!(char_class(&["0-9", "a-f", "A-F"]).unwrap(), "0-9a-fA-F");
        assert_snapshot!(char_class(&["0-9", ".-"]).unwrap(), @r"0-9.\-");
        assert_snapshot!(char_class(&["- /."]).unwrap(), @r"\- /.");
    }

    #[test]
    fn escapes_class_metacharacters() {
        assert_snapshot!(char_class(&["^.(-)[]"]).unwrap(), @r"\^.(\-)\[\]");
        assert_snapshot!(char_class(&["a&&b"]).unwrap(), @r"a\&\&b");
        assert_snapshot!(char_class(&["!-]"]).unwrap(), @r"!-\]");
    }

    #[test]
    fn only_three_character_specs_are_ranges() {
        assert_snapshot!(char_class(&["a-"]).unwrap(), @r"a\-");
        assert_snapshot!(char_class(&["a-zA"]).unwrap(), @r"a\-zA");
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(matches!(
            char_class(&[]),
            Err(Error::InvalidCharClass { .. })
        ));
        assert!(matches!(
            char_class(&["a-z", ""]),
            Err(Error::InvalidCharClass { .. })
        ));
        let err = char_class(&["z-a"]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCharClass {
                spec: "z-a".to_string(),
                reason: "range is out of order",
            }
        );
        assert!(err.is_construction());
    }
}
