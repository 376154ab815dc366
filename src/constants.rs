//! Common expressions and character classes.
//!
//! The fixed expressions are built once, on first use, and shared afterwards.
//! Building an expression costs more than matching with it so they should
//! never be rebuilt per call.

use std::sync::LazyLock;

use crate::error::RexpResult;
use crate::expr::{Rexp, char_class};

static NULL: LazyLock<Rexp> = LazyLock::new(|| Rexp::literal(""));
static ANY_CHAR: LazyLock<Rexp> = LazyLock::new(|| Rexp::raw("."));

static DIGIT: LazyLock<Rexp> = LazyLock::new(|| Rexp::raw("\\d"));
static DIGITS: LazyLock<Rexp> = LazyLock::new(|| DIGIT.one_or_more());
static HEX_DIGIT: LazyLock<Rexp> =
    LazyLock::new(|| any_of(&["0-9", "a-f", "A-F"]).expect("Invalid hex digit class"));
static HEX_DIGITS: LazyLock<Rexp> = LazyLock::new(|| HEX_DIGIT.one_or_more());

static SPACE: LazyLock<Rexp> = LazyLock::new(|| Rexp::raw("\\s"));
static SPACES: LazyLock<Rexp> = LazyLock::new(|| SPACE.one_or_more());
static NONSPACE: LazyLock<Rexp> = LazyLock::new(|| Rexp::raw("\\S"));
static NONSPACES: LazyLock<Rexp> = LazyLock::new(|| NONSPACE.one_or_more());

static WORD_CHAR: LazyLock<Rexp> = LazyLock::new(|| Rexp::raw("\\w"));
static WORD: LazyLock<Rexp> = LazyLock::new(|| WORD_CHAR.one_or_more());
static WORD_BREAK: LazyLock<Rexp> = LazyLock::new(|| Rexp::assertion("\\b"));

/// Matches the empty string
pub fn null() -> &'static Rexp {
    &NULL
}

/// Matches any single character except a newline, see [`Rexp::multiline`]
pub fn any() -> &'static Rexp {
    &ANY_CHAR
}

/// Matches one character out of a class.
///
/// A spec of three characters with a `-` in the middle, like `"a-z"`, is a range.
/// Anything else is a list of characters. All specs are merged into one class:
///
/// ```
/// let ident = rexp::any_of(&["A-Z", "a-z", "0-9", "_"]).unwrap();
/// assert!(ident.is_match("_").unwrap());
/// ```
pub fn any_of(specs: &[&str]) -> RexpResult<Rexp> {
    Ok(Rexp::raw(format!("[{}]", char_class(specs)?)))
}

/// Matches one character that is not in the class, see [`any_of`] for the specs
pub fn none_of(specs: &[&str]) -> RexpResult<Rexp> {
    Ok(Rexp::raw(format!("[^{}]", char_class(specs)?)))
}

/// A single digit
pub fn digit() -> &'static Rexp {
    &DIGIT
}

/// One or more digits
pub fn digits() -> &'static Rexp {
    &DIGITS
}

/// A single hex digit, either case
pub fn hex_digit() -> &'static Rexp {
    &HEX_DIGIT
}

/// One or more hex digits
pub fn hex_digits() -> &'static Rexp {
    &HEX_DIGITS
}

/// A single whitespace character, newlines included
pub fn space() -> &'static Rexp {
    &SPACE
}

/// One or more whitespace characters
pub fn spaces() -> &'static Rexp {
    &SPACES
}

pub fn nonspace() -> &'static Rexp {
    &NONSPACE
}

pub fn nonspaces() -> &'static Rexp {
    &NONSPACES
}

/// A letter, digit or underscore
pub fn word_char() -> &'static Rexp {
    &WORD_CHAR
}

/// One or more word characters
pub fn word() -> &'static Rexp {
    &WORD
}

/// The zero width boundary between a word and a non-word character.
/// Repeating it once or more is the same as matching it once, and
/// [`Rexp::optional`] and [`Rexp::many`] make it optional.
pub fn word_break() -> &'static Rexp {
    &WORD_BREAK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, re};
    use insta::assert_snapshot;

    fn check(r: &Rexp, accepted: &[&str], rejected: &[&str]) {
        for subject in accepted {
            assert!(r.is_match(subject).unwrap(), "/{r}/ should match {subject:?}");
        }
        for subject in rejected {
            assert!(!r.is_match(subject).unwrap(), "/{r}/ should not match {subject:?}");
        }
    }

    #[test]
    fn constants_are_built_once() {
        assert!(std::ptr::eq(digit(), digit()));
        assert!(std::ptr::eq(word(), word()));
        assert_snapshot!(digits(), @r"\d+");
        assert_snapshot!(hex_digit(), @"[0-9a-fA-F]");
    }

    #[test]
    fn null_matches_the_empty_string() {
        check(&null().all(), &[""], &["a"]);
    }

    #[test]
    fn any_without_a_class() {
        check(&any().all(), &["a", "1", "#", ".", " "], &["ab", "\n"]);
    }

    #[test]
    fn any_of_a_character_list() {
        check(&any_of(&["xyz"]).unwrap().all(), &["x", "y", "z"], &["w"]);
    }

    #[test]
    fn any_of_special_characters() {
        let r = any_of(&["^.(-)[]"]).unwrap().all();
        check(&r, &[".", "^", "-", "(", ")", "[", "]"], &["x"]);
    }

    #[test]
    fn any_of_ranges_and_lists() {
        check(
            &any_of(&["a-z"]).unwrap().many().all(),
            &["abcdefghijklmnopqrstuvwxyz"],
            &["A"],
        );
        check(
            &any_of(&["0-9", ".-"]).unwrap().many().all(),
            &["-12.3"],
            &["1,2"],
        );
    }

    #[test]
    fn none_of_a_character_list() {
        check(&none_of(&["xyz"]).unwrap().all(), &["w"], &["x", "y", "z"]);
    }

    #[test]
    fn none_of_special_characters() {
        let r = none_of(&["^.()[]-"]).unwrap().all();
        check(&r, &["x"], &[".", "^", "-", "(", ")", "[", "]"]);
    }

    #[test]
    fn none_of_ranges_and_lists() {
        check(
            &none_of(&["a-z"]).unwrap().many().all(),
            &["0123()$#"],
            &["a", "b", "z"],
        );
        check(
            &none_of(&["0-9", ".-"]).unwrap().many().all(),
            &["abc%^&"],
            &["-", ".", "1"],
        );
    }

    #[test]
    fn malformed_classes_are_rejected() {
        assert!(matches!(any_of(&[]), Err(Error::InvalidCharClass { .. })));
        assert!(matches!(none_of(&[""]), Err(Error::InvalidCharClass { .. })));
        assert!(matches!(any_of(&["9-0"]), Err(Error::InvalidCharClass { .. })));
    }

    #[test]
    fn hex_digit_classes() {
        check(&hex_digit().all(), &["1", "a", "F"], &["12", "g"]);
        check(&hex_digits().all(), &["1234567890abcedfABCDEF"], &["g"]);
    }

    #[test]
    fn digit_classes() {
        check(&digit().all(), &["0", "9"], &["12", "x", "a"]);
        check(&digits().all(), &["0123456789"], &["0123456789x"]);
    }

    #[test]
    fn word_breaks() {
        let r = word_break() + re("a") + word_break();
        check(&r, &["there is a home"], &["there is an aardvark"]);

        let r = word_break().one_or_more() + re("a") + word_break().many();
        assert_snapshot!(r, @r"\ba(?:\b|)");
        check(&r, &["a", "an"], &["ba"]);
    }

    #[test]
    fn whitespace() {
        check(&space().all(), &[" ", "\t", "\n"], &["x", "", "  "]);
        check(&space().many().all(), &[" \n\t    "], &[]);
        check(&spaces().all(), &[" ", "  ", " \t  \n  "], &["", "x"]);
    }

    #[test]
    fn non_whitespace() {
        check(&nonspace().all(), &["a", "1", "#"], &["ab", " ", "\t", "\n"]);
        check(
            &nonspaces().all(),
            &["a", "asdfhjkl!@#$%^&*()_+="],
            &["", "a dog"],
        );
    }

    #[test]
    fn words() {
        check(&word_char().all(), &["a", "1", "_"], &["!", "?"]);
        check(&word().all(), &["a", "1", "this_is_a_test"], &["asdf jkl"]);
    }
}
