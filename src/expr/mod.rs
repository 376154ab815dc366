//! The expression algebra.
//!
//! Every operation returns a new [`Rexp`] and the receiver is never touched.
//! Grouping is decided by comparing [`Precedence`] levels: a fragment is only
//! wrapped in `(?:...)` when it binds looser than the context it is put in.

mod compiled;
mod escape;
mod modes;
mod precedence;

use std::borrow::Cow;
use std::fmt;
use std::ops::{Add, BitOr};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize, de};

use crate::error::{Error, RexpResult};
use crate::match_result::Match;
use crate::names::NameMap;
use compiled::LazyRegex;
pub(crate) use escape::char_class;
pub use modes::Modes;
pub use precedence::Precedence;

/// Largest repeat bound the engine accepts
pub const MAX_REPEAT: usize = 100_000;

/// A regular expression built out of smaller expressions.
///
/// The capture list holds one entry per capturing group, in the order of the
/// opening parentheses of the rendered pattern. Anonymous groups are `None`.
pub struct Rexp {
    /// Rendered at `precedence`, without this node's own modes
    text: String,
    precedence: Precedence,
    captures: Vec<Option<String>>,
    modes: Modes,
    greedy: bool,
    /// Matches without consuming anything, like `\b` or the empty string
    zero_width: bool,
    regex: LazyRegex,
    names: OnceLock<NameMap>,
}

impl Rexp {
    fn new(text: String, precedence: Precedence, captures: Vec<Option<String>>) -> Self {
        Self {
            text,
            precedence,
            captures,
            modes: Modes::empty(),
            greedy: true,
            zero_width: false,
            regex: LazyRegex::new(),
            names: OnceLock::new(),
        }
    }

    /// Matches `text` literally, special characters are escaped.
    pub fn literal(text: &str) -> Self {
        // A single character is atomic, a run of them is a concatenation
        let precedence = if text.chars().count() == 1 {
            Precedence::Grouped
        } else {
            Precedence::Concatenation
        };
        let mut out = Rexp::new(escape::escape_literal(text), precedence, Vec::new());
        out.zero_width = text.is_empty();
        out
    }

    /// An already valid atom such as `\d` or `[a-z]`
    pub(crate) fn raw(atom: impl Into<String>) -> Self {
        Rexp::new(atom.into(), Precedence::Grouped, Vec::new())
    }

    /// An atom that matches a position rather than a character, such as `\b`
    pub(crate) fn assertion(atom: impl Into<String>) -> Self {
        let mut out = Rexp::raw(atom);
        out.zero_width = true;
        out
    }

    /// `out` with the zero width flag of `self`, for nodes that only add groups or anchors
    fn keeping_width(&self, mut out: Rexp) -> Rexp {
        out.zero_width = self.zero_width;
        out
    }

    /// The full pattern text, as handed to the engine
    pub fn pattern(&self) -> Cow<'_, str> {
        if self.modes.is_empty() {
            Cow::Borrowed(&self.text)
        } else {
            Cow::Owned(format!("(?{}:{})", self.modes.inline_flags(), self.text))
        }
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// One entry per capturing group, outermost and leftmost first
    pub fn capture_names(&self) -> &[Option<String>] {
        &self.captures
    }

    /// Modes set on this expression itself.
    /// Modes of the pieces it was built from are already part of the pattern and not reported.
    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn is_multiline(&self) -> bool {
        self.modes.contains(Modes::MULTILINE)
    }

    pub fn is_ignore_case(&self) -> bool {
        self.modes.contains(Modes::IGNORE_CASE)
    }

    /// Whether the next repeat applied to this expression will be greedy
    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    /// The pattern, grouped if it binds looser than `level`
    fn wrapped(&self, level: Precedence) -> Cow<'_, str> {
        if self.precedence >= level {
            self.pattern()
        } else {
            Cow::Owned(format!("(?:{})", self.pattern()))
        }
    }

    /// This expression as it is embedded in a context of `level`
    pub fn wrap(&self, level: Precedence) -> Rexp {
        if self.precedence >= level {
            self.clone()
        } else {
            self.group()
        }
    }

    /// Matches `self` followed by `other`. Same as `self + other`.
    pub fn then(&self, other: &Rexp) -> Rexp {
        let text = format!(
            "{}{}",
            self.wrapped(Precedence::Concatenation),
            other.wrapped(Precedence::Concatenation)
        );
        let mut out = Rexp::new(text, Precedence::Concatenation, self.joined_captures(other));
        out.zero_width = self.zero_width && other.zero_width;
        out
    }

    /// Matches either `self` or `other`. Same as `self | other`.
    pub fn or(&self, other: &Rexp) -> Rexp {
        let text = format!(
            "{}|{}",
            self.wrapped(Precedence::Alternation),
            other.wrapped(Precedence::Alternation)
        );
        let mut out = Rexp::new(text, Precedence::Alternation, self.joined_captures(other));
        out.zero_width = self.zero_width && other.zero_width;
        out
    }

    fn joined_captures(&self, other: &Rexp) -> Vec<Option<String>> {
        self.captures
            .iter()
            .chain(&other.captures)
            .cloned()
            .collect()
    }

    /// Appends a quantifier that allows `min` repeats or more. The operand is made
    /// atomic first so that two quantifiers never end up side by side, the engine
    /// would read `a*+` as possessive.
    fn quantified(&self, min: usize, quantifier: &str, honours_greedy: bool) -> Rexp {
        let lazy = honours_greedy && !self.greedy;
        if self.zero_width {
            return self.repeated_assertion(min, lazy);
        }
        let text = format!(
            "{}{quantifier}{}",
            self.wrapped(Precedence::Grouped),
            if lazy { "?" } else { "" }
        );
        Rexp::new(text, Precedence::Postfix, self.captures.clone())
    }

    /// The engine refuses a quantifier on a zero width operand. Matching it once
    /// or more is the same as matching it once, and allowing zero repeats turns
    /// it into an alternation with the empty string.
    fn repeated_assertion(&self, min: usize, lazy: bool) -> Rexp {
        let text = match (min, lazy) {
            (0, false) => format!("(?:{}|)", self.pattern()),
            (0, true) => format!("(?:|{})", self.pattern()),
            _ => self.wrapped(Precedence::Grouped).into_owned(),
        };
        self.keeping_width(Rexp::new(text, Precedence::Grouped, self.captures.clone()))
    }

    /// Matches `self` or nothing
    pub fn optional(&self) -> Rexp {
        self.quantified(0, "?", false)
    }

    /// Matches `self` zero or more times
    pub fn many(&self) -> Rexp {
        self.quantified(0, "*", true)
    }

    /// Matches `self` one or more times
    pub fn one_or_more(&self) -> Rexp {
        self.quantified(1, "+", true)
    }

    /// Matches `self` exactly `count` times
    pub fn repeat(&self, count: usize) -> RexpResult<Rexp> {
        check_bound(count)?;
        // `{n}?` is not a lazy repeat in the Ruby dialect, and lazy would not change anything
        Ok(self.quantified(count, &format!("{{{count}}}"), false))
    }

    /// Matches `self` between `min` and `max` times, inclusive
    pub fn repeat_between(&self, min: usize, max: usize) -> RexpResult<Rexp> {
        check_bound(min)?;
        check_bound(max)?;
        if max < min {
            return Err(Error::InvalidRepeat { min, max });
        }
        Ok(self.quantified(min, &format!("{{{min},{max}}}"), true))
    }

    /// Matches `self` at least `min` times
    pub fn at_least(&self, min: usize) -> RexpResult<Rexp> {
        check_bound(min)?;
        Ok(self.quantified(min, &format!("{{{min},}}"), true))
    }

    /// Matches `self` at most `max` times
    pub fn at_most(&self, max: usize) -> RexpResult<Rexp> {
        check_bound(max)?;
        Ok(self.quantified(0, &format!("{{0,{max}}}"), true))
    }

    /// The same expression, but the next repeat applied to it matches as little as possible.
    /// Has no effect on repeats that are already part of the expression.
    pub fn non_greedy(&self) -> Rexp {
        let mut out = self.clone();
        out.greedy = false;
        out
    }

    /// Captures the text matched by `self` under `name`.
    ///
    /// The new group opens before any group inside `self`, so its name goes
    /// in front of theirs.
    pub fn capture(&self, name: impl Into<String>) -> Rexp {
        self.capture_as(Some(name.into()))
    }

    /// Captures the text matched by `self` without naming it.
    /// The group still takes an index, see [`crate::Match::get_index`].
    pub fn unnamed_capture(&self) -> Rexp {
        self.capture_as(None)
    }

    fn capture_as(&self, name: Option<String>) -> Rexp {
        let mut captures = Vec::with_capacity(self.captures.len() + 1);
        captures.push(name);
        captures.extend(self.captures.iter().cloned());
        self.keeping_width(Rexp::new(
            format!("({})", self.pattern()),
            Precedence::Grouped,
            captures,
        ))
    }

    /// Groups `self` without capturing.
    /// Grouping is handled automatically so this is rarely needed.
    pub fn group(&self) -> Rexp {
        self.keeping_width(Rexp::new(
            format!("(?:{})", self.pattern()),
            Precedence::Grouped,
            self.captures.clone(),
        ))
    }

    fn anchored(&self, before: &str, after: &str) -> Rexp {
        let text = format!(
            "{before}{}{after}",
            self.wrapped(Precedence::Concatenation)
        );
        self.keeping_width(Rexp::new(
            text,
            Precedence::Concatenation,
            self.captures.clone(),
        ))
    }

    /// Matches `self` at the start of the subject
    pub fn begin(&self) -> Rexp {
        self.anchored("\\A", "")
    }

    /// Matches `self` at the end of the subject, a single trailing newline may follow
    pub fn end(&self) -> Rexp {
        self.anchored("", "\\Z")
    }

    /// Matches `self` at the very end of the subject, nothing may follow
    pub fn very_end(&self) -> Rexp {
        self.anchored("", "\\z")
    }

    /// Matches `self` at the start of a line
    pub fn bol(&self) -> Rexp {
        self.anchored("^", "")
    }

    /// Matches `self` at the end of a line
    pub fn eol(&self) -> Rexp {
        self.anchored("", "$")
    }

    /// Matches `self` against the whole subject
    pub fn all(&self) -> Rexp {
        self.begin().very_end()
    }

    /// Matches `self` against the whole subject, except for a trailing newline
    pub fn almost_all(&self) -> Rexp {
        self.begin().end()
    }

    /// Matches `self` against a whole line
    pub fn line(&self) -> Rexp {
        self.bol().eol()
    }

    /// Matches `self` with `.` also matching newlines
    pub fn multiline(&self) -> Rexp {
        self.with_modes(Modes::MULTILINE)
    }

    /// Matches `self` without regard to case
    pub fn ignore_case(&self) -> Rexp {
        self.with_modes(Modes::IGNORE_CASE)
    }

    fn with_modes(&self, modes: Modes) -> Rexp {
        // The modes are rendered as a group around the text, which makes it atomic
        let mut out = Rexp::new(self.text.clone(), Precedence::Grouped, self.captures.clone());
        out.modes = self.modes.union(modes);
        out.greedy = self.greedy;
        self.keeping_width(out)
    }

    /// The compiled engine regex, built on first use and reused afterwards
    pub fn compile(&self) -> RexpResult<Arc<onig::Regex>> {
        self.compiled().cloned()
    }

    fn compiled(&self) -> RexpResult<&Arc<onig::Regex>> {
        self.regex
            .get_or_compile(|| self.pattern().into_owned())
    }

    /// Names of the capture groups and their engine indices
    pub fn name_map(&self) -> &NameMap {
        self.names.get_or_init(|| NameMap::new(&self.captures))
    }

    /// Searches `subject` for the first match.
    /// Not matching is `Ok(None)`, an error means the pattern itself is broken.
    pub fn find<'r, 't>(&'r self, subject: &'t str) -> RexpResult<Option<Match<'r, 't>>> {
        let regex = self.compiled()?;
        Ok(regex
            .captures(subject)
            .map(|captures| Match::new(captures, self.name_map())))
    }

    /// Whether `self` matches anywhere in `subject`
    pub fn is_match(&self, subject: &str) -> RexpResult<bool> {
        Ok(self.compiled()?.find(subject).is_some())
    }
}

fn check_bound(bound: usize) -> RexpResult<()> {
    if bound > MAX_REPEAT {
        return Err(Error::RepeatLimit(bound));
    }
    Ok(())
}

/// Matches `literal` exactly, special characters are escaped.
pub fn re(literal: &str) -> Rexp {
    Rexp::literal(literal)
}

impl Clone for Rexp {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            precedence: self.precedence,
            captures: self.captures.clone(),
            modes: self.modes,
            greedy: self.greedy,
            zero_width: self.zero_width,
            regex: self.regex.clone(),
            names: self.names.clone(),
        }
    }
}

impl PartialEq for Rexp {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.precedence == other.precedence
            && self.captures == other.captures
            && self.modes == other.modes
            && self.greedy == other.greedy
            && self.zero_width == other.zero_width
    }
}

impl Eq for Rexp {}

impl fmt::Debug for Rexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rexp")
            .field("pattern", &self.pattern())
            .field("precedence", &self.precedence)
            .field("captures", &self.captures)
            .field("greedy", &self.greedy)
            .field("regex", &self.regex)
            .finish()
    }
}

impl fmt::Display for Rexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl $imp<&Rexp> for &Rexp {
            type Output = Rexp;

            fn $method(self, rhs: &Rexp) -> Rexp {
                self.$inner(rhs)
            }
        }

        impl $imp<Rexp> for &Rexp {
            type Output = Rexp;

            fn $method(self, rhs: Rexp) -> Rexp {
                self.$inner(&rhs)
            }
        }

        impl $imp<&Rexp> for Rexp {
            type Output = Rexp;

            fn $method(self, rhs: &Rexp) -> Rexp {
                self.$inner(rhs)
            }
        }

        impl $imp<Rexp> for Rexp {
            type Output = Rexp;

            fn $method(self, rhs: Rexp) -> Rexp {
                self.$inner(&rhs)
            }
        }
    };
}

forward_binop!(Add, add, then);
forward_binop!(BitOr, bitor, or);

/// Serialized form of an expression, caches excluded.
/// The precedence is not part of it, it cannot be checked against the text.
#[derive(Serialize)]
struct RexpRef<'a> {
    text: &'a str,
    captures: &'a [Option<String>],
    modes: Modes,
    greedy: bool,
    zero_width: bool,
}

#[derive(Deserialize)]
struct RexpData {
    text: String,
    #[serde(default)]
    captures: Vec<Option<String>>,
    #[serde(default)]
    modes: Modes,
    #[serde(default = "default_greedy")]
    greedy: bool,
    #[serde(default)]
    zero_width: bool,
}

fn default_greedy() -> bool {
    true
}

impl Serialize for Rexp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RexpRef {
            text: &self.text,
            captures: &self.captures,
            modes: self.modes,
            greedy: self.greedy,
            zero_width: self.zero_width,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rexp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = RexpData::deserialize(deserializer)?;
        // Loosest level so that every later combinator groups the text
        let precedence = if data.modes.is_empty() {
            Precedence::Alternation
        } else {
            Precedence::Grouped
        };
        let mut rexp = Rexp::new(data.text, precedence, data.captures);
        rexp.modes = data.modes;
        rexp.greedy = data.greedy;
        rexp.zero_width = data.zero_width;

        let regex = compiled::compile(&rexp.pattern()).map_err(de::Error::custom)?;
        if regex.captures_len() != rexp.captures.len() {
            return Err(de::Error::custom(format!(
                "pattern /{}/ has {} capturing groups but {} capture names were given",
                rexp.pattern(),
                regex.captures_len(),
                rexp.captures.len()
            )));
        }
        rexp.regex = LazyRegex::compiled(regex);
        Ok(rexp)
    }
}
