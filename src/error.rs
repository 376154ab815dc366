use std::fmt;

pub(crate) type RexpResult<T> = Result<T, Error>;

/// Errors that can occur when building or compiling a [`crate::Rexp`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A bounded repeat was asked for with an upper bound smaller than the lower one.
    #[allow(missing_docs)]
    InvalidRepeat { min: usize, max: usize },

    /// A repeat bound is larger than what the regex engine accepts.
    RepeatLimit(usize),

    /// A character class could not be built from the given spec.
    /// Happens on empty specs, empty classes and reversed ranges like `z-a`.
    #[allow(missing_docs)]
    InvalidCharClass { spec: String, reason: &'static str },

    /// The regex engine rejected the rendered pattern.
    /// Literals are always escaped so this points at a rendering bug rather than bad input.
    #[allow(missing_docs)]
    PatternSyntax { pattern: String, message: String },
}

impl Error {
    /// Whether the error was raised while building the expression, before the engine saw it
    pub fn is_construction(&self) -> bool {
        !matches!(self, Error::PatternSyntax { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRepeat { min, max } => {
                write!(f, "invalid repeat: max {} is smaller than min {}", max, min)
            }
            Error::RepeatLimit(bound) => write!(f, "repeat bound {} is too large", bound),
            Error::InvalidCharClass { spec, reason } => {
                write!(f, "invalid character class spec '{}': {}", spec, reason)
            }
            Error::PatternSyntax { pattern, message } => {
                write!(f, "regex compilation error for /{}/: {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for Error {}
