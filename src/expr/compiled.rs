use std::fmt;
use std::sync::{Arc, OnceLock};

use onig::{RegexOptions, Syntax};

use crate::error::{Error, RexpResult};

/// Compiles a rendered pattern with the Ruby dialect of the engine.
/// Mode flags are always inline in the pattern so no global options are passed.
pub(crate) fn compile(pattern: &str) -> RexpResult<onig::Regex> {
    #[cfg(feature = "debug")]
    log::debug!("[compile] /{pattern}/");

    onig::Regex::with_options(
        pattern,
        RegexOptions::REGEX_OPTION_NONE,
        Syntax::ruby(),
    )
    .map_err(|err| {
        #[cfg(feature = "debug")]
        log::debug!("[compile] engine rejected /{pattern}/: {err}");

        Error::PatternSyntax {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    })
}

/// An engine regex that is compiled the first time it is needed and then reused.
/// The outcome, error included, is remembered.
pub(crate) struct LazyRegex {
    compiled: OnceLock<RexpResult<Arc<onig::Regex>>>,
}

impl LazyRegex {
    pub(crate) fn new() -> Self {
        Self {
            compiled: OnceLock::new(),
        }
    }

    /// Already holds `regex`, nothing is compiled later
    pub(crate) fn compiled(regex: onig::Regex) -> Self {
        Self {
            compiled: OnceLock::from(Ok(Arc::new(regex))),
        }
    }

    pub(crate) fn get_or_compile(
        &self,
        pattern: impl FnOnce() -> String,
    ) -> RexpResult<&Arc<onig::Regex>> {
        self.compiled
            .get_or_init(|| compile(&pattern()).map(Arc::new))
            .as_ref()
            .map_err(Clone::clone)
    }

    #[cfg(test)]
    pub(crate) fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }
}

impl Clone for LazyRegex {
    fn clone(&self) -> Self {
        // Fresh lazy compilation, the cache belongs to a single expression
        LazyRegex::new()
    }
}

impl fmt::Debug for LazyRegex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.compiled.get() {
            Some(Ok(_)) => write!(f, "compiled"),
            Some(Err(_)) => write!(f, "invalid"),
            None => write!(f, "pending"),
        }
    }
}
