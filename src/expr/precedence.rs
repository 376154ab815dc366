use serde::{Deserialize, Serialize};

/// How tightly a rendered fragment binds.
/// Variants are ordered from loosest to tightest so that deciding whether a
/// fragment needs grouping is a plain comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Precedence {
    /// `a|b`
    Alternation,
    /// `ab`, multi character literals and anchored fragments
    Concatenation,
    /// `a*`, `a+`, `a?` and `a{n,m}`
    Postfix,
    /// `(a)`, `(?:a)`, `[abc]` and single characters
    Grouped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_from_loosest_to_tightest() {
        assert!(Precedence::Alternation < Precedence::Concatenation);
        assert!(Precedence::Concatenation < Precedence::Postfix);
        assert!(Precedence::Postfix < Precedence::Grouped);
        assert_eq!(
            Precedence::Grouped.max(Precedence::Alternation),
            Precedence::Grouped
        );
    }
}
