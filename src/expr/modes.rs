use serde::{Deserialize, Serialize};

/// Matching modes set on a single expression node.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Modes {
    bits: u8,
}

impl Modes {
    /// `.` also matches a newline
    pub const MULTILINE: Self = Self { bits: 1 };
    /// Letters compare without regard to case
    pub const IGNORE_CASE: Self = Self { bits: 2 };

    /// Returns an empty set of modes
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Returns `true` if no modes are set
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if all of the modes in `other` are contained within `self`
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns the modes set in either `self` or `other`
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Inserts the specified modes in-place
    pub fn insert(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// The letters of an inline modifier group, `(?mi:...)`
    pub(crate) fn inline_flags(&self) -> &'static str {
        match (
            self.contains(Self::MULTILINE),
            self.contains(Self::IGNORE_CASE),
        ) {
            (true, true) => "mi",
            (true, false) => "m",
            (false, true) => "i",
            (false, false) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_flags() {
        assert_eq!(Modes::empty().inline_flags(), "");
        assert_eq!(Modes::MULTILINE.inline_flags(), "m");
        assert_eq!(Modes::IGNORE_CASE.inline_flags(), "i");
        assert_eq!(
            Modes::IGNORE_CASE.union(Modes::MULTILINE).inline_flags(),
            "mi"
        );
    }

    #[test]
    fn insert_and_contains() {
        let mut modes = Modes::empty();
        assert!(modes.is_empty());
        modes.insert(Modes::IGNORE_CASE);
        assert!(modes.contains(Modes::IGNORE_CASE));
        assert!(!modes.contains(Modes::MULTILINE));
        assert!(!modes.contains(Modes::IGNORE_CASE.union(Modes::MULTILINE)));
    }
}
