use std::fmt;
use std::slice;

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::names::NameMap;

/// One successful match of a [`crate::Rexp`].
///
/// Captures are looked up by name through the name map of the expression that
/// produced the match.
pub struct Match<'r, 't> {
    captures: onig::Captures<'t>,
    names: &'r NameMap,
}

impl<'r, 't> Match<'r, 't> {
    pub(crate) fn new(captures: onig::Captures<'t>, names: &'r NameMap) -> Self {
        Self { captures, names }
    }

    /// The text of the whole match
    pub fn full_match(&self) -> &'t str {
        self.captures.at(0).unwrap_or_default()
    }

    /// Byte offset of the start of the match in the subject
    pub fn start(&self) -> usize {
        self.captures.pos(0).map_or(0, |(start, _)| start)
    }

    /// Byte offset of the end of the match in the subject
    pub fn end(&self) -> usize {
        self.captures.pos(0).map_or(0, |(_, end)| end)
    }

    /// The text captured under `name`.
    ///
    /// `None` if no group carries that name or if the group did not take part
    /// in this match, e.g. when it sits in an alternative that was not taken.
    pub fn get(&self, name: &str) -> Option<&'t str> {
        self.names
            .indices_of(name)
            .iter()
            .find_map(|&index| self.captures.at(index))
    }

    /// Byte offsets of the text captured under `name`
    pub fn pos(&self, name: &str) -> Option<(usize, usize)> {
        self.names
            .indices_of(name)
            .iter()
            .find_map(|&index| self.captures.pos(index))
    }

    /// The text of a group by its engine index, 0 being the whole match.
    /// This is the only way to reach unnamed captures.
    pub fn get_index(&self, index: usize) -> Option<&'t str> {
        self.captures.at(index)
    }

    /// Capture names, left to right by opening parenthesis
    pub fn keys(&self) -> Vec<&'r str> {
        self.names.keys().collect()
    }

    /// Captured texts, in the same order as [`Match::keys`]
    pub fn values(&self) -> Vec<Option<&'t str>> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// `(name, captured text)` pairs in the order of [`Match::keys`]
    pub fn iter(&self) -> Iter<'_, 'r, 't> {
        Iter {
            matched: self,
            keys: self.names.key_slice().iter(),
        }
    }
}

/// Iterator over the named captures of a [`Match`]
pub struct Iter<'a, 'r, 't> {
    matched: &'a Match<'r, 't>,
    keys: slice::Iter<'r, String>,
}

impl<'r, 't> Iterator for Iter<'_, 'r, 't> {
    type Item = (&'r str, Option<&'t str>);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.keys.next()?;
        Some((name.as_str(), self.matched.get(name)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, 'r, 't> IntoIterator for &'a Match<'r, 't> {
    type Item = (&'r str, Option<&'t str>);
    type IntoIter = Iter<'a, 'r, 't>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Match<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("full_match", &self.full_match())
            .field("captures", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl Serialize for Match<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
