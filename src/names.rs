use std::collections::HashMap;

/// Maps capture names to the 1-based group indices used by the engine.
///
/// Built once per expression from its capture list, whose order already is the
/// order of the opening parentheses in the rendered pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    /// Distinct names, in order of their first group
    keys: Vec<String>,
    indices: HashMap<String, Vec<usize>>,
    group_count: usize,
}

impl NameMap {
    pub(crate) fn new(captures: &[Option<String>]) -> Self {
        let mut keys = Vec::new();
        let mut indices: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, name) in captures.iter().enumerate() {
            let Some(name) = name else {
                continue;
            };
            let slots = indices.entry(name.clone()).or_insert_with(|| {
                keys.push(name.clone());
                Vec::new()
            });
            slots.push(i + 1);
        }

        Self {
            keys,
            indices,
            group_count: captures.len(),
        }
    }

    /// The index of the first group carrying `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices_of(name).first().copied()
    }

    /// Every group index carrying `name`, ascending.
    /// A name shows up more than once when it was used in several branches.
    pub fn indices_of(&self, name: &str) -> &[usize] {
        self.indices.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Names in ascending index order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub(crate) fn key_slice(&self) -> &[String] {
        &self.keys
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of capturing groups, anonymous ones included
    pub fn group_count(&self) -> usize {
        self.group_count
    }
}
