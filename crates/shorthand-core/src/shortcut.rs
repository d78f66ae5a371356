//! The phrase → abbreviation mapping built by an allocation run.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Where a shortcut's abbreviation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Supplied by the caller; never overwritten, exempt from the savings check.
    Preset,
    /// Picked from the candidate generator or the consistency resolver.
    Generated,
    /// Derived from a singular word's abbreviation plus `s`.
    Plural,
    /// Concatenated from the abbreviations (or initials) of a phrase's words.
    Composite,
}

/// One entry of a [`ShortcutMap`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Shortcut {
    /// The abbreviation typed by the user.
    pub abbrev: String,
    /// How the abbreviation was assigned.
    pub source: Source,
}

/// Phrase → abbreviation mapping, ordered by phrase.
///
/// The map itself does not police abbreviation uniqueness; the allocation
/// engine does that through its reserved set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutMap {
    entries: BTreeMap<String, Shortcut>,
}

impl ShortcutMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abbreviation assigned to `phrase`, if any.
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(|s| s.abbrev.as_str())
    }

    /// Full entry for `phrase`, if any.
    pub fn entry(&self, phrase: &str) -> Option<&Shortcut> {
        self.entries.get(phrase)
    }

    /// Returns `true` if `phrase` has an abbreviation.
    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains_key(phrase)
    }

    /// Assign `abbrev` to `phrase`, replacing any previous entry.
    pub fn insert(&mut self, phrase: impl Into<String>, abbrev: impl Into<String>, source: Source) {
        self.entries.insert(
            phrase.into(),
            Shortcut {
                abbrev: abbrev.into(),
                source,
            },
        );
    }

    pub(crate) fn remove(&mut self, phrase: &str) -> Option<Shortcut> {
        self.entries.remove(phrase)
    }

    /// Number of shortcuts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no shortcuts were assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(phrase, shortcut)` in phrase order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Shortcut> {
        self.entries.iter()
    }

    /// Plain `(phrase, abbrev)` pairs in phrase order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(phrase, s)| (phrase.clone(), s.abbrev.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ShortcutMap {
    type Item = (&'a String, &'a Shortcut);
    type IntoIter = btree_map::Iter<'a, String, Shortcut>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a map of presets, mostly useful in tests and examples.
impl<P: Into<String>, A: Into<String>> FromIterator<(P, A)> for ShortcutMap {
    fn from_iter<I: IntoIterator<Item = (P, A)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (phrase, abbrev) in iter {
            map.insert(phrase, abbrev, Source::Preset);
        }
        map
    }
}

/// Serializes as a plain `phrase: abbrev` mapping.
impl Serialize for ShortcutMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (phrase, shortcut) in &self.entries {
            map.serialize_entry(phrase, &shortcut.abbrev)?;
        }
        map.end()
    }
}
