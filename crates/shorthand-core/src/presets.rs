//! Built-in blacklist and preset shortcuts.
//!
//! Used when the configuration does not supply its own `blacklist` or
//! `presets`. Presets are responsible for their own plurals.

use std::collections::{BTreeMap, BTreeSet};

/// Strings that are never emitted as abbreviations.
///
/// Mostly real words that would be expanded by accident while typing.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "a", "i", "it", "an", "int", "so", "is", "re", "we", "the", "in", "as", "no", "ie", "eg", "me",
    "be", "at", "do", "talk",
];

/// Shortcuts that always win over generated ones.
pub const DEFAULT_PRESETS: &[(&str, &str)] = &[
    ("and", "n"),
    ("actually", "ac"),
    ("anything", "ay"),
    ("everyone", "eo"),
    ("think", "tk"),
    ("about", "ab"),
    ("hardware", "hw"),
    ("software", "sw"),
    ("without", "wo"),
    ("if i remember correctly", "iirc"),
    ("let me know", "lmk"),
    ("definitely", "def"),
    ("I'll keep you posted", "ikyp"),
    ("Anything else I can help with?", "ayel"),
    ("calendar invite", "cali"),
    ("screenshot", "sc"),
    ("Can you post a screenshot?", "csc"),
];

/// [`DEFAULT_BLACKLIST`] as an owned set.
pub fn default_blacklist() -> BTreeSet<String> {
    DEFAULT_BLACKLIST.iter().map(|s| (*s).to_string()).collect()
}

/// [`DEFAULT_PRESETS`] as an owned map.
pub fn default_presets() -> BTreeMap<String, String> {
    DEFAULT_PRESETS
        .iter()
        .map(|(phrase, abbrev)| ((*phrase).to_string(), (*abbrev).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        assert!(default_blacklist().contains("a"));
        assert_eq!(default_presets().get("about").map(String::as_str), Some("ab"));
    }

    #[test]
    fn preset_abbrevs_are_unique_and_not_blacklisted() {
        let blacklist = default_blacklist();
        let mut seen = BTreeSet::new();
        for (_, abbrev) in DEFAULT_PRESETS {
            assert!(seen.insert(*abbrev), "duplicate preset abbrev {abbrev}");
            assert!(!blacklist.contains(*abbrev), "blacklisted preset {abbrev}");
        }
    }
}
