//! Derive abbreviations from ones already assigned.
//!
//! Keeps related phrases predictable: once `robot` is `r`, `robots` should be
//! `rs` and `the robot` should be `tr` (given `the` is `t`).

use crate::shortcut::ShortcutMap;

/// Try to derive an abbreviation for `phrase` from existing shortcuts.
///
/// Rules, in order:
/// - plural: `phrase` ends in `s` and `phrase` minus that `s` is assigned →
///   its abbreviation plus `s`;
/// - composite: `phrase` has several words and every word is assigned →
///   the words' abbreviations concatenated.
///
/// The result is only a proposal; the caller still applies uniqueness and
/// length checks.
pub fn resolve(shortcuts: &ShortcutMap, phrase: &str) -> Option<String> {
    plural_of_assigned(shortcuts, phrase).or_else(|| composite_of_assigned(shortcuts, phrase))
}

fn plural_of_assigned(shortcuts: &ShortcutMap, phrase: &str) -> Option<String> {
    let singular = phrase.strip_suffix('s')?;
    shortcuts.get(singular).map(|abbrev| format!("{abbrev}s"))
}

fn composite_of_assigned(shortcuts: &ShortcutMap, phrase: &str) -> Option<String> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }
    words.iter().map(|w| shortcuts.get(w)).collect()
}
