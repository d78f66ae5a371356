//! Candidate abbreviations for a phrase, best first.
//!
//! The list is intentionally not de-duplicated: callers walk it in order and
//! skip anything already reserved, so a repeated entry only costs a lookup.
//! The second character appears twice; removing it would shift the priority
//! of every later candidate.

/// Produce abbreviation candidates for `phrase`, most preferred first.
///
/// Multi-word phrases start with three word-based forms (acronym, first
/// letters of the first two words, first two letters of word one plus the
/// first letter of word two). Every phrase then gets character-based forms
/// drawn from the phrase with spaces removed.
///
/// Slicing is by character and clamps to the available length, so short
/// inputs never panic. Phrases under two characters yield only themselves.
///
/// # Examples
///
/// ```
/// use shorthand_core::candidates::candidate_abbrevs;
///
/// let out = candidate_abbrevs("the robot");
/// assert_eq!(&out[..3], ["tr", "tr", "thr"]);
/// ```
pub fn candidate_abbrevs(phrase: &str) -> Vec<String> {
    if phrase.chars().count() < 2 {
        return vec![phrase.to_string()];
    }

    let words: Vec<Vec<char>> = phrase
        .split_whitespace()
        .map(|w| w.chars().collect())
        .collect();
    let mut out: Vec<String> = Vec::with_capacity(14);

    if words.len() > 1 {
        out.push(words.iter().map(|w| head(w, 1)).collect());
        out.push(head(&words[0], 1) + &head(&words[1], 1));
        out.push(head(&words[0], 2) + &head(&words[1], 1));
    }

    let compact: Vec<char> = phrase.chars().filter(|c| *c != ' ').collect();
    if compact.is_empty() {
        return out;
    }
    let second = compact
        .get(1)
        .or(compact.last())
        .map_or_else(String::new, char::to_string);

    out.extend([
        head(&compact, 1),
        head(&compact, 1) + &tail(&compact, 1),
        head(&compact, 2),
        second.clone(),
        tail(&compact, 1),
        second,
        head(&compact, 3),
        head(&compact, 2) + &tail(&compact, 1),
        head(&compact, 1) + &tail(&compact, 2),
        head(&compact, 4),
        head(&compact, 2) + &tail(&compact, 2),
    ]);

    out
}

/// First `n` characters, or all of them if there are fewer.
fn head(chars: &[char], n: usize) -> String {
    chars.iter().take(n).collect()
}

/// Last `n` characters, or all of them if there are fewer.
fn tail(chars: &[char], n: usize) -> String {
    chars[chars.len().saturating_sub(n)..].iter().collect()
}
