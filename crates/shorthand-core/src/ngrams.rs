//! N-gram counting and savings scoring.
//!
//! Turns corpus lines into ranked [`PhraseStat`] candidates. A phrase's
//! savings score estimates how many characters an abbreviation would save:
//!
//! `score = (phrase_len - AVG_ABBREV_LEN) * count`

use std::collections::HashMap;

use serde::Serialize;

/// Phrases must occur strictly more often than this to be ranked.
pub const MIN_COUNT: u64 = 3;

/// Phrases shorter than this (in characters) cannot be meaningfully shortened.
pub const MIN_PHRASE_LEN: usize = 2;

/// Expected abbreviation length used by the savings heuristic.
pub const AVG_ABBREV_LEN: usize = 2;

/// Occurrence counts for every token n-gram seen in a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramCounts {
    counts: HashMap<Vec<String>, u64>,
}

impl NgramCounts {
    /// Occurrence count of a token sequence (0 if never seen).
    pub fn get<S: AsRef<str>>(&self, tokens: &[S]) -> u64 {
        let key: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Occurrence count of a space-joined phrase.
    pub fn phrase_count(&self, phrase: &str) -> u64 {
        let tokens: Vec<&str> = phrase.split_whitespace().collect();
        self.get(&tokens)
    }

    /// Number of distinct n-grams.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(tokens, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], u64)> {
        self.counts.iter().map(|(k, v)| (k.as_slice(), *v))
    }

    /// Every distinct single token.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.counts
            .keys()
            .filter(|k| k.len() == 1)
            .map(|k| k[0].as_str())
    }

    fn add(&mut self, tokens: &[&str]) {
        let key = tokens.iter().map(|t| (*t).to_string()).collect();
        *self.counts.entry(key).or_insert(0) += 1;
    }
}

impl<S: AsRef<str>> FromIterator<(Vec<S>, u64)> for NgramCounts {
    fn from_iter<I: IntoIterator<Item = (Vec<S>, u64)>>(iter: I) -> Self {
        let counts = iter
            .into_iter()
            .map(|(k, v)| (k.iter().map(|t| t.as_ref().to_string()).collect(), v))
            .collect();
        Self { counts }
    }
}

/// A phrase worth considering for abbreviation.
///
/// Field order matters: the derived ordering compares `score` first, then
/// `phrase`, `len` and `count`, which is the ranking tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PhraseStat {
    /// Estimated characters saved over the corpus.
    pub score: u64,
    /// Space-joined phrase.
    pub phrase: String,
    /// Phrase length in characters.
    pub len: usize,
    /// Raw occurrence count.
    pub count: u64,
}

impl PhraseStat {
    /// Build a stat, computing `len` and `score` from the phrase and count.
    pub fn new(phrase: impl Into<String>, count: u64) -> Self {
        let phrase = phrase.into();
        let len = phrase.chars().count();
        let score = len.saturating_sub(AVG_ABBREV_LEN) as u64 * count;
        Self {
            score,
            phrase,
            len,
            count,
        }
    }

    /// Returns `true` if the phrase is a single token.
    pub fn is_single_word(&self) -> bool {
        !self.phrase.contains(' ')
    }
}

/// Count every n-gram of order `1..=max_n` in each line.
///
/// Lines are split on whitespace; windows never cross line boundaries.
#[tracing::instrument(skip(lines))]
pub fn count_ngrams<I, S>(lines: I, max_n: usize) -> NgramCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = NgramCounts::default();
    let mut line_count = 0usize;

    for line in lines {
        line_count += 1;
        let tokens: Vec<&str> = line.as_ref().split_whitespace().collect();
        for n in 1..=max_n {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                counts.add(window);
            }
        }
    }

    tracing::debug!(lines = line_count, distinct = counts.len(), "counted n-grams");
    counts
}

/// Rank n-grams by savings score and keep the best `top_n`.
///
/// Drops phrases seen `MIN_COUNT` times or fewer and phrases shorter than
/// `MIN_PHRASE_LEN` characters.
#[tracing::instrument(skip(counts), fields(distinct = counts.len()))]
pub fn rank_phrases(counts: &NgramCounts, top_n: usize) -> Vec<PhraseStat> {
    let mut ranked: Vec<PhraseStat> = counts
        .iter()
        .filter(|(tokens, count)| !tokens.is_empty() && *count > MIN_COUNT)
        .map(|(tokens, count)| PhraseStat::new(tokens.join(" "), count))
        .filter(|stat| stat.len >= MIN_PHRASE_LEN)
        .collect();

    ranked.sort_by(|a, b| b.cmp(a));
    ranked.truncate(top_n);

    tracing::debug!(kept = ranked.len(), "ranked phrases");
    ranked
}
