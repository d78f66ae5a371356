//! Greedy abbreviation allocation.
//!
//! Assigns each ranked phrase a unique abbreviation in two passes:
//!
//! 1. **Single words**, best score first. Each word takes the first free
//!    candidate that saves at least two characters; its plural (when the
//!    lexicon knows one) is offered the same abbreviation plus `s`.
//! 2. **Multi-word phrases**, best score first. Each phrase is given the
//!    concatenation of its words' abbreviations (or initials). When that
//!    abbreviation is held by another generated phrase, the better-ranked
//!    phrase keeps it.
//!
//! There is no backtracking. Anything that cannot be placed is reported as
//! an [`AllocationWarning`] and left out of the map; a run never fails.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::candidates::candidate_abbrevs;
use crate::consistency;
use crate::lexicon::Lexicon;
use crate::ngrams::PhraseStat;
use crate::shortcut::{ShortcutMap, Source};

/// Caller-supplied constraints for one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationSettings {
    /// Strings that must never be used as abbreviations.
    pub blacklist: BTreeSet<String>,
    /// Phrase → abbreviation pairs seeded before allocation and never changed.
    pub presets: BTreeMap<String, String>,
}

impl AllocationSettings {
    /// Settings with no blacklist and no presets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the blacklist.
    pub fn with_blacklist<I, S>(mut self, blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = blacklist.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the presets.
    pub fn with_presets<I, P, A>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = (P, A)>,
        P: Into<String>,
        A: Into<String>,
    {
        self.presets = presets
            .into_iter()
            .map(|(p, a)| (p.into(), a.into()))
            .collect();
        self
    }
}

/// Who holds a reserved abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    /// Reserved by the blacklist.
    Blacklist,
    /// Assigned to this phrase (preset or allocated).
    Phrase(String),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blacklist => f.write_str("the blacklist"),
            Self::Phrase(phrase) => write!(f, "{phrase:?}"),
        }
    }
}

/// Abbreviations that may not be handed out, with their holders.
///
/// Doubles as the reverse index (abbreviation → phrase) used to settle
/// collisions in constant time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedSet {
    owners: HashMap<String, Owner>,
}

impl ReservedSet {
    /// Returns `true` if `abbrev` is taken.
    pub fn contains(&self, abbrev: &str) -> bool {
        self.owners.contains_key(abbrev)
    }

    /// Holder of `abbrev`, if taken.
    pub fn owner(&self, abbrev: &str) -> Option<&Owner> {
        self.owners.get(abbrev)
    }

    /// Number of reserved abbreviations.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    fn reserve(&mut self, abbrev: impl Into<String>, owner: Owner) {
        self.owners.insert(abbrev.into(), owner);
    }
}

/// A recoverable problem met during allocation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// No candidate was both free and short enough.
    #[error("no abbreviation available for {phrase:?} (score {score})")]
    Unassignable {
        /// Phrase left without an abbreviation.
        phrase: String,
        /// Its savings score.
        score: u64,
    },

    /// A word was assigned but its plural could not follow it.
    #[error("plural {plural:?} of {singular:?} left unassigned: {abbrev:?} is unavailable")]
    BlockedPlural {
        /// The singular word that was assigned.
        singular: String,
        /// The plural left unassigned.
        plural: String,
        /// The abbreviation the plural would have taken.
        abbrev: String,
    },

    /// A phrase's composed abbreviation is held by someone that outranks it.
    #[error("{phrase:?} composes to {abbrev:?}, which is held by {holder}")]
    Collision {
        /// Phrase left without an abbreviation.
        phrase: String,
        /// The contested abbreviation.
        abbrev: String,
        /// Current holder of the abbreviation.
        holder: Owner,
    },

    /// A phrase lost its abbreviation to a better-ranked phrase.
    #[error("{phrase:?} lost {abbrev:?} to higher-ranked {winner:?}")]
    Displaced {
        /// Phrase that lost its abbreviation.
        phrase: String,
        /// The abbreviation that changed hands.
        abbrev: String,
        /// Phrase now holding the abbreviation.
        winner: String,
    },
}

impl AllocationWarning {
    /// The phrase left unassigned by this warning.
    pub fn phrase(&self) -> &str {
        match self {
            Self::Unassignable { phrase, .. }
            | Self::Collision { phrase, .. }
            | Self::Displaced { phrase, .. } => phrase,
            Self::BlockedPlural { plural, .. } => plural,
        }
    }
}

/// Outcome of an allocation run: the final map and everything that went
/// wrong along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// Final phrase → abbreviation mapping.
    pub shortcuts: ShortcutMap,
    /// Recoverable problems, in the order they were met.
    pub warnings: Vec<AllocationWarning>,
}

/// Result of walking a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Choice {
    /// The candidate at `index` was free and short enough.
    Assigned { abbrev: String, index: usize },
    /// Nothing in the list qualified.
    Unassigned,
}

/// Position of a phrase in the ranked input, used to settle collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank {
    score: u64,
    position: usize,
}

impl Rank {
    /// Phrases missing from the ranked input (derived plurals) lose to
    /// every ranked phrase.
    const UNRANKED: Self = Self {
        score: 0,
        position: usize::MAX,
    };

    /// Higher score wins; on a tie the earlier phrase wins.
    fn outranks(self, other: Self) -> bool {
        self.score > other.score || (self.score == other.score && self.position < other.position)
    }
}

/// Phrase → rank lookup built once per run.
#[derive(Debug, Default)]
struct RankTable {
    ranks: HashMap<String, Rank>,
}

impl RankTable {
    fn new(ranked: &[PhraseStat]) -> Self {
        let mut ranks = HashMap::with_capacity(ranked.len());
        for (position, stat) in ranked.iter().enumerate() {
            ranks.entry(stat.phrase.clone()).or_insert(Rank {
                score: stat.score,
                position,
            });
        }
        Self { ranks }
    }

    fn get(&self, phrase: &str) -> Rank {
        self.ranks.get(phrase).copied().unwrap_or(Rank::UNRANKED)
    }
}

/// Returns `true` if `abbrev` saves at least two characters over `phrase`.
pub fn saves_enough(abbrev: &str, phrase: &str) -> bool {
    !abbrev.is_empty() && abbrev.chars().count() + 1 < phrase.chars().count()
}

/// State of one allocation run.
///
/// Owns its shortcut map and reserved set exclusively; nothing is shared
/// between runs.
pub struct Allocator<'a> {
    lexicon: &'a dyn Lexicon,
    shortcuts: ShortcutMap,
    reserved: ReservedSet,
    warnings: Vec<AllocationWarning>,
}

impl fmt::Debug for Allocator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocator")
            .field("shortcuts", &self.shortcuts.len())
            .field("reserved", &self.reserved.len())
            .field("warnings", &self.warnings.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Allocator<'a> {
    /// Start a run seeded with the blacklist and presets.
    pub fn new(settings: &AllocationSettings, lexicon: &'a dyn Lexicon) -> Self {
        let mut reserved = ReservedSet::default();
        for abbrev in &settings.blacklist {
            reserved.reserve(abbrev.as_str(), Owner::Blacklist);
        }

        let mut shortcuts = ShortcutMap::new();
        for (phrase, abbrev) in &settings.presets {
            shortcuts.insert(phrase.as_str(), abbrev.as_str(), Source::Preset);
            reserved.reserve(abbrev.as_str(), Owner::Phrase(phrase.clone()));
        }

        Self {
            lexicon,
            shortcuts,
            reserved,
            warnings: Vec::new(),
        }
    }

    /// Run both passes over `ranked` and return the result.
    #[tracing::instrument(skip_all, fields(phrases = ranked.len()))]
    pub fn allocate(mut self, ranked: &[PhraseStat]) -> Allocation {
        self.assign_single_words(ranked);
        self.assign_phrases(ranked);
        self.finish()
    }

    /// Shortcuts assigned so far.
    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    /// Reserved abbreviations so far.
    pub fn reserved(&self) -> &ReservedSet {
        &self.reserved
    }

    /// End the run.
    pub fn finish(self) -> Allocation {
        debug!(
            shortcuts = self.shortcuts.len(),
            warnings = self.warnings.len(),
            "allocation finished"
        );
        Allocation {
            shortcuts: self.shortcuts,
            warnings: self.warnings,
        }
    }

    /// Pass 1: give every single-word phrase (and its plural) an abbreviation.
    ///
    /// A plural ranked above its own singular waits for the singular, which
    /// is allocated first so the plural can follow it.
    pub fn assign_single_words(&mut self, ranked: &[PhraseStat]) {
        let mut words: HashMap<&str, &PhraseStat> = HashMap::new();
        for stat in ranked.iter().filter(|s| s.is_single_word()) {
            words.entry(stat.phrase.as_str()).or_insert(stat);
        }

        for stat in ranked.iter().filter(|s| s.is_single_word()) {
            if self.shortcuts.contains(&stat.phrase) {
                continue;
            }
            if let Some(singular) = self.ranked_singular(&stat.phrase, &words)
                && !self.shortcuts.contains(&singular.phrase)
            {
                debug!(plural = %stat.phrase, singular = %singular.phrase, "singular first");
                self.assign_word(singular);
                if self.shortcuts.contains(&stat.phrase) {
                    continue;
                }
            }
            self.assign_word(stat);
        }
    }

    /// Pass 2: give every multi-word phrase a composed abbreviation.
    pub fn assign_phrases(&mut self, ranked: &[PhraseStat]) {
        let ranks = RankTable::new(ranked);
        for stat in ranked.iter().filter(|s| !s.is_single_word()) {
            if self.shortcuts.contains(&stat.phrase) {
                continue;
            }
            self.assign_phrase(stat, &ranks);
        }
    }

    fn assign_word(&mut self, stat: &PhraseStat) {
        let word = stat.phrase.as_str();

        let mut candidates: Vec<String> = consistency::resolve(&self.shortcuts, word)
            .into_iter()
            .collect();
        if let Some(singular) = self.lexicon.singular_of(word)
            && word.strip_suffix('s') != Some(singular.as_str())
            && let Some(abbrev) = self.shortcuts.get(&singular)
        {
            candidates.push(format!("{abbrev}s"));
        }
        let derived = candidates.len();
        candidates.extend(candidate_abbrevs(word));

        match self.choose(word, &candidates) {
            Choice::Assigned { abbrev, index } => {
                let source = if index < derived {
                    Source::Plural
                } else {
                    Source::Generated
                };
                self.assign(word, &abbrev, source);
                self.assign_plural(word, &abbrev);
            }
            Choice::Unassigned => self.warn(AllocationWarning::Unassignable {
                phrase: word.to_string(),
                score: stat.score,
            }),
        }
    }

    /// The ranked word `word` is a plural of, if any.
    fn ranked_singular<'r>(
        &self,
        word: &str,
        words: &HashMap<&str, &'r PhraseStat>,
    ) -> Option<&'r PhraseStat> {
        self.lexicon
            .singular_of(word)
            .into_iter()
            .chain(word.strip_suffix('s').map(str::to_string))
            .find_map(|singular| words.get(singular.as_str()).copied())
    }

    fn assign_plural(&mut self, word: &str, abbrev: &str) {
        let Some(plural) = self.lexicon.plural_of(word) else {
            return;
        };
        let plural_abbrev = format!("{abbrev}s");

        if let Some(existing) = self.shortcuts.entry(&plural) {
            if existing.source != Source::Preset && existing.abbrev != plural_abbrev {
                self.warn(AllocationWarning::BlockedPlural {
                    singular: word.to_string(),
                    plural,
                    abbrev: plural_abbrev,
                });
            }
            return;
        }

        if !self.reserved.contains(&plural_abbrev) && saves_enough(&plural_abbrev, &plural) {
            self.assign(&plural, &plural_abbrev, Source::Plural);
        } else {
            self.warn(AllocationWarning::BlockedPlural {
                singular: word.to_string(),
                plural,
                abbrev: plural_abbrev,
            });
        }
    }

    fn assign_phrase(&mut self, stat: &PhraseStat, ranks: &RankTable) {
        let phrase = stat.phrase.as_str();
        let abbrev = consistency::resolve(&self.shortcuts, phrase)
            .unwrap_or_else(|| self.compose(phrase));

        if !saves_enough(&abbrev, phrase) {
            self.warn(AllocationWarning::Unassignable {
                phrase: phrase.to_string(),
                score: stat.score,
            });
            return;
        }

        let holder = match self.reserved.owner(&abbrev) {
            None => {
                self.assign(phrase, &abbrev, Source::Composite);
                return;
            }
            Some(Owner::Blacklist) => {
                self.warn(AllocationWarning::Collision {
                    phrase: phrase.to_string(),
                    abbrev,
                    holder: Owner::Blacklist,
                });
                return;
            }
            Some(Owner::Phrase(holder)) => holder.clone(),
        };

        let holder_is_preset = self
            .shortcuts
            .entry(&holder)
            .is_some_and(|s| s.source == Source::Preset);
        if !holder_is_preset && ranks.get(phrase).outranks(ranks.get(&holder)) {
            self.shortcuts.remove(&holder);
            self.assign(phrase, &abbrev, Source::Composite);
            self.warn(AllocationWarning::Displaced {
                phrase: holder,
                abbrev,
                winner: phrase.to_string(),
            });
        } else {
            self.warn(AllocationWarning::Collision {
                phrase: phrase.to_string(),
                abbrev,
                holder: Owner::Phrase(holder),
            });
        }
    }

    /// Each word's abbreviation if it has one, else its first character.
    fn compose(&self, phrase: &str) -> String {
        phrase
            .split_whitespace()
            .map(|word| match self.shortcuts.get(word) {
                Some(abbrev) => abbrev.to_string(),
                None => word.chars().take(1).collect(),
            })
            .collect()
    }

    fn choose(&self, phrase: &str, candidates: &[String]) -> Choice {
        candidates
            .iter()
            .enumerate()
            .find(|(_, c)| !self.reserved.contains(c) && saves_enough(c, phrase))
            .map_or(Choice::Unassigned, |(index, abbrev)| Choice::Assigned {
                abbrev: abbrev.clone(),
                index,
            })
    }

    fn assign(&mut self, phrase: &str, abbrev: &str, source: Source) {
        debug!(phrase, abbrev, ?source, "assigned");
        self.shortcuts.insert(phrase, abbrev, source);
        self.reserved
            .reserve(abbrev, Owner::Phrase(phrase.to_string()));
    }

    fn warn(&mut self, warning: AllocationWarning) {
        warn!(phrase = warning.phrase(), "{warning}");
        self.warnings.push(warning);
    }
}

/// Allocate abbreviations for `ranked` in one call.
///
/// # Examples
///
/// ```
/// use shorthand_core::allocate::{AllocationSettings, allocate};
/// use shorthand_core::lexicon::WordList;
/// use shorthand_core::ngrams::PhraseStat;
///
/// let ranked = vec![
///     PhraseStat::new("the", 9933),
///     PhraseStat::new("robot", 1267),
///     PhraseStat::new("the robot", 589),
/// ];
/// let lexicon = WordList::from_words(["robot", "robots"]);
/// let result = allocate(&ranked, &AllocationSettings::new(), &lexicon);
///
/// assert_eq!(result.shortcuts.get("the"), Some("t"));
/// assert_eq!(result.shortcuts.get("robots"), Some("rs"));
/// assert_eq!(result.shortcuts.get("the robot"), Some("tr"));
/// ```
pub fn allocate(
    ranked: &[PhraseStat],
    settings: &AllocationSettings,
    lexicon: &dyn Lexicon,
) -> Allocation {
    Allocator::new(settings, lexicon).allocate(ranked)
}
