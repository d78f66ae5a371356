//! Word validation and simple plural/singular derivation.
//!
//! The allocation engine only needs three questions answered: is this a word,
//! what is its plural, what is its singular. [`Lexicon`] captures that so the
//! engine can run against a real dictionary, the corpus vocabulary, or a
//! hand-built word set in tests.
//!
//! Plural and singular forms come from fixed suffix rules; a derived form is
//! accepted only if the lexicon recognises it.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use camino::Utf8Path;

use crate::error::{CorpusError, CorpusResult};

/// Dictionary capability consulted during allocation.
pub trait Lexicon {
    /// Returns `true` if `word` is a known word.
    fn is_word(&self, word: &str) -> bool;

    /// Plural of `word`, if a suffix rule produces a known word.
    ///
    /// Words already ending in a single `s` have no plural.
    fn plural_of(&self, word: &str) -> Option<String> {
        plural_candidates(word).into_iter().find(|c| self.is_word(c))
    }

    /// Singular of `word`, if it ends in `s` and a suffix rule produces a
    /// known word.
    fn singular_of(&self, word: &str) -> Option<String> {
        singular_candidates(word)
            .into_iter()
            .find(|c| self.is_word(c))
    }
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn is_word(&self, word: &str) -> bool {
        (**self).is_word(word)
    }

    fn plural_of(&self, word: &str) -> Option<String> {
        (**self).plural_of(word)
    }

    fn singular_of(&self, word: &str) -> Option<String> {
        (**self).singular_of(word)
    }
}

/// Plural forms to try for `word`, in order.
///
/// The rule-derived form comes first; plain `+s` follows as a fallback when
/// the rule produced something else.
pub fn plural_candidates(word: &str) -> Vec<String> {
    if word.is_empty() {
        return Vec::new();
    }
    if word.ends_with("ss") {
        return vec![format!("{word}es")];
    }
    if word.ends_with('s') {
        return Vec::new();
    }

    let ruled = if word.ends_with("zz") {
        format!("{word}es")
    } else if word.ends_with('z') {
        format!("{word}zes")
    } else if word.ends_with(['o', 'h', 'x']) {
        format!("{word}es")
    } else if let Some(stem) = word.strip_suffix('y')
        && stem.chars().last().is_some_and(is_consonant)
    {
        format!("{stem}ies")
    } else if let Some(stem) = word.strip_suffix("fe") {
        format!("{stem}ves")
    } else if let Some(stem) = word.strip_suffix('f') {
        format!("{stem}ves")
    } else {
        format!("{word}s")
    };

    let plain = format!("{word}s");
    if ruled == plain {
        vec![ruled]
    } else {
        vec![ruled, plain]
    }
}

/// Singular forms to try for `word`, in order. Empty unless `word` ends in
/// a single `s`.
pub fn singular_candidates(word: &str) -> Vec<String> {
    if !word.ends_with('s') || word.ends_with("ss") {
        return Vec::new();
    }

    let mut out = Vec::new();
    if let Some(stem) = word.strip_suffix('s')
        && !stem.is_empty()
    {
        out.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("ies") {
        out.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("ves") {
        out.push(format!("{stem}f"));
        out.push(format!("{stem}fe"));
    }
    if let Some(stem) = word.strip_suffix("es")
        && !stem.is_empty()
    {
        out.push(stem.to_string());
    }
    out
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// A lexicon backed by an in-memory word set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build a word list from any iterator of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a word list file: one word per line, blank lines and `#`
    /// comments ignored.
    #[tracing::instrument]
    pub fn from_file(path: &Utf8Path) -> CorpusResult<Self> {
        let content =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| CorpusError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let list = Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        tracing::debug!(words = list.len(), "loaded word list");
        Ok(list)
    }

    /// Add more words.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    fn is_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Memoises `is_word` lookups of an inner lexicon for one run.
#[derive(Debug)]
pub struct CachedLexicon<L> {
    inner: L,
    cache: RefCell<HashMap<String, bool>>,
}

impl<L: Lexicon> CachedLexicon<L> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct words looked up so far.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<L: Lexicon> Lexicon for CachedLexicon<L> {
    fn is_word(&self, word: &str) -> bool {
        if let Some(known) = self.cache.borrow().get(word) {
            return *known;
        }
        let known = self.inner.is_word(word);
        self.cache.borrow_mut().insert(word.to_string(), known);
        known
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn english() -> WordList {
        WordList::from_words([
            "wolf", "wolves", "box", "boxes", "robot", "robots", "lady", "ladies", "ash",
            "ashes", "hero", "heroes", "thing", "things", "hello", "day", "days", "photo",
            "photos", "knife", "knives", "quiz", "quizzes", "class", "classes",
        ])
    }

    #[test]
    fn plural_rules() {
        let lex = english();
        for (word, expected) in [
            ("things", None),
            ("wolf", Some("wolves")),
            ("box", Some("boxes")),
            ("robot", Some("robots")),
            ("lady", Some("ladies")),
            ("ash", Some("ashes")),
            ("hero", Some("heroes")),
            ("day", Some("days")),
            ("knife", Some("knives")),
            ("quiz", Some("quizzes")),
            ("class", Some("classes")),
        ] {
            assert_eq!(lex.plural_of(word).as_deref(), expected, "plural of {word}");
        }
    }

    #[test]
    fn plural_falls_back_to_plain_s() {
        // "photoes" is not a word, "photos" is.
        assert_eq!(english().plural_of("photo").as_deref(), Some("photos"));
    }

    #[test]
    fn plural_requires_known_word() {
        assert_eq!(english().plural_of("hello"), None);
    }

    #[test]
    fn singular_rules() {
        let lex = english();
        for (word, expected) in [
            ("things", Some("thing")),
            ("robots", Some("robot")),
            ("robot", None),
            ("hello", None),
            ("ladies", Some("lady")),
            ("wolves", Some("wolf")),
            ("knives", Some("knife")),
            ("boxes", Some("box")),
            ("class", None),
        ] {
            assert_eq!(lex.singular_of(word).as_deref(), expected, "singular of {word}");
        }
    }

    #[test]
    fn candidates_for_empty_word() {
        assert!(plural_candidates("").is_empty());
        assert!(singular_candidates("").is_empty());
        assert!(singular_candidates("s").is_empty());
    }

    #[test]
    fn word_list_from_file_skips_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("words.txt");
        std::fs::write(&path, "# dictionary\nrobot\n\n  robots  \n").unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();

        let list = WordList::from_file(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.is_word("robots"));
        assert!(!list.is_word("# dictionary"));
    }

    #[test]
    fn word_list_missing_file_errors() {
        let result = WordList::from_file(Utf8Path::new("/nonexistent/words.txt"));
        assert!(matches!(result, Err(CorpusError::Read { .. })));
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl Lexicon for Counting {
        fn is_word(&self, word: &str) -> bool {
            self.calls.set(self.calls.get() + 1);
            word == "robots"
        }
    }

    #[test]
    fn cached_lexicon_queries_each_word_once() {
        let lex = CachedLexicon::new(Counting {
            calls: Cell::new(0),
        });
        assert!(lex.is_word("robots"));
        assert!(lex.is_word("robots"));
        assert!(!lex.is_word("robotz"));
        assert!(!lex.is_word("robotz"));
        assert_eq!(lex.inner.calls.get(), 2);
        assert_eq!(lex.cached(), 2);
        assert_eq!(lex.plural_of("robot").as_deref(), Some("robots"));
    }
}
