//! Core library for shorthand.
//!
//! Mines a text corpus for frequent words and phrases, then assigns each a
//! short, unique abbreviation for use with a text-expansion tool.
//!
//! # Modules
//!
//! - [`ngrams`] - n-gram counting and phrase ranking
//! - [`candidates`] - candidate abbreviations for a phrase
//! - [`lexicon`] - word lookup with plural and singular forms
//! - [`consistency`] - abbreviations derived from existing assignments
//! - [`allocate`] - the two-pass allocation engine
//! - [`corpus`] / [`slack`] - corpus ingestion
//! - [`export`] / [`autokey`] - writing the results
//! - [`config`] - configuration loading and management
//! - [`error`] - error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use shorthand_core::{AllocationSettings, WordList, allocate, count_ngrams, rank_phrases};
//!
//! let lines = ["the robot is here", "the robot moved", "the robot", "the robot"];
//! let counts = count_ngrams(lines, 2);
//! let ranked = rank_phrases(&counts, 50);
//!
//! let lexicon = WordList::from_words(counts.vocabulary());
//! let allocation = allocate(&ranked, &AllocationSettings::new(), &lexicon);
//!
//! assert_eq!(allocation.shortcuts.get("robot"), Some("r"));
//! ```
#![deny(unsafe_code)]

pub mod allocate;
pub mod autokey;
pub mod candidates;
pub mod config;
pub mod consistency;
pub mod corpus;
pub mod error;
pub mod export;
pub mod lexicon;
pub mod ngrams;
pub mod presets;
pub mod shortcut;
pub mod slack;

pub use allocate::{Allocation, AllocationSettings, AllocationWarning, Allocator, Owner, allocate};
pub use candidates::candidate_abbrevs;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use corpus::{Corpus, load_corpus};
pub use error::{ConfigError, ConfigResult, CorpusError, CorpusResult, ExportError, ExportResult};
pub use export::{ReportRow, ShortcutReport, build_report, fix_grammar};
pub use lexicon::{CachedLexicon, Lexicon, WordList};
pub use ngrams::{NgramCounts, PhraseStat, count_ngrams, rank_phrases};
pub use shortcut::{Shortcut, ShortcutMap, Source};
