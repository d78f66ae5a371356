//! Shortcut reports and YAML export.

use camino::Utf8Path;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{ExportError, ExportResult};
use crate::ngrams::NgramCounts;
use crate::shortcut::ShortcutMap;

/// Lowercase corpus spellings restored on export.
const GRAMMAR_FIXES: &[(&str, &str)] = &[("i", "I"), ("dont", "don't"), ("doesnt", "doesn't")];

/// Restore capitalisation and apostrophes lost when the corpus was cleaned.
///
/// Works word by word on single spaces, so other spacing is preserved.
pub fn fix_grammar(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            GRAMMAR_FIXES
                .iter()
                .find(|(from, _)| *from == word)
                .map_or(word, |(_, to)| *to)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line of the final shortcut report.
///
/// Field order gives the report order: ascending by realised savings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ReportRow {
    /// Characters actually saved over the corpus with this abbreviation.
    pub score: u64,
    /// The expanded phrase.
    pub phrase: String,
    /// Its abbreviation.
    pub abbrev: String,
    /// How often the phrase occurred in the corpus.
    pub count: u64,
}

/// Report rows in ascending score order.
pub type ShortcutReport = Vec<ReportRow>;

/// Score every shortcut against the corpus counts, least valuable first.
///
/// Shortcuts absent from the corpus (unused presets) score 0.
pub fn build_report(shortcuts: &ShortcutMap, counts: &NgramCounts) -> ShortcutReport {
    let mut rows: Vec<ReportRow> = shortcuts
        .iter()
        .map(|(phrase, shortcut)| {
            let count = counts.phrase_count(phrase);
            let saved = phrase
                .chars()
                .count()
                .saturating_sub(shortcut.abbrev.chars().count());
            ReportRow {
                score: count * saved as u64,
                phrase: phrase.clone(),
                abbrev: shortcut.abbrev.clone(),
                count,
            }
        })
        .collect();
    rows.sort();
    rows
}

/// Write the report as a YAML `phrase: abbrev` mapping, in report order.
///
/// Phrases pass through [`fix_grammar`] first.
#[tracing::instrument(skip(rows), fields(rows = rows.len()))]
pub fn save_shortcuts(path: &Utf8Path, rows: &[ReportRow]) -> ExportResult<()> {
    let mut mapping = Mapping::new();
    for row in rows {
        mapping.insert(
            Value::String(fix_grammar(&row.phrase)),
            Value::String(row.abbrev.clone()),
        );
    }
    let yaml = serde_yaml::to_string(&mapping).map_err(|source| ExportError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent.as_std_path()).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path.as_std_path(), yaml).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a `phrase: abbrev` YAML file, preserving file order.
#[tracing::instrument]
pub fn load_shortcuts(path: &Utf8Path) -> ExportResult<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path.as_std_path()).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mapping: Mapping = serde_yaml::from_str(&content).map_err(|source| ExportError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    mapping
        .into_iter()
        .map(|(phrase, abbrev)| match (phrase, abbrev) {
            (Value::String(phrase), Value::String(abbrev)) => Ok((phrase, abbrev)),
            _ => Err(ExportError::NonStringEntry {
                path: path.to_path_buf(),
            }),
        })
        .collect()
}
