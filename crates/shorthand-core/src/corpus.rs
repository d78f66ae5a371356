//! Corpus ingestion.
//!
//! Reads every file with a matching extension under a directory tree and
//! returns its lines. Files are visited in path order so n-gram ranking
//! stays reproducible.

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::error::{CorpusError, CorpusResult};

/// Lines of text gathered from a corpus directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Every line of every matching file, in file order.
    pub lines: Vec<String>,
    /// Files that contributed lines.
    pub files: Vec<Utf8PathBuf>,
}

impl Corpus {
    /// Returns `true` if no file matched.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Load all files under `root` whose extension is in `extensions`.
///
/// Extensions are given without the leading dot (`"txt"`, not `".txt"`);
/// a leading dot is tolerated. Invalid UTF-8 is replaced rather than
/// rejected. Finding no matching file is not an error, only a warning.
#[tracing::instrument(skip(extensions))]
pub fn load_corpus<S: AsRef<str>>(root: &Utf8Path, extensions: &[S]) -> CorpusResult<Corpus> {
    let wanted: Vec<&str> = extensions
        .iter()
        .map(|e| e.as_ref().trim_start_matches('.'))
        .collect();
    let mut corpus = Corpus::default();

    for entry in WalkDir::new(root.as_std_path()).sort_by_file_name() {
        let entry = entry.map_err(|source| CorpusError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 path");
            continue;
        };
        if !path.extension().is_some_and(|ext| wanted.contains(&ext)) {
            continue;
        }

        let bytes = std::fs::read(path.as_std_path()).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let before = corpus.lines.len();
        corpus.lines.extend(text.lines().map(str::to_string));
        tracing::debug!(%path, lines = corpus.lines.len() - before, "read corpus file");
        corpus.files.push(path.to_path_buf());
    }

    if corpus.is_empty() {
        tracing::warn!(%root, "no corpus files found");
    }
    Ok(corpus)
}
