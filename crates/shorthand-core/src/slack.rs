//! Slack export ingestion.
//!
//! A Slack export is a directory of JSON files, each an array of messages.
//! Only the chosen user's messages are kept, cleaned down to lowercase words
//! so they can feed the n-gram counter like any other corpus file.

use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{CorpusError, CorpusResult};

/// `<@U123>`, `<#C123|general>`, `<https://...>` and friends.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("valid regex"));

/// `:slightly_smiling_face:`
static EMOJI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\S*:").expect("valid regex"));

static NON_TEXT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    user_profile: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    #[serde(default)]
    name: Option<String>,
}

/// Collect the raw text of every message `username` sent.
///
/// Messages without a `text` or `user_profile.name` (joins, bot posts, file
/// shares) are skipped. Files are read in path order.
#[tracing::instrument]
pub fn extract_slack_messages(export_root: &Utf8Path, username: &str) -> CorpusResult<Vec<String>> {
    let mut messages = Vec::new();

    for entry in WalkDir::new(export_root.as_std_path()).sort_by_file_name() {
        let entry = entry.map_err(|source| CorpusError::Walk {
            root: export_root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            continue;
        };
        if path.extension() != Some("json") {
            continue;
        }

        let content =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| CorpusError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let channel: Vec<Message> =
            serde_json::from_str(&content).map_err(|source| CorpusError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        messages.extend(channel.into_iter().filter_map(|msg| {
            let name = msg.user_profile?.name?;
            (name == username).then_some(msg.text).flatten()
        }));
    }

    tracing::debug!(messages = messages.len(), "extracted slack messages");
    Ok(messages)
}

/// Reduce a Slack message to lowercase alphanumeric words.
///
/// Drops tags and emoji codes, removes apostrophes (so contractions stay one
/// word), turns remaining punctuation into spaces and collapses whitespace.
pub fn clean_slack_message(text: &str) -> String {
    let text = TAG_PATTERN.replace_all(text, "");
    let text = EMOJI_PATTERN.replace_all(&text, "");
    let text = text.replace('\'', "");
    let text = NON_TEXT_PATTERN.replace_all(&text, " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_lowercase()
}

/// Write cleaned messages to `path`, one per line.
pub fn write_corpus_file<S: AsRef<str>>(path: &Utf8Path, messages: &[S]) -> CorpusResult<()> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(msg.as_ref());
        out.push('\n');
    }
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent.as_std_path()).map_err(|source| CorpusError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path.as_std_path(), out).map_err(|source| CorpusError::Write {
        path: path.to_path_buf(),
        source,
    })
}
