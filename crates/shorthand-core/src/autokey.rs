//! AutoKey phrase configuration.
//!
//! AutoKey stores each phrase as two files in its phrase folder: `<name>.txt`
//! holds the expansion and `.<name>.json` holds the trigger settings.

use camino::Utf8Path;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ExportError, ExportResult};

/// Abbreviations that look like file extensions, where `.` must count as a
/// word character so `main.py` does not expand.
pub const FILE_EXTENSION_ABBREVS: &[&str] = &["py"];

/// Window filter applied when none is configured.
pub const DEFAULT_FILTER_REGEX: &str = "google-chrome.Google-chrome";

/// Lowercased alphanumeric characters of `phrase`, for use as a file name.
pub fn safe_file_name(phrase: &str) -> String {
    phrase
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The `.<name>.json` document for one phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutokeyPhrase {
    /// Always 0 for a new phrase.
    pub usage_count: u32,
    /// Keep the trigger character after expanding.
    pub omit_trigger: bool,
    /// Ask before expanding.
    pub prompt: bool,
    /// The expansion text, shown in AutoKey's phrase list.
    pub description: String,
    /// Trigger settings.
    pub abbreviation: AbbreviationSettings,
    /// Unused; abbreviations are the only trigger.
    pub hotkey: Hotkey,
    /// AutoKey trigger modes (`1` = abbreviation).
    pub modes: Vec<u8>,
    /// Show in the tray menu.
    pub show_in_tray_menu: bool,
    /// Reproduce the typed abbreviation's case in the expansion.
    pub match_case: bool,
    /// Window restriction.
    pub filter: WindowFilter,
    /// Always `"phrase"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Always `"kb"` (simulated keyboard).
    pub send_mode: String,
}

/// Trigger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbbreviationSettings {
    /// Characters that, when adjacent, suppress the expansion.
    pub word_chars: String,
    /// Every abbreviation that triggers the phrase.
    pub abbreviations: Vec<String>,
    /// Expand without waiting for a trigger character.
    pub immediate: bool,
    /// Match the abbreviation regardless of case.
    pub ignore_case: bool,
    /// Erase the typed abbreviation.
    pub backspace: bool,
    /// Expand inside longer words.
    pub trigger_inside: bool,
}

/// Hotkey trigger, left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotkey {
    /// Key name, `null` when unset.
    pub hot_key: Option<String>,
    /// Modifier keys.
    pub modifiers: Vec<String>,
}

/// Restricts the phrase to windows whose class matches `regex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowFilter {
    /// Window class pattern.
    pub regex: String,
    /// Apply to child folders too.
    pub is_recursive: bool,
}

impl AutokeyPhrase {
    /// Build the settings for `phrase`.
    ///
    /// `abbrev` may be a comma separated list. Phrases containing capitals
    /// are matched case-sensitively.
    pub fn new(phrase: &str, abbrev: &str, filter_regex: &str) -> Self {
        let extra = if FILE_EXTENSION_ABBREVS.contains(&abbrev) {
            r"\."
        } else {
            ""
        };
        let case_insensitive = !phrase.chars().any(char::is_uppercase);

        Self {
            usage_count: 0,
            omit_trigger: false,
            prompt: false,
            description: phrase.to_string(),
            abbreviation: AbbreviationSettings {
                word_chars: format!(r"[\w\t'{extra}\-&\+]"),
                abbreviations: abbrev.split(',').map(|a| a.trim().to_string()).collect(),
                immediate: false,
                ignore_case: case_insensitive,
                backspace: true,
                trigger_inside: false,
            },
            hotkey: Hotkey::default(),
            modes: vec![1],
            show_in_tray_menu: false,
            match_case: case_insensitive,
            filter: WindowFilter {
                regex: filter_regex.to_string(),
                is_recursive: false,
            },
            kind: "phrase".to_string(),
            send_mode: "kb".to_string(),
        }
    }

    /// Serialize with the 4-space indentation AutoKey itself writes.
    pub fn to_json(&self) -> ExportResult<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)
            .map_err(|source| ExportError::Json {
                phrase: self.description.clone(),
                source,
            })?;
        String::from_utf8(buf).map_err(|source| ExportError::Utf8 {
            phrase: self.description.clone(),
            source,
        })
    }
}

/// Write `<name>.txt` and `.<name>.json` for one shortcut into `dir`.
///
/// Creates `dir` if needed. Returns the file name stem used.
#[tracing::instrument(skip(filter_regex))]
pub fn write_autokey_phrase(
    dir: &Utf8Path,
    phrase: &str,
    abbrev: &str,
    filter_regex: &str,
) -> ExportResult<String> {
    std::fs::create_dir_all(dir.as_std_path()).map_err(io_err(dir))?;

    let name = safe_file_name(phrase);
    let json = AutokeyPhrase::new(phrase, abbrev, filter_regex).to_json()?;

    let text_path = dir.join(format!("{name}.txt"));
    std::fs::write(text_path.as_std_path(), phrase).map_err(io_err(&text_path))?;

    let json_path = dir.join(format!(".{name}.json"));
    std::fs::write(json_path.as_std_path(), json).map_err(io_err(&json_path))?;

    Ok(name)
}

fn io_err(path: &Utf8Path) -> impl FnOnce(std::io::Error) -> ExportError {
    let path = path.to_path_buf();
    move |source| ExportError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn file_names_keep_only_lowercase_alphanumerics() {
        assert_eq!(safe_file_name("test_because"), "testbecause");
        assert_eq!(safe_file_name("Can you post a screenshot?"), "canyoupostascreenshot");
    }

    #[test]
    fn file_extension_abbrevs_treat_dot_as_word_char() {
        let py = AutokeyPhrase::new("python", "py", DEFAULT_FILTER_REGEX);
        assert_eq!(py.abbreviation.word_chars, r"[\w\t'\.\-&\+]");

        let bc = AutokeyPhrase::new("because", "bc", DEFAULT_FILTER_REGEX);
        assert_eq!(bc.abbreviation.word_chars, r"[\w\t'\-&\+]");
    }

    #[test]
    fn capitals_make_matching_case_sensitive() {
        let phrase = AutokeyPhrase::new("I'll keep you posted", "ikyp", DEFAULT_FILTER_REGEX);
        assert!(!phrase.abbreviation.ignore_case);
        assert!(!phrase.match_case);
    }

    #[test]
    fn comma_separated_abbrevs_are_split() {
        let phrase = AutokeyPhrase::new("because", "bc, bcs", DEFAULT_FILTER_REGEX);
        assert_eq!(phrase.abbreviation.abbreviations, vec!["bc", "bcs"]);
    }

    #[test]
    fn json_keeps_non_ascii_text() {
        let json = AutokeyPhrase::new("café", "cf", DEFAULT_FILTER_REGEX)
            .to_json()
            .unwrap();
        assert!(json.starts_with("{\n    \"usageCount\": 0"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["description"], "café");
    }

    #[test]
    fn writes_phrase_and_config_files() {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().join("autokey_phrases")).unwrap();

        let name = write_autokey_phrase(&dir, "test_because", "bc", DEFAULT_FILTER_REGEX).unwrap();
        assert_eq!(name, "testbecause");

        let text = std::fs::read_to_string(dir.join("testbecause.txt")).unwrap();
        assert_eq!(text, "test_because");

        let raw = std::fs::read_to_string(dir.join(".testbecause.json")).unwrap();
        assert!(raw.contains("\n    \"usageCount\": 0"));

        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let expected = serde_json::json!({
            "usageCount": 0,
            "omitTrigger": false,
            "prompt": false,
            "description": "test_because",
            "abbreviation": {
                "wordChars": "[\\w\\t'\\-&\\+]",
                "abbreviations": ["bc"],
                "immediate": false,
                "ignoreCase": true,
                "backspace": true,
                "triggerInside": false
            },
            "hotkey": {"hotKey": null, "modifiers": []},
            "modes": [1],
            "showInTrayMenu": false,
            "matchCase": true,
            "filter": {"regex": "google-chrome.Google-chrome", "isRecursive": false},
            "type": "phrase",
            "sendMode": "kb"
        });
        assert_eq!(json, expected);
    }
}
