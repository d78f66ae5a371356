//! AutoKey command: shortcut file in, AutoKey phrase files out.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use shorthand_core::autokey::write_autokey_phrase;
use shorthand_core::config::Config;
use shorthand_core::export::load_shortcuts;

use super::print_json;

/// Arguments for the `autokey` subcommand.
#[derive(Args, Debug, Default)]
pub struct AutokeyArgs {
    /// Shortcut YAML file (default: `output` from config).
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<Utf8PathBuf>,

    /// Folder to write phrase files into (default: `autokey.output_dir`).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Window class regex the phrases are limited to.
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,
}

#[derive(Serialize)]
struct AutokeyOutput<'a> {
    input: &'a Utf8Path,
    output_dir: &'a Utf8Path,
    phrases: Vec<String>,
}

/// Write an AutoKey phrase for every entry of the shortcut file.
#[instrument(name = "cmd_autokey", skip_all)]
pub fn cmd_autokey(args: AutokeyArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let input = args.input.as_ref().unwrap_or(&config.output);
    let output_dir = args.output_dir.as_ref().unwrap_or(&config.autokey.output_dir);
    let filter = args.filter.as_deref().unwrap_or(&config.autokey.filter_regex);
    debug!(%input, %output_dir, filter, "executing autokey command");

    let shortcuts =
        load_shortcuts(input).with_context(|| format!("failed to read shortcuts from {input}"))?;

    let phrases = shortcuts
        .iter()
        .map(|(phrase, abbrev)| {
            write_autokey_phrase(output_dir, phrase, abbrev, filter)
                .with_context(|| format!("failed to write AutoKey phrase for {phrase:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if global_json {
        return print_json(&AutokeyOutput {
            input,
            output_dir,
            phrases,
        });
    }

    println!(
        "Wrote {} AutoKey phrases to {}",
        phrases.len().bold(),
        output_dir.cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_one_phrase_per_shortcut() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let input = root.join("shortcuts.yaml");
        std::fs::write(&input, "because: bc\nI think: itk\n").unwrap();

        let args = AutokeyArgs {
            input: Some(input),
            output_dir: Some(root.join("phrases")),
            filter: None,
        };
        cmd_autokey(args, true, &Config::default()).unwrap();

        assert!(root.join("phrases/because.txt").is_file());
        assert!(root.join("phrases/.because.json").is_file());
        assert!(root.join("phrases/ithink.txt").is_file());
    }

    #[test]
    fn missing_input_errors() {
        let args = AutokeyArgs {
            input: Some(Utf8PathBuf::from("/nonexistent/shortcuts.yaml")),
            ..AutokeyArgs::default()
        };
        assert!(cmd_autokey(args, true, &Config::default()).is_err());
    }
}
