//! Suggest command: corpus in, abbreviations out.

use std::time::Duration;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use shorthand_core::config::Config;
use shorthand_core::export::save_shortcuts;
use shorthand_core::{
    AllocationWarning, CachedLexicon, ReportRow, ShortcutMap, WordList, allocate, build_report,
    count_ngrams, load_corpus, rank_phrases,
};

use super::{print_json, require_dir};

/// Arguments for the `suggest` subcommand.
#[derive(Args, Debug, Default)]
pub struct SuggestArgs {
    /// Corpus directory (default: `corpus_dir` from config).
    #[arg(long, value_name = "DIR")]
    pub corpus: Option<Utf8PathBuf>,

    /// Comma separated file extensions to read (default: `extensions` from config).
    #[arg(long, value_delimiter = ',', value_name = "EXT")]
    pub ext: Option<Vec<String>>,

    /// Longest phrase counted, in words.
    #[arg(long, value_name = "N")]
    pub max_n: Option<usize>,

    /// Number of ranked phrases to allocate.
    #[arg(long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Where to write the YAML shortcut file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Word list used for plural lookups (default: corpus vocabulary).
    #[arg(long, value_name = "FILE")]
    pub word_list: Option<Utf8PathBuf>,

    /// Print results without writing the shortcut file.
    #[arg(long)]
    pub no_write: bool,
}

#[derive(Serialize)]
struct SuggestOutput<'a> {
    files: usize,
    lines: usize,
    ranked: usize,
    shortcuts: &'a ShortcutMap,
    report: &'a [ReportRow],
    warnings: &'a [AllocationWarning],
    #[serde(skip_serializing_if = "Option::is_none")]
    written_to: Option<&'a Utf8Path>,
}

/// Run the full pipeline: load the corpus, rank phrases, allocate
/// abbreviations and save the report.
#[instrument(name = "cmd_suggest", skip_all)]
pub fn cmd_suggest(
    args: SuggestArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let corpus_dir = args.corpus.as_ref().unwrap_or(&config.corpus_dir);
    let extensions = args.ext.as_ref().unwrap_or(&config.extensions);
    let max_n = args.max_n.unwrap_or(config.max_n);
    let top_n = args.top_n.unwrap_or(config.top_n);
    let output = args.output.as_ref().unwrap_or(&config.output);
    debug!(%corpus_dir, ?extensions, max_n, top_n, %output, "executing suggest command");

    if max_n == 0 {
        anyhow::bail!("--max-n must be at least 1");
    }
    require_dir(corpus_dir, "corpus")?;

    let spinner = progress_spinner(!global_json && !quiet);

    spinner.set_message(format!("reading {corpus_dir}"));
    let corpus = load_corpus(corpus_dir, extensions)
        .with_context(|| format!("failed to load corpus from {corpus_dir}"))?;

    spinner.set_message(format!("counting n-grams in {} lines", corpus.lines.len()));
    let counts = count_ngrams(&corpus.lines, max_n);
    let ranked = rank_phrases(&counts, top_n);

    spinner.set_message(format!("allocating {} phrases", ranked.len()));
    let word_list = match args.word_list.as_ref().or(config.word_list.as_ref()) {
        Some(path) => WordList::from_file(path)
            .with_context(|| format!("failed to load word list {path}"))?,
        None => WordList::from_words(counts.vocabulary()),
    };
    let lexicon = CachedLexicon::new(word_list);
    let allocation = allocate(&ranked, &config.allocation_settings(), &lexicon);
    let report = build_report(&allocation.shortcuts, &counts);
    spinner.finish_and_clear();

    let written_to = if args.no_write {
        None
    } else {
        save_shortcuts(output, &report)
            .with_context(|| format!("failed to write shortcuts to {output}"))?;
        info!(%output, shortcuts = report.len(), "wrote shortcut file");
        Some(output.as_path())
    };

    if global_json {
        return print_json(&SuggestOutput {
            files: corpus.files.len(),
            lines: corpus.lines.len(),
            ranked: ranked.len(),
            shortcuts: &allocation.shortcuts,
            report: &report,
            warnings: &allocation.warnings,
            written_to,
        });
    }

    for row in &report {
        println!(
            "{:5}\t{:20}:{}",
            row.score,
            row.phrase,
            row.abbrev.green()
        );
    }
    println!();
    println!(
        "{} shortcuts from {} ranked phrases, {} {}",
        report.len().bold(),
        ranked.len(),
        allocation.warnings.len(),
        if allocation.warnings.len() == 1 {
            "warning"
        } else {
            "warnings"
        }
    );
    if let Some(path) = written_to {
        println!("{}: {}", "Written to".dimmed(), path.cyan());
    }
    Ok(())
}

/// Spinner on stderr, or a hidden one when output must stay machine-readable.
fn progress_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
