//! Slack command: export folder in, corpus file out.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use shorthand_core::config::Config;
use shorthand_core::slack::{clean_slack_message, extract_slack_messages, write_corpus_file};

use super::{print_json, require_dir};

/// Arguments for the `slack` subcommand.
#[derive(Args, Debug)]
pub struct SlackArgs {
    /// Root of the unzipped Slack export.
    #[arg(long, value_name = "DIR")]
    pub export: Utf8PathBuf,

    /// Slack display name to keep (default: `slack.username` from config).
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Corpus file to write (default: `<corpus_dir>/slack_msgs.txt`).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct SlackOutput<'a> {
    user: &'a str,
    messages: usize,
    output: &'a Utf8Path,
}

/// Extract and clean one user's messages and write them as a corpus file.
#[instrument(name = "cmd_slack", skip_all, fields(export = %args.export))]
pub fn cmd_slack(args: SlackArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let Some(user) = args.user.as_deref().or(config.slack.username.as_deref()) else {
        anyhow::bail!("no Slack user given; pass --user or set slack.username in the config");
    };
    let output = args
        .output
        .clone()
        .or_else(|| config.slack.output.clone())
        .unwrap_or_else(|| config.corpus_dir.join("slack_msgs.txt"));
    debug!(user, %output, "executing slack command");

    require_dir(&args.export, "Slack export")?;
    let messages = extract_slack_messages(&args.export, user)
        .with_context(|| format!("failed to read Slack export {}", args.export))?;
    let cleaned: Vec<String> = messages.iter().map(|m| clean_slack_message(m)).collect();
    write_corpus_file(&output, &cleaned)
        .with_context(|| format!("failed to write corpus file {output}"))?;

    if global_json {
        return print_json(&SlackOutput {
            user,
            messages: cleaned.len(),
            output: &output,
        });
    }

    println!(
        "Wrote {} messages from {} to {}",
        cleaned.len().bold(),
        user,
        output.cyan()
    );
    Ok(())
}
