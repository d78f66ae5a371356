//! Abbrevs command: show the candidate list for one phrase.

use clap::Args;
use serde::Serialize;
use tracing::instrument;

use shorthand_core::allocate::saves_enough;
use shorthand_core::candidate_abbrevs;

use super::print_json;

/// Arguments for the `abbrevs` subcommand.
#[derive(Args, Debug)]
pub struct AbbrevsArgs {
    /// Phrase to abbreviate (quote multi-word phrases).
    pub phrase: String,
}

#[derive(Serialize)]
struct Candidate {
    abbrev: String,
    saves_enough: bool,
}

/// Print candidates in the order allocation tries them.
///
/// Candidates too long to be worth typing are dimmed (or flagged in JSON).
#[instrument(name = "cmd_abbrevs", skip_all, fields(phrase = %args.phrase))]
pub fn cmd_abbrevs(args: AbbrevsArgs, global_json: bool) -> anyhow::Result<()> {
    let candidates: Vec<Candidate> = candidate_abbrevs(&args.phrase)
        .into_iter()
        .map(|abbrev| Candidate {
            saves_enough: saves_enough(&abbrev, &args.phrase),
            abbrev,
        })
        .collect();

    if global_json {
        return print_json(&candidates);
    }

    use owo_colors::OwoColorize;
    for candidate in &candidates {
        if candidate.saves_enough {
            println!("{}", candidate.abbrev);
        } else {
            println!("{}", candidate.abbrev.dimmed());
        }
    }
    Ok(())
}
