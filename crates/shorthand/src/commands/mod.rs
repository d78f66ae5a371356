//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use serde::Serialize;

pub mod abbrevs;
pub mod autokey;
pub mod info;
pub mod slack;
pub mod suggest;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize output")?
    );
    Ok(())
}

/// Fail early with a readable message when an input directory is missing.
pub fn require_dir(path: &Utf8Path, what: &str) -> anyhow::Result<()> {
    if !path.is_dir() {
        anyhow::bail!("{what} directory not found: {path}");
    }
    Ok(())
}
