//! Terminal output — the share table and user-facing error lines.
//!
//! Rendering functions accept a `&mut dyn Write` so tests can capture output
//! without touching the real terminal.

use std::io::{self, Write};

use console::{Alignment, measure_text_width, pad_str, style};

use crate::config::Share;

/// Header line printed above the share table.
pub const SHARES_HEADER: &str = "=== Shares";

// ─── Share table ──────────────────────────────────────────────────────────────

/// Write the header followed by one `name: dir` row per share.
///
/// The `name:` column is padded to the widest label plus one space so every
/// `dir` starts in the same column.
pub fn write_shares(out: &mut dyn Write, shares: &[Share]) -> io::Result<()> {
    writeln!(out, "{SHARES_HEADER}")?;

    let labels: Vec<String> = shares.iter().map(|s| format!("{}:", s.name)).collect();
    let width = labels.iter().map(|l| measure_text_width(l)).max().unwrap_or(0) + 1;

    for (label, share) in labels.iter().zip(shares) {
        writeln!(out, "{}{}", pad_str(label, width, Alignment::Left, None), share.dir)?;
    }
    Ok(())
}

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Print a red `Error:` line to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

// ─── Tests ────────────────────────────────────────────────────────────────────
