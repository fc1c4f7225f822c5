//! Plain-text report of a scan
//!
//! The header is written before the scan starts, the entry listing once the
//! sorted results are available. Writers are generic so the layout can be
//! checked without a terminal.

use crate::config::ScanConfig;
use crate::size::format_size;
use crate::walker::Entry;
use std::io::{self, Write};
use std::path::Path;

/// Column header of the listing
const COLUMNS: &str = "TYPE   SIZE        NAME";

/// Write the scan header: root, threshold, exclusions and column titles
pub fn write_header<W: Write>(out: &mut W, config: &ScanConfig) -> io::Result<()> {
    writeln!(out, "Scanning directory: {}", config.root.display())?;
    writeln!(out, "Minimum size threshold: {}", format_size(config.threshold))?;
    if !config.exclude.is_empty() {
        writeln!(out, "Excluding: {}", config.exclude_list)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", COLUMNS)?;
    writeln!(out, "{}", "-".repeat(32))?;
    Ok(())
}

/// Format one listing line: type tag, padded size, path
pub fn format_entry(entry: &Entry) -> String {
    format!(
        "{} {:<10}  {}",
        entry.kind.tag(),
        format_size(entry.size),
        entry.path.display()
    )
}

/// Write every entry in the order given
pub fn write_entries<W: Write>(out: &mut W, entries: &[Entry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}

/// Write the notice shown when the root itself is excluded
pub fn write_excluded_root<W: Write>(out: &mut W, root: &Path) -> io::Result<()> {
    writeln!(
        out,
        "Top-level directory '{}' is in the exclude list. Nothing to do.",
        root.display()
    )
}
