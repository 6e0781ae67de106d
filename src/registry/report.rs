//! Report file writers.
//!
//! The registry's enumerations own the ordering contract; these helpers
//! render them to disk in the comma-separated line format the reporting
//! layer consumes:
//!
//! ```text
//! NAME,DAY.MONTH.YEAR[,ATTENDEE...]    (events report)
//! NAME,EVENT_COUNT                     (members report)
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::EventRegistry;

/// Write every live event, one line each, in ascending date order with
/// registration-order ties; attendee names follow in ascending member-id
/// order.
pub fn write_events_report(registry: &EventRegistry, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create events report: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for entry in registry.events_by_date() {
        write!(out, "{},{}", entry.name, entry.date)?;
        for attendee in &entry.attendees {
            write!(out, ",{attendee}")?;
        }
        writeln!(out)?;
    }

    out.flush()
        .with_context(|| format!("cannot flush events report: {}", path.display()))?;
    info!(path = %path.display(), "events report written");
    Ok(())
}

/// Write every member with at least one live event, one `NAME,COUNT` line
/// each, grouped by descending event count then ascending registration
/// order.
pub fn write_members_report(registry: &EventRegistry, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create members report: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for row in registry.members_by_load() {
        writeln!(out, "{},{}", row.name, row.event_count)?;
    }

    out.flush()
        .with_context(|| format!("cannot flush members report: {}", path.display()))?;
    info!(path = %path.display(), "members report written");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
