//! CLI output formatting for the generator runs.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary
//! display for every entry is its semantic identity — positional index and
//! title — with the backing file or folder shown as an indented `Source:`
//! context line. The console report reads as a content inventory of the
//! site, while still letting users trace each entry back to disk.
//!
//! ```text
//! Articles
//! 001 Shore leave (2024-06-01)
//!     Source: trip.md
//!     Tags: sea, film
//!
//! Albums
//! 001 Tokyo (12 photos, 2024-03-10)
//!     Source: tokyo-2024/
//!
//! Tracks
//! 001 Early Summer
//!     Artist: Ryo Fukui
//!     Source: Ryo Fukui - Early Summer.mp3
//!     Duration: 240s
//!
//! Wrote 3 manifests
//! ```
//!
//! # Architecture
//!
//! Each collection has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::albums::AlbumEntry;
use crate::articles::ArticleEntry;
use crate::tracks::{DurationField, TrackEntry};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Header line: positional index + title, with optional parenthesized
/// detail. Untitled entries show their id in parens — the id IS the
/// identity then.
fn entity_header(index: usize, title: &str, id: &str, detail: Option<&str>) -> String {
    let name = if title.is_empty() {
        format!("({id})")
    } else {
        title.to_string()
    };
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), name, d),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Articles
// ============================================================================

pub fn format_articles_output(entries: &[ArticleEntry]) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];
    for (i, entry) in entries.iter().enumerate() {
        let detail = (!entry.date.is_empty()).then_some(entry.date.as_str());
        lines.push(entity_header(i + 1, &entry.title, &entry.id, detail));
        lines.push(format!("    Source: {}.md", entry.id));
        if !entry.tags.is_empty() {
            lines.push(format!("    Tags: {}", entry.tags.join(", ")));
        }
        if !entry.description.is_empty() {
            lines.push(format!("    {}", truncate_desc(&entry.description, 60)));
        }
    }
    if entries.is_empty() {
        lines.push("    (no articles)".to_string());
    }
    lines
}

pub fn print_articles_output(entries: &[ArticleEntry]) {
    for line in format_articles_output(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Albums
// ============================================================================

pub fn format_albums_output(entries: &[AlbumEntry]) -> Vec<String> {
    let mut lines = vec!["Albums".to_string()];
    for (i, entry) in entries.iter().enumerate() {
        let detail = if entry.date.is_empty() {
            format!("{} photos", entry.count)
        } else {
            format!("{} photos, {}", entry.count, entry.date)
        };
        lines.push(entity_header(i + 1, &entry.title, &entry.id, Some(&detail)));
        lines.push(format!("    Source: {}/", entry.id));
        if !entry.description.is_empty() {
            lines.push(format!("    {}", truncate_desc(&entry.description, 60)));
        }
    }
    if entries.is_empty() {
        lines.push("    (no albums)".to_string());
    }
    lines
}

pub fn print_albums_output(entries: &[AlbumEntry]) {
    for line in format_albums_output(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Tracks
// ============================================================================

pub fn format_tracks_output(entries: &[TrackEntry]) -> Vec<String> {
    let mut lines = vec!["Tracks".to_string()];
    for (i, entry) in entries.iter().enumerate() {
        lines.push(entity_header(i + 1, &entry.title, &entry.filename, None));
        if !entry.artist.is_empty() {
            lines.push(format!("    Artist: {}", entry.artist));
        }
        lines.push(format!("    Source: {}", entry.filename));
        match &entry.duration {
            DurationField::Seconds(s) => lines.push(format!("    Duration: {s}s")),
            DurationField::Raw(s) if !s.is_empty() => {
                lines.push(format!("    Duration: {s}"));
            }
            // Empty placeholder awaiting curation — say so rather than
            // printing a blank field.
            DurationField::Raw(_) => lines.push("    Duration: (pending)".to_string()),
        }
    }
    if entries.is_empty() {
        lines.push("    (no tracks)".to_string());
    }
    lines
}

pub fn print_tracks_output(entries: &[TrackEntry]) {
    for line in format_tracks_output(entries) {
        println!("{}", line);
    }
}
