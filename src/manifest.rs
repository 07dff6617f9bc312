//! Shared plumbing for the manifest generators.
//!
//! All three generators (articles, albums, tracks) follow the same shape:
//! enumerate a content directory, build a collection of entries, sort it by
//! date descending, and serialize the whole collection to a JSON file in a
//! single write. This module holds the pieces they share — the error type,
//! the date comparator, and the all-or-nothing writer.
//!
//! ## Date ordering
//!
//! Entry dates are free-form strings. Two formats count as parseable:
//! `YYYY-MM-DD` and RFC 3339 timestamps — the only formats the site's
//! content uses. Everything else sorts after every parseable date, and two
//! unparseable dates compare equal, so their relative order is whatever the
//! (stable) sort saw. That tail order is documented as indeterminate, not a
//! guarantee.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Today's date in the manifest format (`YYYY-MM-DD`, local time).
///
/// Used as the default album date when a folder has no config file.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Parse an entry date string. `None` means "sorts last".
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(d) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Comparator for date-descending manifest order.
///
/// Newest first; unparseable dates after all parseable ones; two
/// unparseable dates are equal (stable sort preserves their scan order).
pub fn cmp_dates_desc(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort a collection newest-first by the date string `date_of` extracts.
pub fn sort_by_date_desc<T>(items: &mut [T], date_of: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| cmp_dates_desc(date_of(a), date_of(b)));
}

/// Serialize `value` and write it to `path` in one operation.
///
/// The full collection is serialized before anything touches the
/// filesystem; there is no partial or streaming write. Replaces any
/// existing file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Lower-cased extension of a path, without the dot.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// File stem as an owned string (entry id for articles and tracks).
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
