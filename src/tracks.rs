//! Track manifest generation.
//!
//! Scans the music directory for audio files and writes
//! `musiccontext.json`. Unlike articles and albums, the track manifest is
//! **merge-updated** rather than regenerated: metadata in the existing
//! manifest is hand-curated (titles, artists, durations typed in after the
//! fact), so entries whose file still exists are carried forward
//! untouched, entries whose file disappeared are dropped, and only new
//! files get derived defaults.
//!
//! ```text
//! music/
//! ├── Ryo Fukui - Early Summer.mp3      # "Artist - Title" convention
//! ├── ambient_loop.ogg                  # No separator: Unknown Artist
//! └── musiccontext.json                 # Generated / merge-updated
//! ```
//!
//! A consequence of matching on `filename` is that renaming a file orphans
//! its curated metadata and the new name gets fresh defaults. Known and
//! accepted; the manifest is the source of truth, not the file name.

use crate::config::MusicConfig;
use crate::manifest::{self, ManifestError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Artist used when a filename doesn't follow `Artist - Title`.
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// The track manifest is an object, not a bare array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackManifest {
    #[serde(default)]
    pub tracks: Vec<TrackEntry>,
}

/// One entry of `musiccontext.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEntry {
    pub title: String,
    pub artist: String,
    /// Genre bucket used by the player's type filter. Empty for new
    /// entries; filled in by hand.
    #[serde(rename = "type")]
    pub kind: String,
    /// File name including extension — the merge key and the path the
    /// player resolves the audio source from.
    pub filename: String,
    #[serde(rename = "coverImage")]
    pub cover_image: String,
    /// Seconds, or an empty-string placeholder awaiting curation.
    pub duration: DurationField,
}

/// Duration is free-form in the manifest: numeric seconds once curated,
/// an empty string until then. `serde_json::Number` keeps curated values
/// byte-identical across merge runs (`312` never becomes `312.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Seconds(serde_json::Number),
    Raw(String),
}

impl Default for DurationField {
    fn default() -> Self {
        DurationField::Raw(String::new())
    }
}

impl TrackEntry {
    /// Derive a fresh entry from a file name, `Artist - Title` convention
    /// first, whole stem as title otherwise.
    fn from_filename(file_name: &str) -> Self {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_name.to_string());

        let (artist, title) = match stem.split_once(" - ") {
            // Titles may themselves contain " - "; only the first
            // separator splits.
            Some((artist, title)) => (artist.trim().to_string(), title.trim().to_string()),
            None => (UNKNOWN_ARTIST.to_string(), stem),
        };

        let kind = String::new();
        Self {
            title,
            artist,
            cover_image: format!("img/{kind}.jpg"),
            kind,
            filename: file_name.to_string(),
            duration: DurationField::default(),
        }
    }
}

/// Scan the music directory and merge-update the manifest.
///
/// Returns the written entries, or `None` when the directory does not
/// exist (logged, not fatal).
pub fn generate(
    site_root: &Path,
    config: &MusicConfig,
) -> Result<Option<Vec<TrackEntry>>, ManifestError> {
    let dir = site_root.join(&config.dir);
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "music directory missing, nothing generated");
        return Ok(None);
    }

    let manifest_path = dir.join(&config.manifest);
    let existing = read_existing(&manifest_path);
    let tracks = scan(&dir, config, existing)?;

    manifest::write_json(
        &manifest_path,
        &TrackManifest {
            tracks: tracks.clone(),
        },
    )?;
    Ok(Some(tracks))
}

/// Read the previous manifest, if any. A corrupt file is logged and
/// treated as absent — the scan starts over with derived defaults.
pub fn read_existing(path: &Path) -> Vec<TrackEntry> {
    if !path.exists() {
        return Vec::new();
    }
    match fs::read_to_string(path)
        .map_err(ManifestError::from)
        .and_then(|content| Ok(serde_json::from_str::<TrackManifest>(&content)?))
    {
        Ok(parsed) => parsed.tracks,
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "could not read existing manifest, creating a new one");
            Vec::new()
        }
    }
}

/// Merge existing entries with the current directory contents.
///
/// Files present in both keep their existing entry byte-for-byte; new
/// files get [`TrackEntry::from_filename`] defaults; entries whose file
/// is gone are dropped simply by not being visited.
pub fn scan(
    dir: &Path,
    config: &MusicConfig,
    existing: Vec<TrackEntry>,
) -> Result<Vec<TrackEntry>, ManifestError> {
    let mut audio_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file() && config.audio_extensions.contains(&manifest::extension_of(p))
        })
        .collect();
    audio_files.sort();

    let mut existing_by_filename: HashMap<String, TrackEntry> = existing
        .into_iter()
        .map(|track| (track.filename.clone(), track))
        .collect();

    let tracks = audio_files
        .iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            match existing_by_filename.remove(&file_name) {
                Some(track) => track,
                None => TrackEntry::from_filename(&file_name),
            }
        })
        .collect();

    Ok(tracks)
}
