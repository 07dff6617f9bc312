//! Album manifest generation.
//!
//! Scans the album directory — one sub-folder per album — counts the
//! recognized photos inside each folder, and writes `albumcontext.json`.
//! An album folder may carry an optional `album_config.md` whose front
//! matter supplies title, date, and description:
//!
//! ```text
//! album/
//! ├── tokyo-2024/
//! │   ├── album_config.md       # Optional metadata
//! │   ├── 001.jpg
//! │   └── 002.jpg
//! ├── winter_walks/             # No config: title "winter walks", date today
//! │   └── snow.png
//! └── albumcontext.json         # Generated (full regeneration every run)
//! ```
//!
//! ## Title fallback
//!
//! With no config file, the folder name becomes the title with `_` and `-`
//! replaced by spaces. With a config file present but no `title` key, the
//! raw folder name is used unchanged. The asymmetry is inherited site
//! behavior; content relies on it.

use crate::config::AlbumsConfig;
use crate::frontmatter;
use crate::manifest::{self, ManifestError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One row of `albumcontext.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumEntry {
    /// Folder name.
    pub id: String,
    pub title: String,
    pub date: String,
    /// Number of recognized photo files directly inside the folder.
    pub count: usize,
    pub description: String,
}

impl AlbumEntry {
    fn error_placeholder(folder: &str, message: &str) -> Self {
        Self {
            id: folder.to_string(),
            title: format!("Error processing {folder}"),
            date: String::new(),
            count: 0,
            description: format!("Error: {message}"),
        }
    }
}

/// Scan the album directory and write the manifest.
///
/// Returns the written entries, or `None` when the directory does not
/// exist (logged, not fatal).
pub fn generate(
    site_root: &Path,
    config: &AlbumsConfig,
) -> Result<Option<Vec<AlbumEntry>>, ManifestError> {
    let dir = site_root.join(&config.dir);
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "album directory missing, nothing generated");
        return Ok(None);
    }

    let entries = scan(&dir, config)?;
    manifest::write_json(&dir.join(&config.manifest), &entries)?;
    Ok(Some(entries))
}

/// Scan album folders into sorted album entries.
pub fn scan(dir: &Path, config: &AlbumsConfig) -> Result<Vec<AlbumEntry>, ManifestError> {
    let mut folders: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    folders.sort();

    let mut entries: Vec<AlbumEntry> = folders
        .iter()
        .map(|folder| read_entry(folder, config))
        .collect();

    manifest::sort_by_date_desc(&mut entries, |e| e.date.as_str());
    Ok(entries)
}

/// Build one entry from an album folder. Failures inside a single folder
/// degrade to a placeholder entry instead of propagating.
fn read_entry(folder: &Path, config: &AlbumsConfig) -> AlbumEntry {
    let id = folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match scan_folder(folder, &id, config) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(folder = %folder.display(), error = %err, "failed to process album");
            AlbumEntry::error_placeholder(&id, &err.to_string())
        }
    }
}

fn scan_folder(folder: &Path, id: &str, config: &AlbumsConfig) -> Result<AlbumEntry, ManifestError> {
    let count = fs::read_dir(folder)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file() && config.image_extensions.contains(&manifest::extension_of(p))
        })
        .count();

    let config_path = folder.join(&config.config_file);
    let (title, date, description) = if config_path.exists() {
        let doc = frontmatter::parse_document(&fs::read_to_string(&config_path)?);
        (
            doc.metadata.str_or("title", id),
            doc.metadata.str_or("date", &manifest::today()),
            doc.metadata.str_or("description", ""),
        )
    } else {
        (
            id.replace(['_', '-'], " "),
            manifest::today(),
            String::new(),
        )
    };

    Ok(AlbumEntry {
        id: id.to_string(),
        title,
        date,
        count,
        description,
    })
}
