//! Shared test utilities for the simple-folio test suite.
//!
//! Fixture builders for the generator tests (write content files into a
//! temp directory) and canned track data for the player tests.

use std::fs;
use std::path::{Path, PathBuf};

use crate::player::Track;

// =========================================================================
// Generator fixtures
// =========================================================================

/// Write a markdown article with a front-matter block.
///
/// `front` is the raw block content (without the `---` delimiters);
/// pass an empty string for an empty block.
pub fn write_article(dir: &Path, name: &str, front: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let content = if front.is_empty() {
        format!("---\n---\n{body}\n")
    } else {
        format!("---\n{front}\n---\n{body}\n")
    };
    fs::write(&path, content).unwrap();
    path
}

/// Create an album folder containing the given (fake) photo files.
pub fn write_album_folder(dir: &Path, name: &str, files: &[&str]) -> PathBuf {
    let folder = dir.join(name);
    fs::create_dir_all(&folder).unwrap();
    for file in files {
        fs::write(folder.join(file), b"fake image").unwrap();
    }
    folder
}

// =========================================================================
// Player fixtures
// =========================================================================

/// `count` uniform tracks named `track0.mp3`, `track1.mp3`, ...
pub fn sample_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track {
            title: format!("Track {i}"),
            artist: "Artist".to_string(),
            kind: String::new(),
            filename: format!("track{i}.mp3"),
            cover_image: "img/.jpg".to_string(),
            duration: 200.0,
        })
        .collect()
}

/// The same tracks as [`sample_tracks`], as a manifest JSON body.
pub fn sample_tracks_json(count: usize) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"title":"Track {i}","artist":"Artist","type":"","filename":"track{i}.mp3","coverImage":"img/.jpg","duration":200}}"#
            )
        })
        .collect();
    format!(r#"{{"tracks":[{}]}}"#, entries.join(","))
}
