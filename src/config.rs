//! Site configuration module.
//!
//! Handles loading and validating `folio.toml` from the site root. The
//! defaults reproduce the site's conventional layout, so most sites never
//! write a config file at all:
//!
//! ```text
//! public/
//! ├── folio.toml                # Optional — overrides shown below
//! ├── article/
//! │   ├── first-post.md
//! │   └── articles.json         # Generated
//! ├── album/
//! │   ├── tokyo-2024/
//! │   │   ├── album_config.md
//! │   │   └── 001.jpg
//! │   └── albumcontext.json     # Generated
//! └── music/
//!     ├── Artist - Song.mp3
//!     └── musiccontext.json     # Generated
//! ```
//!
//! ## Partial configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only rename the music directory
//! [music]
//! dir = "audio"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

const CONFIG_FILE: &str = "folio.toml";

/// Site configuration loaded from `folio.toml`.
///
/// All fields have defaults matching the site's conventional layout. User
/// config files need only specify the values they want to override.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Article collection settings.
    pub articles: ArticlesConfig,
    /// Photo album collection settings.
    pub albums: AlbumsConfig,
    /// Music track collection settings.
    pub music: MusicConfig,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (section, dir) in [
            ("articles", &self.articles.dir),
            ("albums", &self.albums.dir),
            ("music", &self.music.dir),
        ] {
            if dir.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{section}.dir must not be empty"
                )));
            }
        }
        if self.albums.image_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "albums.image_extensions must not be empty".into(),
            ));
        }
        if self.music.audio_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "music.audio_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Article collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArticlesConfig {
    /// Directory under the site root holding `.md` articles.
    pub dir: String,
    /// Manifest file name, written inside the article directory.
    pub manifest: String,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            dir: "article".to_string(),
            manifest: "articles.json".to_string(),
        }
    }
}

/// Photo album collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlbumsConfig {
    /// Directory under the site root holding one sub-folder per album.
    pub dir: String,
    /// Manifest file name, written inside the album directory.
    pub manifest: String,
    /// Per-album metadata file (front matter) looked up inside each folder.
    pub config_file: String,
    /// File extensions (lower-case, no dot) counted as album photos.
    pub image_extensions: Vec<String>,
}

impl Default for AlbumsConfig {
    fn default() -> Self {
        Self {
            dir: "album".to_string(),
            manifest: "albumcontext.json".to_string(),
            config_file: "album_config.md".to_string(),
            image_extensions: ["jpg", "jpeg", "png", "gif", "bmp", "webp"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Music track collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MusicConfig {
    /// Directory under the site root holding audio files.
    pub dir: String,
    /// Manifest file name, written inside the music directory.
    pub manifest: String,
    /// File extensions (lower-case, no dot) recognized as tracks.
    pub audio_extensions: Vec<String>,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            dir: "music".to_string(),
            manifest: "musiccontext.json".to_string(),
            audio_extensions: ["mp3", "wav", "ogg", "flac", "aac", "m4a"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Load config from `folio.toml` in the site root.
///
/// A missing file yields the defaults; a present file is parsed strictly
/// (unknown keys rejected) and validated.
pub fn load_config(site_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = site_root.join(CONFIG_FILE);
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `folio.toml` with all keys and defaults.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file in the site root
# (the directory passed via --site-root, "public" by default).
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Articles (markdown files with optional front matter)
# ---------------------------------------------------------------------------
[articles]
# Directory under the site root holding .md articles.
dir = "article"

# Manifest file name, written inside the article directory.
manifest = "articles.json"

# ---------------------------------------------------------------------------
# Photo albums (one sub-folder per album)
# ---------------------------------------------------------------------------
[albums]
dir = "album"
manifest = "albumcontext.json"

# Per-album metadata file (front matter) looked up inside each folder.
config_file = "album_config.md"

# File extensions counted as album photos (lower-case, no dot).
image_extensions = ["jpg", "jpeg", "png", "gif", "bmp", "webp"]

# ---------------------------------------------------------------------------
# Music tracks (audio files; "Artist - Title.ext" naming)
# ---------------------------------------------------------------------------
[music]
dir = "music"
manifest = "musiccontext.json"

# File extensions recognized as tracks (lower-case, no dot).
audio_extensions = ["mp3", "wav", "ogg", "flac", "aac", "m4a"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.articles.dir, "article");
        assert_eq!(config.albums.manifest, "albumcontext.json");
        assert_eq!(config.music.dir, "music");
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("folio.toml"), "[music]\ndir = \"audio\"\n").unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.music.dir, "audio");
        assert_eq!(config.music.manifest, "musiccontext.json");
        assert_eq!(config.articles.dir, "article");
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("folio.toml"), "[articles]\ndirr = \"x\"\n").unwrap();

        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_dir_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("folio.toml"), "[articles]\ndir = \"\"\n").unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_extension_list_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("folio.toml"),
            "[music]\naudio_extensions = []\n",
        )
        .unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let parsed: Result<SiteConfig, _> = toml::from_str(stock_config_toml());
        assert!(parsed.is_ok());
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.articles.dir, defaults.articles.dir);
        assert_eq!(parsed.albums.image_extensions, defaults.albums.image_extensions);
        assert_eq!(parsed.music.audio_extensions, defaults.music.audio_extensions);
    }
}
