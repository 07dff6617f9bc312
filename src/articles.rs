//! Article manifest generation.
//!
//! Scans the article directory for markdown files, reads each file's front
//! matter, and writes `articles.json` — the index the site's blog section
//! fetches at runtime.
//!
//! ```text
//! article/
//! ├── rust-in-anger.md          # id = "rust-in-anger"
//! ├── spring-notes.md
//! └── articles.json             # Generated (full regeneration every run)
//! ```
//!
//! Articles are regenerated from scratch on every run; there is no merge
//! step. Entries are sorted newest-first by their `date` metadata.
//!
//! ## Failure containment
//!
//! One unreadable file never blocks the rest of the scan: it becomes a
//! placeholder entry whose title and description carry the error, visible
//! in the generated site rather than failing the build. A missing article
//! directory generates nothing and is not an error.

use crate::config::ArticlesConfig;
use crate::frontmatter;
use crate::manifest::{self, ManifestError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One row of `articles.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleEntry {
    /// File stem — stable as long as the file isn't renamed.
    pub id: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl ArticleEntry {
    /// Placeholder for a file that could not be processed. The scan
    /// guarantee is "one bad entry never blocks the rest".
    fn error_placeholder(file_name: &str, id: String, message: &str) -> Self {
        Self {
            id,
            title: format!("Error processing {file_name}"),
            date: String::new(),
            category: String::new(),
            tags: Vec::new(),
            description: format!("Error: {message}"),
        }
    }
}

/// Scan the article directory and write the manifest.
///
/// Returns the written entries, or `None` when the directory does not
/// exist (logged, not fatal — the site simply has no articles yet).
pub fn generate(
    site_root: &Path,
    config: &ArticlesConfig,
) -> Result<Option<Vec<ArticleEntry>>, ManifestError> {
    let dir = site_root.join(&config.dir);
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "article directory missing, nothing generated");
        return Ok(None);
    }

    let entries = scan(&dir)?;
    manifest::write_json(&dir.join(&config.manifest), &entries)?;
    Ok(Some(entries))
}

/// Scan a directory of markdown files into sorted article entries.
pub fn scan(dir: &Path) -> Result<Vec<ArticleEntry>, ManifestError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && manifest::extension_of(p) == "md")
        .collect();
    md_files.sort();

    let mut entries: Vec<ArticleEntry> = md_files.iter().map(|path| read_entry(path)).collect();

    manifest::sort_by_date_desc(&mut entries, |e| e.date.as_str());
    Ok(entries)
}

/// Build one entry from a markdown file. Read failures degrade to a
/// placeholder entry instead of propagating.
fn read_entry(path: &Path) -> ArticleEntry {
    let id = manifest::stem_of(path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| id.clone());

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "failed to read article");
            return ArticleEntry::error_placeholder(&file_name, id, &err.to_string());
        }
    };

    let doc = frontmatter::parse_document(&content);
    if !doc.has_front_matter {
        tracing::debug!(file = %path.display(), "no front matter, using defaults");
    }

    ArticleEntry {
        id,
        title: doc.metadata.str_or("title", ""),
        date: doc.metadata.str_or("date", ""),
        category: doc.metadata.str_or("category", ""),
        tags: doc.metadata.list("tags"),
        description: doc.metadata.str_or("description", ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_article;
    use tempfile::TempDir;

    #[test]
    fn scan_finds_only_markdown_files() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "post.md", "title: Post\ndate: 2024-01-01", "body");
        fs::write(tmp.path().join("notes.txt"), "not an article").unwrap();
        fs::write(tmp.path().join("articles.json"), "[]").unwrap();

        let entries = scan(tmp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "post");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "POST.MD", "title: Upper", "body");

        let entries = scan(tmp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "POST");
    }

    #[test]
    fn front_matter_maps_to_entry_fields() {
        let tmp = TempDir::new().unwrap();
        write_article(
            tmp.path(),
            "trip.md",
            "title: Shore leave\ndate: 2024-06-01\ncategory: travel\ntags: [sea, \"film, 35mm\"]\ndescription: Two weeks away",
            "The body.",
        );

        let entries = scan(tmp.path()).unwrap();
        let entry = &entries[0];
        assert_eq!(entry.title, "Shore leave");
        assert_eq!(entry.date, "2024-06-01");
        assert_eq!(entry.category, "travel");
        assert_eq!(entry.tags, vec!["sea".to_string(), "film, 35mm".to_string()]);
        assert_eq!(entry.description, "Two weeks away");
    }

    #[test]
    fn missing_front_matter_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bare.md"), "Just a body, no header.").unwrap();

        let entries = scan(tmp.path()).unwrap();
        let entry = &entries[0];
        assert_eq!(entry.id, "bare");
        assert_eq!(entry.title, "");
        assert_eq!(entry.date, "");
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn scalar_tags_become_singleton_list() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "one.md", "tags: solo", "body");

        let entries = scan(tmp.path()).unwrap();
        assert_eq!(entries[0].tags, vec!["solo".to_string()]);
    }

    #[test]
    fn entries_sorted_newest_first_invalid_dates_last() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "a.md", "title: Old\ndate: 2024-01-01", "");
        write_article(tmp.path(), "b.md", "title: Broken\ndate: bad", "");
        write_article(tmp.path(), "c.md", "title: New\ndate: 2024-06-01", "");

        let entries = scan(tmp.path()).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old", "Broken"]);
    }

    #[test]
    fn unreadable_file_becomes_placeholder_entry() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "good.md", "title: Fine\ndate: 2024-01-01", "");
        // Invalid UTF-8 makes read_to_string fail for this entry only.
        fs::write(tmp.path().join("broken.md"), [0xff, 0xfe, 0xfd]).unwrap();

        let entries = scan(tmp.path()).unwrap();
        assert_eq!(entries.len(), 2);

        let placeholder = entries.iter().find(|e| e.id == "broken").unwrap();
        assert!(placeholder.title.starts_with("Error processing"));
        assert!(placeholder.description.starts_with("Error:"));

        assert!(entries.iter().any(|e| e.title == "Fine"));
    }

    #[test]
    fn generate_writes_manifest_into_article_dir() {
        let tmp = TempDir::new().unwrap();
        let config = ArticlesConfig::default();
        let dir = tmp.path().join(&config.dir);
        fs::create_dir_all(&dir).unwrap();
        write_article(&dir, "post.md", "title: Post\ndate: 2024-01-01", "body");

        let entries = generate(tmp.path(), &config).unwrap().unwrap();
        assert_eq!(entries.len(), 1);

        let written = fs::read_to_string(dir.join("articles.json")).unwrap();
        let parsed: Vec<ArticleEntry> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed[0].title, "Post");
    }

    #[test]
    fn generate_skips_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let config = ArticlesConfig::default();

        let result = generate(tmp.path(), &config).unwrap();
        assert!(result.is_none());
        assert!(!tmp.path().join(&config.dir).exists());
    }

    #[test]
    fn empty_directory_writes_empty_manifest() {
        let tmp = TempDir::new().unwrap();
        let config = ArticlesConfig::default();
        fs::create_dir_all(tmp.path().join(&config.dir)).unwrap();

        let entries = generate(tmp.path(), &config).unwrap().unwrap();
        assert!(entries.is_empty());

        let written =
            fs::read_to_string(tmp.path().join(&config.dir).join("articles.json")).unwrap();
        assert_eq!(written.trim(), "[]");
    }
}
