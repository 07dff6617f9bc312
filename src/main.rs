use clap::{Parser, Subcommand};
use simple_folio::{albums, articles, config, output, tracks};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Manifest generator for a personal portfolio site")]
#[command(long_about = "\
Manifest generator for a personal portfolio site

Your filesystem is the data source. Markdown files become blog articles,
photo folders become albums, and audio files become the music player's
track list. Each generator writes the JSON manifest the site fetches at
runtime.

Site structure:

  public/
  ├── folio.toml                   # Site config (optional)
  ├── article/
  │   ├── shore-leave.md           # Front matter: title, date, category, tags
  │   └── articles.json            # Generated
  ├── album/
  │   ├── tokyo-2024/
  │   │   ├── album_config.md      # Front matter: title, date, description
  │   │   ├── 001.jpg
  │   │   └── 002.jpg
  │   └── albumcontext.json        # Generated
  └── music/
      ├── Ryo Fukui - Early Summer.mp3   # \"Artist - Title\" naming
      └── musiccontext.json        # Generated; hand-curated fields survive

Articles and albums are regenerated from scratch. Tracks are merge-updated:
entries whose file still exists keep their hand-edited metadata, removed
files are dropped, new files get defaults derived from the file name.

Run 'simple-folio gen-config' to generate a documented folio.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root containing the content directories
    #[arg(long, default_value = "public", global = true)]
    site_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the article manifest
    Articles,
    /// Regenerate the album manifest
    Albums,
    /// Merge-update the track manifest
    Tracks,
    /// Run all three generators
    Build,
    /// Scan all collections without writing manifests
    Check,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("simple_folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.site_root)?;

    match cli.command {
        Command::Articles => {
            run_articles(&cli.site_root, &config)?;
        }
        Command::Albums => {
            run_albums(&cli.site_root, &config)?;
        }
        Command::Tracks => {
            run_tracks(&cli.site_root, &config)?;
        }
        Command::Build => {
            println!("==> Generating manifests in {}", cli.site_root.display());
            let written = [
                run_articles(&cli.site_root, &config)?,
                run_albums(&cli.site_root, &config)?,
                run_tracks(&cli.site_root, &config)?,
            ]
            .iter()
            .filter(|w| **w)
            .count();
            println!("==> Wrote {written} manifests");
        }
        Command::Check => {
            println!("==> Checking {}", cli.site_root.display());
            check(&cli.site_root, &config)?;
            println!("==> Content is valid");
        }
        // Handled above, before config loading.
        Command::GenConfig => {}
    }

    Ok(())
}

/// Run the article generator and report. Returns whether a manifest was
/// written.
fn run_articles(site_root: &Path, config: &config::SiteConfig) -> Result<bool, Box<dyn std::error::Error>> {
    match articles::generate(site_root, &config.articles)? {
        Some(entries) => {
            output::print_articles_output(&entries);
            Ok(true)
        }
        None => {
            println!("Articles: skipped, no {}/ directory", config.articles.dir);
            Ok(false)
        }
    }
}

fn run_albums(site_root: &Path, config: &config::SiteConfig) -> Result<bool, Box<dyn std::error::Error>> {
    match albums::generate(site_root, &config.albums)? {
        Some(entries) => {
            output::print_albums_output(&entries);
            Ok(true)
        }
        None => {
            println!("Albums: skipped, no {}/ directory", config.albums.dir);
            Ok(false)
        }
    }
}

fn run_tracks(site_root: &Path, config: &config::SiteConfig) -> Result<bool, Box<dyn std::error::Error>> {
    match tracks::generate(site_root, &config.music)? {
        Some(entries) => {
            output::print_tracks_output(&entries);
            Ok(true)
        }
        None => {
            println!("Tracks: skipped, no {}/ directory", config.music.dir);
            Ok(false)
        }
    }
}

/// Scan every collection without writing anything.
fn check(site_root: &Path, config: &config::SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    let article_dir = site_root.join(&config.articles.dir);
    if article_dir.is_dir() {
        output::print_articles_output(&articles::scan(&article_dir)?);
    } else {
        println!("Articles: no {}/ directory", config.articles.dir);
    }

    let album_dir = site_root.join(&config.albums.dir);
    if album_dir.is_dir() {
        output::print_albums_output(&albums::scan(&album_dir, &config.albums)?);
    } else {
        println!("Albums: no {}/ directory", config.albums.dir);
    }

    let music_dir = site_root.join(&config.music.dir);
    if music_dir.is_dir() {
        let existing = tracks::read_existing(&music_dir.join(&config.music.manifest));
        output::print_tracks_output(&tracks::scan(&music_dir, &config.music, existing)?);
    } else {
        println!("Tracks: no {}/ directory", config.music.dir);
    }

    Ok(())
}
