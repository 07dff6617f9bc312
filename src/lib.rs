//! # Simple Folio
//!
//! The content pipeline for a personal portfolio/blog site. Your
//! filesystem is the data source: markdown files become blog articles,
//! directories of photos become albums, audio files become the music
//! player's track list.
//!
//! # Architecture: Two Independent Pipelines
//!
//! The crate holds two halves that never share data structures — they
//! communicate only through the generated JSON files:
//!
//! ```text
//! 1. Generate (build time, this binary)
//!    article/*.md    →  article/articles.json
//!    album/*/        →  album/albumcontext.json
//!    music/*.mp3     →  music/musiccontext.json   (merge-updated)
//!
//! 2. Play (runtime, library)
//!    musiccontext.json  →  PlayerState  →  media handle commands
//! ```
//!
//! The generators are one-shot batch scans run manually or in CI; the
//! player is a synchronous state machine the site's UI embeds. Keeping
//! the boundary at a plain JSON file means either side can be rebuilt,
//! inspected, or hand-edited without the other noticing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | `---`-delimited metadata blocks: split, coerce values, degrade silently |
//! | [`articles`] | Markdown scan → `articles.json` (full regeneration) |
//! | [`albums`] | Album folder scan + photo count → `albumcontext.json` (full regeneration) |
//! | [`tracks`] | Audio scan → `musiccontext.json` (merge-forward, curation survives) |
//! | [`manifest`] | Shared generator plumbing: errors, date ordering, single-write JSON output |
//! | [`config`] | Optional `folio.toml`: directory names, manifest names, extension sets |
//! | [`output`] | CLI reporting — information-first display of each generated collection |
//! | [`player`] | Playback state machine + media-handle driver |
//!
//! # Design Decisions
//!
//! ## Degrade, Don't Abort
//!
//! Nothing in a content scan is allowed to take down the batch: a missing
//! directory is zero items, a malformed front-matter block is defaults, a
//! file that can't be read becomes a visible `Error processing ...`
//! placeholder entry in the manifest. The site always builds; problems
//! surface in the rendered output where they get noticed and fixed.
//!
//! ## Curation Lives in the Track Manifest
//!
//! Track titles, artists, genres, and durations are hand-polished after
//! generation, so the track generator merges instead of regenerating:
//! whatever the manifest already says about a surviving file wins over
//! anything re-derivable from its name. The flip side — renaming a file
//! orphans its curated entry — is accepted.
//!
//! ## The Handle Is a Trait
//!
//! The player core drives a [`player::PlaybackHandle`] rather than a
//! concrete media element. The browser build wraps the page's `<audio>`
//! element; tests wrap a command recorder. Commands are infallible and
//! failures come back as events, which is where the skip-broken-tracks
//! policy hooks in.

pub mod albums;
pub mod articles;
pub mod config;
pub mod frontmatter;
pub mod manifest;
pub mod output;
pub mod player;
pub mod tracks;

#[cfg(test)]
pub(crate) mod test_helpers;
