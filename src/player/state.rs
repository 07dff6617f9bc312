//! Playback state machine.
//!
//! Holds the track list, the cursor into it, and the transport flags. All
//! transitions are synchronous and infallible; invalid requests (an
//! out-of-range index, next/previous on an empty list) are silent no-ops
//! rather than errors, because they originate from stale UI events and the
//! user can't do anything about them anyway.
//!
//! The state knows nothing about the media handle. The
//! [`AudioController`](crate::player::AudioController) wraps this state
//! and re-syncs the handle after every mutation.
//!
//! ## Invariant
//!
//! `current_track_index` is a valid index whenever `tracks` is non-empty:
//! loading a list resets it to 0, and every transition stays within
//! bounds. [`PlayerState::current_track`] is the derived lookup and is
//! `None` only when the list is empty.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Deserializer};

/// A track as the player sees it, deserialized from `musiccontext.json`.
///
/// Deliberately independent from the generator's entry type: the two
/// pipelines share only the JSON file, not data structures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Genre bucket; drives the type filter.
    #[serde(rename = "type")]
    pub kind: String,
    pub filename: String,
    #[serde(rename = "coverImage")]
    pub cover_image: String,
    /// Seconds. Manifest entries awaiting curation carry a string
    /// placeholder, which reads as 0.
    #[serde(deserialize_with = "lenient_seconds", default)]
    pub duration: f64,
}

/// Accept a number, a numeric string, or anything else as 0 — uncurated
/// manifest entries store `""` here.
fn lenient_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().unwrap_or(0.0),
    })
}

/// Play mode, cycled from the player UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Advance circularly through the list.
    #[default]
    Order,
    /// Pick a uniformly random index — which may be the current one.
    Shuffle,
    /// Stay on the current track.
    Repeat,
}

/// A genre bucket and how many tracks it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub name: String,
    pub count: usize,
}

const DEFAULT_VOLUME: u8 = 70;

/// The player's entire observable state.
#[derive(Debug)]
pub struct PlayerState {
    tracks: Vec<Track>,
    current_track_index: usize,
    is_playing: bool,
    volume: u8,
    current_time: f64,
    total_time: f64,
    play_mode: PlayMode,
    selected_type: Option<String>,
    rng: SmallRng,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Deterministic shuffle for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            tracks: Vec::new(),
            current_track_index: 0,
            is_playing: false,
            volume: DEFAULT_VOLUME,
            current_time: 0.0,
            total_time: 0.0,
            play_mode: PlayMode::Order,
            selected_type: None,
            rng,
        }
    }

    // -- accessors ---------------------------------------------------------

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track_index(&self) -> usize {
        self.current_track_index
    }

    /// The selected track, `None` when the list is empty.
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_track_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    pub fn selected_type(&self) -> Option<&str> {
        self.selected_type.as_deref()
    }

    // -- loading -----------------------------------------------------------

    /// Replace the track list; the cursor resets to the first track.
    pub fn load_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        if !self.tracks.is_empty() {
            self.current_track_index = 0;
        }
    }

    /// Apply a fetched manifest body. Fetch or parse failure falls back to
    /// the built-in placeholder list — the player never starts empty.
    pub fn load_manifest(&mut self, fetched: Result<&str, String>) {
        let tracks = match fetched {
            Ok(body) => match serde_json::from_str::<ManifestDoc>(body) {
                Ok(doc) => doc.tracks,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to parse track manifest, using fallback tracks");
                    placeholder_tracks()
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to load track manifest, using fallback tracks");
                placeholder_tracks()
            }
        };
        self.load_tracks(tracks);
    }

    // -- transport ---------------------------------------------------------

    /// Select a track by index and start playing. Out-of-range requests
    /// are ignored.
    pub fn play_track(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.current_track_index = index;
            self.is_playing = true;
        }
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Advance according to the play mode and start playing. No-op when
    /// the list is empty.
    pub fn play_next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        match self.play_mode {
            PlayMode::Shuffle => {
                self.current_track_index = self.rng.gen_range(0..self.tracks.len());
            }
            PlayMode::Repeat => {}
            PlayMode::Order => {
                self.current_track_index = (self.current_track_index + 1) % self.tracks.len();
            }
        }
        self.is_playing = true;
    }

    /// Step back one track, wrapping to the end, regardless of play mode.
    /// No-op when the list is empty.
    pub fn play_previous(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.current_track_index = if self.current_track_index == 0 {
            self.tracks.len() - 1
        } else {
            self.current_track_index - 1
        };
        self.is_playing = true;
    }

    /// Store the volume, 0–100. Values above 100 clamp.
    pub fn set_volume(&mut self, level: u8) {
        self.volume = level.min(100);
    }

    pub fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    pub fn set_total_time(&mut self, seconds: f64) {
        self.total_time = seconds;
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode = mode;
    }

    // -- type filter -------------------------------------------------------

    pub fn filter_by_type(&mut self, kind: Option<String>) {
        self.selected_type = kind;
    }

    /// Tracks matching the active type filter; all tracks when no filter
    /// is set.
    pub fn filtered_tracks(&self) -> Vec<&Track> {
        match &self.selected_type {
            None => self.tracks.iter().collect(),
            Some(kind) => self.tracks.iter().filter(|t| &t.kind == kind).collect(),
        }
    }

    /// Genre buckets in first-seen order with their track counts.
    pub fn music_types(&self) -> Vec<TypeCount> {
        let mut counts: Vec<TypeCount> = Vec::new();
        for track in &self.tracks {
            match counts.iter_mut().find(|c| c.name == track.kind) {
                Some(entry) => entry.count += 1,
                None => counts.push(TypeCount {
                    name: track.kind.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }
}

#[derive(Deserialize)]
struct ManifestDoc {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Built-in stand-in list used when the manifest cannot be loaded.
pub fn placeholder_tracks() -> Vec<Track> {
    [
        ("Sample Song 1", "Artist 1", "Pop", "sample1.mp3", 240.0),
        ("Sample Song 2", "Artist 2", "Rock", "sample2.mp3", 180.0),
        ("Sample Song 3", "Artist 3", "Jazz", "sample3.mp3", 300.0),
    ]
    .into_iter()
    .map(|(title, artist, kind, filename, duration)| Track {
        title: title.to_string(),
        artist: artist.to_string(),
        kind: kind.to_string(),
        filename: filename.to_string(),
        cover_image: format!("img/{}.jpg", filename.trim_end_matches(".mp3")),
        duration,
    })
    .collect()
}
