//! The music player core: playback state machine + media handle driver.
//!
//! This is the runtime half of the crate. It never touches the
//! filesystem; the host (the site's UI layer) fetches the track manifest,
//! owns the real media element, forwards its lifecycle events, and
//! schedules the occasional [`Deferred`] action. Everything else — track
//! selection, play modes, volume, the skip-broken-tracks policy — lives
//! here, synchronously and single-threaded.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`PlayerState`] | Track list, cursor, transport flags, play modes |
//! | [`PlaybackHandle`] | Trait the host's media element implements |
//! | [`AudioController`] | Owns both; re-syncs the handle after every mutation |

mod controller;
mod handle;
mod state;

pub use controller::{AudioController, Deferred};
pub use handle::{HandleEvent, PlaybackHandle};
pub use state::{PlayMode, PlayerState, Track, TypeCount, placeholder_tracks};
