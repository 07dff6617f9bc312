//! The audio controller: one state machine, one media handle, kept in
//! lock-step.
//!
//! Every transport method mutates the [`PlayerState`] and then calls
//! [`AudioController::sync`], which diffs the fields the handle cares
//! about (current source, playing flag, volume) against what was last
//! commanded and issues only the commands that changed. The reaction is
//! level-triggered: callers may mutate and re-sync as often as they like,
//! and a no-change sync issues no commands.
//!
//! ## Event flow
//!
//! The host loop feeds the handle's observations into
//! [`AudioController::on_event`]. Most events just update state; an error
//! event returns a [`Deferred`] action the host must schedule — the
//! controller's policy for a broken track is to skip it after a short
//! delay rather than surface the failure. The controller has no timers of
//! its own; it runs entirely on the caller's single thread.
//!
//! ```no_run
//! # use simple_folio::player::{AudioController, Deferred, HandleEvent, PlaybackHandle};
//! # struct H;
//! # impl PlaybackHandle for H {
//! #     fn set_source(&mut self, _: &str) {}
//! #     fn play(&mut self) {}
//! #     fn pause(&mut self) {}
//! #     fn seek(&mut self, _: f64) {}
//! #     fn set_volume(&mut self, _: f32) {}
//! # }
//! # fn schedule_after(_: std::time::Duration, _: impl FnOnce(&mut AudioController<H>)) {}
//! let mut controller = AudioController::new(H);
//! controller.load_manifest(Ok(r#"{"tracks":[]}"#));
//! if let Some(Deferred::AdvanceAfter(delay)) =
//!     controller.on_event(HandleEvent::Error { message: "decode failed".into() })
//! {
//!     schedule_after(delay, |c| c.advance_after_error());
//! }
//! ```

use std::time::Duration;

use super::handle::{HandleEvent, PlaybackHandle};
use super::state::{PlayMode, PlayerState};

/// How long to wait before skipping past a track that failed to play.
const ERROR_SKIP_DELAY: Duration = Duration::from_secs(2);

/// Site-relative directory audio sources are resolved from.
const SOURCE_PREFIX: &str = "/music/";

/// An action the controller wants performed later. The host loop owns
/// scheduling; the controller owns what happens when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Call [`AudioController::advance_after_error`] after the delay.
    AdvanceAfter(Duration),
}

/// Fields mirrored onto the handle, as last commanded.
#[derive(Debug)]
struct Mirrored {
    source: Option<String>,
    playing: bool,
    volume: u8,
}

/// Owns the playback state and the single media handle.
pub struct AudioController<H: PlaybackHandle> {
    state: PlayerState,
    handle: H,
    mirrored: Mirrored,
}

impl<H: PlaybackHandle> AudioController<H> {
    pub fn new(handle: H) -> Self {
        Self::with_state(handle, PlayerState::new())
    }

    /// Construct around a pre-built state (tests use a seeded one).
    pub fn with_state(handle: H, state: PlayerState) -> Self {
        // The handle starts at its own defaults; the volume mirror is
        // seeded from the state so only an actual change is commanded.
        let mirrored = Mirrored {
            source: None,
            playing: false,
            volume: state.volume(),
        };
        Self {
            state,
            handle,
            mirrored,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Tear down: pause the handle and drop it.
    pub fn shutdown(mut self) -> H {
        if self.mirrored.playing {
            self.handle.pause();
        }
        self.handle
    }

    // -- transport (mutate, then re-sync) ----------------------------------

    pub fn load_manifest(&mut self, fetched: Result<&str, String>) {
        self.state.load_manifest(fetched);
        self.sync();
    }

    pub fn play_track(&mut self, index: usize) {
        self.state.play_track(index);
        self.sync();
    }

    pub fn toggle_play(&mut self) {
        self.state.toggle_play();
        self.sync();
    }

    pub fn play_next(&mut self) {
        self.state.play_next();
        self.sync();
    }

    pub fn play_previous(&mut self) {
        self.state.play_previous();
        self.sync();
    }

    pub fn set_volume(&mut self, level: u8) {
        self.state.set_volume(level);
        self.sync();
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.state.set_play_mode(mode);
        self.sync();
    }

    pub fn filter_by_type(&mut self, kind: Option<String>) {
        self.state.filter_by_type(kind);
        self.sync();
    }

    /// Seek to a percentage (0–100) of the total time. No-op while the
    /// duration is unknown or zero — there is nothing to scale against.
    pub fn seek_to_percentage(&mut self, percentage: f64) {
        let total = self.state.total_time();
        if !total.is_finite() || total <= 0.0 {
            return;
        }
        self.handle.seek(percentage / 100.0 * total);
    }

    // -- handle observations -----------------------------------------------

    /// Apply one observation from the handle. Returns a [`Deferred`]
    /// action when the controller needs the host to schedule a follow-up.
    pub fn on_event(&mut self, event: HandleEvent) -> Option<Deferred> {
        match event {
            HandleEvent::MetadataLoaded { duration } => {
                self.state.set_total_time(duration);
                None
            }
            HandleEvent::TimeUpdate { position } => {
                self.state.set_current_time(position);
                None
            }
            HandleEvent::Ended => {
                self.play_next();
                None
            }
            HandleEvent::Error { message } => {
                tracing::warn!(
                    track = self.state.current_track().map(|t| t.filename.as_str()),
                    error = %message,
                    "playback failed, skipping ahead"
                );
                Some(Deferred::AdvanceAfter(ERROR_SKIP_DELAY))
            }
        }
    }

    /// The deferred half of the error policy: move on to the next track.
    pub fn advance_after_error(&mut self) {
        self.play_next();
    }

    // -- handle mirroring ----------------------------------------------------

    /// Re-synchronize the handle with the state. Only changed fields are
    /// commanded; calling this with nothing changed does nothing.
    fn sync(&mut self) {
        let desired_source = self
            .state
            .current_track()
            .map(|t| format!("{SOURCE_PREFIX}{}", t.filename));
        let source_changed = desired_source != self.mirrored.source;
        if source_changed {
            if let Some(src) = &desired_source {
                self.handle.set_source(src);
            }
            self.mirrored.source = desired_source;
        }

        let volume = self.state.volume();
        if source_changed || self.mirrored.volume != volume {
            self.handle.set_volume(f32::from(volume) / 100.0);
            self.mirrored.volume = volume;
        }

        // A new source needs an explicit play even if the flag was
        // already on; the previous play command applied to the old one.
        let playing = self.state.is_playing() && self.state.current_track().is_some();
        if playing && (source_changed || !self.mirrored.playing) {
            self.handle.play();
        } else if !playing && self.mirrored.playing {
            self.handle.pause();
        }
        self.mirrored.playing = playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_tracks_json;

    /// Records every command so tests can assert exactly what the
    /// controller told the handle to do.
    #[derive(Default)]
    struct RecordingHandle {
        commands: Vec<String>,
    }

    impl PlaybackHandle for RecordingHandle {
        fn set_source(&mut self, path: &str) {
            self.commands.push(format!("source {path}"));
        }
        fn play(&mut self) {
            self.commands.push("play".to_string());
        }
        fn pause(&mut self) {
            self.commands.push("pause".to_string());
        }
        fn seek(&mut self, seconds: f64) {
            self.commands.push(format!("seek {seconds}"));
        }
        fn set_volume(&mut self, level: f32) {
            self.commands.push(format!("volume {level:.2}"));
        }
    }

    fn controller_with_tracks(count: usize) -> AudioController<RecordingHandle> {
        let mut c = AudioController::with_state(
            RecordingHandle::default(),
            crate::player::PlayerState::with_seed(7),
        );
        c.load_manifest(Ok(&sample_tracks_json(count)));
        c
    }

    fn commands(c: &AudioController<RecordingHandle>) -> &[String] {
        &c.handle.commands
    }

    fn drain(c: &mut AudioController<RecordingHandle>) {
        c.handle.commands.clear();
    }

    #[test]
    fn loading_points_handle_at_first_track_without_playing() {
        let c = controller_with_tracks(3);
        assert_eq!(
            commands(&c),
            &["source /music/track0.mp3", "volume 0.70"]
        );
    }

    #[test]
    fn selecting_a_track_sets_source_and_plays() {
        let mut c = controller_with_tracks(3);
        drain(&mut c);
        c.play_track(1);
        assert_eq!(
            commands(&c),
            &["source /music/track1.mp3", "volume 0.70", "play"]
        );
    }

    #[test]
    fn toggle_pauses_and_resumes_without_resetting_source() {
        let mut c = controller_with_tracks(2);
        c.play_track(0);
        drain(&mut c);

        c.toggle_play();
        assert_eq!(commands(&c), &["pause"]);
        drain(&mut c);

        c.toggle_play();
        assert_eq!(commands(&c), &["play"]);
    }

    #[test]
    fn redundant_sync_issues_no_commands() {
        let mut c = controller_with_tracks(2);
        c.play_track(0);
        drain(&mut c);

        // Same volume, same mode: nothing should reach the handle.
        c.set_volume(70);
        c.set_play_mode(PlayMode::Shuffle);
        assert!(commands(&c).is_empty());
    }

    #[test]
    fn volume_mirrors_on_unit_scale() {
        let mut c = controller_with_tracks(1);
        drain(&mut c);
        c.set_volume(45);
        assert_eq!(commands(&c), &["volume 0.45"]);
    }

    #[test]
    fn ended_event_advances_and_keeps_playing() {
        let mut c = controller_with_tracks(3);
        c.play_track(0);
        drain(&mut c);

        let deferred = c.on_event(HandleEvent::Ended);
        assert!(deferred.is_none());
        assert_eq!(c.state().current_track_index(), 1);
        assert_eq!(
            commands(&c),
            &["source /music/track1.mp3", "volume 0.70", "play"]
        );
    }

    #[test]
    fn repeat_mode_keeps_source_on_ended() {
        let mut c = controller_with_tracks(3);
        c.play_track(1);
        c.set_play_mode(PlayMode::Repeat);
        drain(&mut c);

        c.on_event(HandleEvent::Ended);
        assert_eq!(c.state().current_track_index(), 1);
        // Source unchanged: the diff suppresses a redundant reload and
        // the play flag was already on, so nothing is commanded.
        assert!(commands(&c).is_empty());
    }

    #[test]
    fn error_event_defers_an_advance() {
        let mut c = controller_with_tracks(3);
        c.play_track(0);
        drain(&mut c);

        let deferred = c.on_event(HandleEvent::Error {
            message: "decode failed".to_string(),
        });
        assert_eq!(
            deferred,
            Some(Deferred::AdvanceAfter(Duration::from_secs(2)))
        );
        // Nothing happens until the host fires the deferred action.
        assert_eq!(c.state().current_track_index(), 0);
        assert!(commands(&c).is_empty());

        c.advance_after_error();
        assert_eq!(c.state().current_track_index(), 1);
    }

    #[test]
    fn metadata_and_time_events_update_state_only() {
        let mut c = controller_with_tracks(1);
        drain(&mut c);

        c.on_event(HandleEvent::MetadataLoaded { duration: 200.0 });
        c.on_event(HandleEvent::TimeUpdate { position: 12.5 });

        assert_eq!(c.state().total_time(), 200.0);
        assert_eq!(c.state().current_time(), 12.5);
        assert!(commands(&c).is_empty());
    }

    #[test]
    fn seek_maps_percentage_onto_total_time() {
        let mut c = controller_with_tracks(1);
        c.on_event(HandleEvent::MetadataLoaded { duration: 200.0 });
        drain(&mut c);

        c.seek_to_percentage(50.0);
        assert_eq!(commands(&c), &["seek 100"]);
    }

    #[test]
    fn seek_with_unknown_duration_is_a_no_op() {
        let mut c = controller_with_tracks(1);
        drain(&mut c);

        c.seek_to_percentage(50.0);
        assert!(commands(&c).is_empty());

        c.on_event(HandleEvent::MetadataLoaded {
            duration: f64::NAN,
        });
        c.seek_to_percentage(50.0);
        assert!(commands(&c).is_empty());
    }

    #[test]
    fn empty_manifest_never_touches_the_handle() {
        let mut c = AudioController::with_state(
            RecordingHandle::default(),
            crate::player::PlayerState::with_seed(7),
        );
        c.load_manifest(Ok(r#"{"tracks":[]}"#));
        c.toggle_play();
        c.play_next();
        assert!(commands(&c).is_empty());
    }

    #[test]
    fn failed_fetch_loads_placeholder_list() {
        let mut c = AudioController::with_state(
            RecordingHandle::default(),
            crate::player::PlayerState::with_seed(7),
        );
        c.load_manifest(Err("network unreachable".to_string()));
        assert_eq!(c.state().tracks().len(), 3);
        assert_eq!(
            commands(&c),
            &["source /music/sample1.mp3", "volume 0.70"]
        );
    }

    #[test]
    fn shutdown_pauses_an_active_handle() {
        let mut c = controller_with_tracks(1);
        c.play_track(0);
        drain(&mut c);

        let handle = c.shutdown();
        assert_eq!(handle.commands, &["pause"]);
    }
}
