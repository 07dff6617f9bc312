//! The media handle abstraction.
//!
//! The controller never decodes audio itself. It drives exactly one
//! playback handle — in the browser build that is the page's single
//! `<audio>` element; in tests it is a recording fake. Commands flow one
//! way (controller → handle), observations flow back as [`HandleEvent`]s
//! the host loop feeds into [`AudioController::on_event`].
//!
//! Commands are infallible by design: a source that fails to load or play
//! reports back through [`HandleEvent::Error`], which is where the
//! controller's skip-broken-tracks policy lives.
//!
//! [`AudioController::on_event`]: crate::player::AudioController::on_event

/// Commands the controller issues to the owned media handle.
pub trait PlaybackHandle {
    /// Point the handle at a new audio resource (site-relative path).
    fn set_source(&mut self, path: &str);
    /// Begin or resume playback of the current source.
    fn play(&mut self);
    /// Pause playback, keeping the current position.
    fn pause(&mut self);
    /// Jump to an absolute position in seconds.
    fn seek(&mut self, seconds: f64);
    /// Set output volume on the handle's own 0.0–1.0 scale.
    fn set_volume(&mut self, level: f32);
}

/// Lifecycle observations reported by the media handle.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleEvent {
    /// The resource's metadata is available; total duration in seconds.
    MetadataLoaded { duration: f64 },
    /// Playback progressed; current position in seconds.
    TimeUpdate { position: f64 },
    /// The current resource played to its end.
    Ended,
    /// The resource failed to load or play.
    Error { message: String },
}
