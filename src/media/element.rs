//! The host playback primitive as seen by the mirror.

use futures_util::future::LocalBoxFuture;

use super::error::{MirrorError, PlayRejected};
use super::snapshot::{SnapshotPatch, TimeRange};

/// Notification kinds the mirror subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    Play,
    Pause,
    VolumeChange,
    DurationChange,
    TimeUpdate,
    Progress,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 6] = [
        MediaEvent::Play,
        MediaEvent::Pause,
        MediaEvent::VolumeChange,
        MediaEvent::DurationChange,
        MediaEvent::TimeUpdate,
        MediaEvent::Progress,
    ];

    /// DOM event name.
    pub fn name(self) -> &'static str {
        match self {
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
            MediaEvent::VolumeChange => "volumechange",
            MediaEvent::DurationChange => "durationchange",
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::Progress => "progress",
        }
    }

    /// The partial update this notification produces, re-read from `element`.
    pub fn read_patch<E: PlaybackElement>(self, element: &E) -> SnapshotPatch {
        match self {
            MediaEvent::Play => SnapshotPatch {
                paused: Some(false),
                ..SnapshotPatch::default()
            },
            MediaEvent::Pause => SnapshotPatch {
                paused: Some(true),
                ..SnapshotPatch::default()
            },
            MediaEvent::VolumeChange => SnapshotPatch {
                muted: Some(element.muted()),
                volume: Some(element.volume()),
                ..SnapshotPatch::default()
            },
            MediaEvent::DurationChange => SnapshotPatch {
                duration: Some(element.duration()),
                buffered: Some(element.buffered()),
                ..SnapshotPatch::default()
            },
            MediaEvent::TimeUpdate => SnapshotPatch {
                current_time: Some(element.current_time()),
                ..SnapshotPatch::default()
            },
            MediaEvent::Progress => SnapshotPatch {
                buffered: Some(element.buffered()),
                ..SnapshotPatch::default()
            },
        }
    }
}

/// Result of asking an element to start playing.
pub enum PlayOutcome {
    /// The element started (or refused) synchronously; nothing to wait for.
    Settled,
    /// Completion arrives later.
    Pending(LocalBoxFuture<'static, Result<(), PlayRejected>>),
}

/// A playable element owned by the host. Cloning yields another handle to
/// the same element.
pub trait PlaybackElement: Clone + 'static {
    /// Registration token; dropping it detaches the listener.
    type Listener: 'static;

    fn paused(&self) -> bool;
    fn muted(&self) -> bool;
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn buffered(&self) -> Option<Vec<TimeRange>>;
    fn volume(&self) -> f64;

    fn set_current_time(&self, time: f64);
    fn set_volume(&self, volume: f64);
    fn set_muted(&self, muted: bool);

    fn start(&self) -> PlayOutcome;
    fn stop(&self);

    fn listen(&self, event: MediaEvent, callback: Box<dyn FnMut()>) -> Self::Listener;

    /// Fields pulled once right after binding.
    fn initial_patch(&self) -> SnapshotPatch {
        SnapshotPatch {
            volume: Some(self.volume()),
            muted: Some(self.muted()),
            paused: Some(self.paused()),
            ..SnapshotPatch::default()
        }
    }
}

/// Resolves identifiers against the current view tree.
pub trait MediaLookup<E: PlaybackElement> {
    fn find_media(&self, id: &str) -> Result<E, MirrorError>;
}

/// What a mirror is asked to bind to.
#[derive(Clone, PartialEq)]
pub enum MediaRef<E> {
    Id(String),
    Element(E),
}

impl<E> MediaRef<E> {
    pub fn id(id: impl Into<String>) -> Self {
        MediaRef::Id(id.into())
    }
}

impl<E> std::fmt::Debug for MediaRef<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaRef::Id(id) => f.debug_tuple("Id").field(id).finish(),
            MediaRef::Element(_) => f.write_str("Element(..)"),
        }
    }
}

impl<E: PlaybackElement> MediaRef<E> {
    pub fn resolve<L: MediaLookup<E> + ?Sized>(self, lookup: &L) -> Result<E, MirrorError> {
        match self {
            MediaRef::Id(id) => lookup.find_media(&id),
            MediaRef::Element(element) => Ok(element),
        }
    }
}
