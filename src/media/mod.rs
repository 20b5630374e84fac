//! Mirrors a host media element's playback state as an immutable snapshot
//! and relays play/pause/seek/volume commands back to it.

mod element;
mod error;
mod host;
mod mirror;
mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use element::{MediaLookup, MediaRef, PlaybackElement};
pub use error::MirrorError;
pub use host::{mounted_element, HostElement, HostLookup};
pub use mirror::{MediaMirror, PlayHandle, SnapshotStore, Spawner};
pub use snapshot::MediaSnapshot;
