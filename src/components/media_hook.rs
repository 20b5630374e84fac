//! Dioxus hook that keeps one [`MediaMirror`] bound to whatever element the
//! target signal points at.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::future::LocalBoxFuture;
use tracing::error;

use crate::media::{
    MediaLookup, MediaMirror, MediaRef, MediaSnapshot, MirrorError, PlayHandle, PlaybackElement,
    SnapshotStore, Spawner,
};

impl SnapshotStore for Signal<MediaSnapshot> {
    fn current(&self) -> MediaSnapshot {
        self.peek().clone()
    }

    fn publish(&self, next: MediaSnapshot) {
        let mut signal = *self;
        signal.set(next);
    }
}

/// Snapshot plus command surface for one mirrored element.
#[derive(Clone)]
pub struct MediaHandle<E: PlaybackElement> {
    snapshot: Signal<MediaSnapshot>,
    bind_error: Signal<Option<MirrorError>>,
    bound: Signal<bool>,
    play_pending: Signal<bool>,
    mirror: Rc<RefCell<MediaMirror<E, Signal<MediaSnapshot>>>>,
}

impl<E: PlaybackElement> MediaHandle<E> {
    /// Current snapshot; subscribes the calling scope to changes.
    pub fn snapshot(&self) -> MediaSnapshot {
        self.snapshot.read().clone()
    }

    /// Why the last bind failed, if it did.
    pub fn error(&self) -> Option<MirrorError> {
        self.bind_error.read().clone()
    }

    pub fn is_bound(&self) -> bool {
        *self.bound.read()
    }

    /// A play request is still settling; play and pause are ignored meanwhile.
    pub fn is_play_pending(&self) -> bool {
        *self.play_pending.read()
    }

    pub fn play(&self) -> Option<PlayHandle> {
        let completion = self.mirror.borrow().play()?;
        let mut play_pending = self.play_pending;
        play_pending.set(true);
        let settled = completion.clone();
        spawn(async move {
            let _ = settled.await;
            play_pending.set(false);
        });
        Some(completion)
    }

    pub fn pause(&self) {
        self.mirror.borrow().pause();
    }

    pub fn seek(&self, time: f64) {
        self.mirror.borrow().seek(time);
    }

    pub fn set_volume(&self, level: f64) {
        self.mirror.borrow().set_volume(level);
    }

    pub fn mute(&self) {
        self.mirror.borrow().mute();
    }

    pub fn unmute(&self) {
        self.mirror.borrow().unmute();
    }
}

/// Mirrors the element named by `target`. Rebinds whenever `target`
/// changes and releases the element's listeners when the scope drops.
pub fn use_media_mirror<E, L>(target: Signal<Option<MediaRef<E>>>, lookup: L) -> MediaHandle<E>
where
    E: PlaybackElement,
    L: MediaLookup<E> + 'static,
{
    let snapshot = use_signal(MediaSnapshot::default);
    let mut bind_error = use_signal(|| None::<MirrorError>);
    let mut bound = use_signal(|| false);
    let play_pending = use_signal(|| false);

    let mirror = use_hook(move || {
        let spawner: Spawner = Rc::new(|task: LocalBoxFuture<'static, ()>| {
            spawn(task);
        });
        Rc::new(RefCell::new(MediaMirror::dormant(snapshot, spawner)))
    });

    {
        let mirror = mirror.clone();
        use_effect(move || {
            let next = target();
            let result = mirror.borrow_mut().bind(next, &lookup);
            let is_bound = mirror.borrow().is_bound();
            if *bound.peek() != is_bound {
                bound.set(is_bound);
            }
            match result {
                Ok(()) => {
                    if bind_error.peek().is_some() {
                        bind_error.set(None);
                    }
                }
                Err(err) => {
                    error!("{err}");
                    bind_error.set(Some(err));
                }
            }
        });
    }

    {
        let mirror = mirror.clone();
        use_drop(move || mirror.borrow_mut().unbind());
    }

    MediaHandle {
        snapshot,
        bind_error,
        bound,
        play_pending,
        mirror,
    }
}
