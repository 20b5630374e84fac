//! Keeps a snapshot of one media element's playback state in sync with its
//! events and forwards playback commands back to the element.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures_util::future::{LocalBoxFuture, Shared};
use futures_util::FutureExt;
use tracing::{debug, warn};

use super::element::{MediaEvent, MediaLookup, MediaRef, PlayOutcome, PlaybackElement};
use super::error::{MirrorError, PlayRejected};
use super::snapshot::{MediaSnapshot, SnapshotPatch};

/// Runs a detached task on the view layer's executor.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Where the mirror publishes snapshots.
pub trait SnapshotStore: Clone + 'static {
    fn current(&self) -> MediaSnapshot;
    fn publish(&self, next: MediaSnapshot);

    fn apply(&self, patch: SnapshotPatch) {
        if patch.is_empty() {
            return;
        }
        let current = self.current();
        let next = current.merge(patch);
        if next != current {
            self.publish(next);
        }
    }
}

impl SnapshotStore for Rc<RefCell<MediaSnapshot>> {
    fn current(&self) -> MediaSnapshot {
        self.borrow().clone()
    }

    fn publish(&self, next: MediaSnapshot) {
        *self.borrow_mut() = next;
    }
}

/// Listeners attached to one element. Dropping it detaches all of them.
pub struct Subscription<E: PlaybackElement> {
    _listeners: Vec<E::Listener>,
}

impl<E: PlaybackElement> Subscription<E> {
    pub fn attach<S: SnapshotStore>(element: &E, store: &S) -> Self {
        let listeners = MediaEvent::ALL
            .iter()
            .map(|&event| {
                let source = element.clone();
                let store = store.clone();
                element.listen(
                    event,
                    Box::new(move || store.apply(event.read_patch(&source))),
                )
            })
            .collect();
        Self {
            _listeners: listeners,
        }
    }
}

/// Completion of an asynchronous play request. Awaiting it is optional; the
/// mirror releases its lock either way.
#[derive(Clone)]
pub struct PlayHandle {
    completion: Shared<LocalBoxFuture<'static, Result<(), PlayRejected>>>,
}

impl Future for PlayHandle {
    type Output = Result<(), PlayRejected>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.completion.poll_unpin(cx)
    }
}

pub struct MediaMirror<E: PlaybackElement, S: SnapshotStore> {
    element: Option<E>,
    store: S,
    play_lock: Rc<Cell<bool>>,
    spawner: Spawner,
    subscription: Option<Subscription<E>>,
}

impl<E: PlaybackElement, S: SnapshotStore> MediaMirror<E, S> {
    /// A mirror with nothing bound; every command is a no-op.
    pub fn dormant(store: S, spawner: Spawner) -> Self {
        Self {
            element: None,
            store,
            play_lock: Rc::new(Cell::new(false)),
            spawner,
            subscription: None,
        }
    }

    #[cfg(test)]
    pub fn new<L: MediaLookup<E> + ?Sized>(
        target: Option<MediaRef<E>>,
        lookup: &L,
        store: S,
        spawner: Spawner,
    ) -> Result<Self, MirrorError> {
        let mut mirror = Self::dormant(store, spawner);
        mirror.bind(target, lookup)?;
        Ok(mirror)
    }

    /// Drops the current binding, then binds to `target`. On error the
    /// mirror is left dormant.
    pub fn bind<L: MediaLookup<E> + ?Sized>(
        &mut self,
        target: Option<MediaRef<E>>,
        lookup: &L,
    ) -> Result<(), MirrorError> {
        self.unbind();

        let Some(target) = target else {
            return Ok(());
        };
        let element = target.resolve(lookup)?;

        self.subscription = Some(Subscription::attach(&element, &self.store));
        self.store.apply(element.initial_patch());
        self.element = Some(element);
        debug!("media mirror bound");
        Ok(())
    }

    pub fn unbind(&mut self) {
        if self.subscription.take().is_some() {
            debug!("media mirror released its listeners");
        }
        self.element = None;
    }

    pub fn is_bound(&self) -> bool {
        self.element.is_some()
    }

    pub fn is_play_locked(&self) -> bool {
        self.play_lock.get()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> MediaSnapshot {
        self.store.current()
    }

    pub fn play(&self) -> Option<PlayHandle> {
        let element = self.element.as_ref()?;
        if self.play_lock.get() {
            debug!("play ignored: previous play request still pending");
            return None;
        }

        let PlayOutcome::Pending(completion) = element.start() else {
            return None;
        };

        self.play_lock.set(true);
        let completion = completion.shared();
        let settle = completion.clone();
        let lock = Rc::clone(&self.play_lock);
        (self.spawner)(
            async move {
                if let Err(err) = settle.await {
                    warn!("{err}");
                }
                lock.set(false);
            }
            .boxed_local(),
        );

        Some(PlayHandle { completion })
    }

    pub fn pause(&self) {
        let Some(element) = self.element.as_ref() else {
            return;
        };
        if self.play_lock.get() {
            debug!("pause dropped: play request still pending");
            return;
        }
        element.stop();
    }

    pub fn seek(&self, time: f64) {
        let Some(element) = self.element.as_ref() else {
            return;
        };
        let snapshot = self.store.current();
        if !snapshot.is_seekable() || time.is_nan() {
            return;
        }
        element.set_current_time(time.clamp(0.0, snapshot.duration));
    }

    pub fn set_volume(&self, level: f64) {
        let Some(element) = self.element.as_ref() else {
            return;
        };
        if level.is_nan() {
            return;
        }
        let volume = level.clamp(0.0, 1.0);
        element.set_volume(volume);
        self.store.apply(SnapshotPatch {
            volume: Some(volume),
            ..SnapshotPatch::default()
        });
    }

    pub fn mute(&self) {
        if let Some(element) = self.element.as_ref() {
            element.set_muted(true);
        }
    }

    pub fn unmute(&self) {
        if let Some(element) = self.element.as_ref() {
            element.set_muted(false);
        }
    }
}

impl<E: PlaybackElement, S: SnapshotStore> Drop for MediaMirror<E, S> {
    fn drop(&mut self) {
        self.unbind();
    }
}
