//! In-memory stand-ins for a media element and the document around it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;

pub use super::element::MediaEvent;
use super::element::{MediaLookup, PlayOutcome, PlaybackElement};
use super::error::{MirrorError, PlayRejected};
use super::mirror::Spawner;
use super::snapshot::TimeRange;

pub fn pool_spawner(pool: &LocalPool) -> Spawner {
    let spawner = pool.spawner();
    Rc::new(move |task: LocalBoxFuture<'static, ()>| {
        spawner
            .spawn_local(task)
            .expect("local pool accepts tasks");
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// `start` finishes synchronously.
    Immediate,
    /// `start` hands back a completion settled by [`FakeElement::settle_play`].
    Deferred,
}

type Callback = Rc<RefCell<Box<dyn FnMut()>>>;

struct Inner {
    paused: Cell<bool>,
    muted: Cell<bool>,
    current_time: Cell<f64>,
    duration: Cell<f64>,
    volume: Cell<f64>,
    buffered: RefCell<Option<Vec<TimeRange>>>,
    start_mode: StartMode,
    start_calls: Cell<usize>,
    stop_calls: Cell<usize>,
    time_writes: RefCell<Vec<f64>>,
    pending: RefCell<Vec<oneshot::Sender<Result<(), PlayRejected>>>>,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<(u64, MediaEvent, Callback)>>,
}

#[derive(Clone)]
pub struct FakeElement {
    inner: Rc<Inner>,
}

pub struct FakeListener {
    owner: Weak<Inner>,
    id: u64,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        if let Some(inner) = self.owner.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _, _)| *id != self.id);
        }
    }
}

impl FakeElement {
    pub fn new() -> Self {
        Self::with_start_mode(StartMode::Deferred)
    }

    pub fn with_start_mode(start_mode: StartMode) -> Self {
        Self {
            inner: Rc::new(Inner {
                paused: Cell::new(true),
                muted: Cell::new(false),
                current_time: Cell::new(0.0),
                duration: Cell::new(0.0),
                volume: Cell::new(1.0),
                buffered: RefCell::new(None),
                start_mode,
                start_calls: Cell::new(0),
                stop_calls: Cell::new(0),
                time_writes: RefCell::new(Vec::new()),
                pending: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);
    }

    pub fn set_duration(&self, duration: f64) {
        self.inner.duration.set(duration);
    }

    pub fn set_buffered(&self, ranges: Vec<TimeRange>) {
        *self.inner.buffered.borrow_mut() = Some(ranges);
    }

    /// Dispatches `event` to every listener currently registered for it.
    pub fn fire(&self, event: MediaEvent) {
        let callbacks: Vec<Callback> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|(_, kind, _)| *kind == event)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            (callback.borrow_mut())();
        }
    }

    /// Settles the oldest outstanding play request.
    pub fn settle_play(&self, result: Result<(), PlayRejected>) {
        let sender = {
            let mut pending = self.inner.pending.borrow_mut();
            if pending.is_empty() {
                return;
            }
            pending.remove(0)
        };
        if result.is_err() {
            self.inner.paused.set(true);
        }
        let _ = sender.send(result);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn start_calls(&self) -> usize {
        self.inner.start_calls.get()
    }

    pub fn stop_calls(&self) -> usize {
        self.inner.stop_calls.get()
    }

    pub fn time_writes(&self) -> Vec<f64> {
        self.inner.time_writes.borrow().clone()
    }
}

impl PlaybackElement for FakeElement {
    type Listener = FakeListener;

    fn paused(&self) -> bool {
        self.inner.paused.get()
    }

    fn muted(&self) -> bool {
        self.inner.muted.get()
    }

    fn current_time(&self) -> f64 {
        self.inner.current_time.get()
    }

    fn duration(&self) -> f64 {
        self.inner.duration.get()
    }

    fn buffered(&self) -> Option<Vec<TimeRange>> {
        self.inner.buffered.borrow().clone()
    }

    fn volume(&self) -> f64 {
        self.inner.volume.get()
    }

    fn set_current_time(&self, time: f64) {
        self.inner.time_writes.borrow_mut().push(time);
        self.inner.current_time.set(time);
    }

    fn set_volume(&self, volume: f64) {
        self.inner.volume.set(volume);
    }

    fn set_muted(&self, muted: bool) {
        self.inner.muted.set(muted);
    }

    fn start(&self) -> PlayOutcome {
        self.inner.start_calls.set(self.inner.start_calls.get() + 1);
        self.inner.paused.set(false);
        match self.inner.start_mode {
            StartMode::Immediate => PlayOutcome::Settled,
            StartMode::Deferred => {
                let (tx, rx) = oneshot::channel();
                self.inner.pending.borrow_mut().push(tx);
                PlayOutcome::Pending(
                    async move {
                        rx.await
                            .unwrap_or_else(|_| Err(PlayRejected("AbortError".into())))
                    }
                    .boxed_local(),
                )
            }
        }
    }

    fn stop(&self) {
        self.inner.stop_calls.set(self.inner.stop_calls.get() + 1);
        self.inner.paused.set(true);
    }

    fn listen(&self, event: MediaEvent, callback: Box<dyn FnMut()>) -> FakeListener {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, event, Rc::new(RefCell::new(callback))));
        FakeListener {
            owner: Rc::downgrade(&self.inner),
            id,
        }
    }
}

/// Id registry; `None` entries are elements that exist but cannot play.
#[derive(Clone, Default)]
pub struct FakeDocument {
    elements: Rc<RefCell<HashMap<String, Option<FakeElement>>>>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_media(&self, id: &str, element: FakeElement) {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), Some(element));
    }

    pub fn insert_other(&self, id: &str) {
        self.elements.borrow_mut().insert(id.to_string(), None);
    }
}

impl MediaLookup<FakeElement> for FakeDocument {
    fn find_media(&self, id: &str) -> Result<FakeElement, MirrorError> {
        match self.elements.borrow().get(id) {
            Some(Some(element)) => Ok(element.clone()),
            Some(None) => Err(MirrorError::not_media(id)),
            None => Err(MirrorError::missing(id)),
        }
    }
}
