//! Binding to the platform's media element.
//!
//! In the browser this is `HtmlMediaElement`. Native builds have no DOM
//! element reachable from Rust, so [`HostElement`] is uninhabited there and
//! every mirror stays dormant.

use dioxus::prelude::MountedData;

use super::element::{MediaEvent, MediaLookup, PlayOutcome, PlaybackElement};
use super::error::MirrorError;
use super::snapshot::TimeRange;

#[cfg(target_arch = "wasm32")]
use super::error::PlayRejected;
#[cfg(target_arch = "wasm32")]
use futures_util::FutureExt;
#[cfg(target_arch = "wasm32")]
use tracing::warn;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlMediaElement, TimeRanges};

#[cfg(target_arch = "wasm32")]
pub type HostElement = HtmlMediaElement;

#[cfg(not(target_arch = "wasm32"))]
pub type HostElement = DetachedElement;

/// Looks ids up in the live document.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostLookup;

/// Registered DOM listener; removed from the element on drop.
#[cfg(target_arch = "wasm32")]
pub struct WebListener {
    target: HtmlMediaElement,
    event: MediaEvent,
    callback: Closure<dyn FnMut()>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for WebListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event.name(),
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn time_ranges(ranges: &TimeRanges) -> Vec<TimeRange> {
    (0..ranges.length())
        .filter_map(|index| {
            let start = ranges.start(index).ok()?;
            let end = ranges.end(index).ok()?;
            Some(TimeRange::new(start, end))
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn rejection_reason(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(target_arch = "wasm32")]
impl PlaybackElement for HtmlMediaElement {
    type Listener = WebListener;

    fn paused(&self) -> bool {
        HtmlMediaElement::paused(self)
    }

    fn muted(&self) -> bool {
        HtmlMediaElement::muted(self)
    }

    fn current_time(&self) -> f64 {
        HtmlMediaElement::current_time(self)
    }

    // NaN until metadata has loaded
    fn duration(&self) -> f64 {
        let duration = HtmlMediaElement::duration(self);
        if duration.is_nan() {
            0.0
        } else {
            duration
        }
    }

    fn buffered(&self) -> Option<Vec<TimeRange>> {
        Some(time_ranges(&HtmlMediaElement::buffered(self)))
    }

    fn volume(&self) -> f64 {
        HtmlMediaElement::volume(self)
    }

    fn set_current_time(&self, time: f64) {
        HtmlMediaElement::set_current_time(self, time);
    }

    fn set_volume(&self, volume: f64) {
        HtmlMediaElement::set_volume(self, volume);
    }

    fn set_muted(&self, muted: bool) {
        HtmlMediaElement::set_muted(self, muted);
    }

    fn start(&self) -> PlayOutcome {
        match HtmlMediaElement::play(self) {
            Ok(promise) => PlayOutcome::Pending(
                async move {
                    wasm_bindgen_futures::JsFuture::from(promise)
                        .await
                        .map(|_| ())
                        .map_err(|err| PlayRejected(rejection_reason(&err)))
                }
                .boxed_local(),
            ),
            Err(err) => {
                warn!("play() threw: {}", rejection_reason(&err));
                PlayOutcome::Settled
            }
        }
    }

    fn stop(&self) {
        if let Err(err) = HtmlMediaElement::pause(self) {
            warn!("pause() threw: {}", rejection_reason(&err));
        }
    }

    fn listen(&self, event: MediaEvent, callback: Box<dyn FnMut()>) -> WebListener {
        let callback = Closure::wrap(callback);
        if self
            .add_event_listener_with_callback(event.name(), callback.as_ref().unchecked_ref())
            .is_err()
        {
            warn!("could not subscribe to `{}`", event.name());
        }
        WebListener {
            target: self.clone(),
            event,
            callback,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaLookup<HtmlMediaElement> for HostLookup {
    fn find_media(&self, id: &str) -> Result<HtmlMediaElement, MirrorError> {
        let element = window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(id))
            .ok_or_else(|| MirrorError::missing(id))?;
        element
            .dyn_into::<HtmlMediaElement>()
            .map_err(|_| MirrorError::not_media(id))
    }
}

/// The element behind an `onmounted` event, when it is a media element.
#[cfg(target_arch = "wasm32")]
pub fn mounted_element(data: &MountedData) -> Option<HostElement> {
    data.downcast::<web_sys::Element>()
        .cloned()?
        .dyn_into::<HtmlMediaElement>()
        .ok()
}

/// Stand-in element type for targets without a DOM. It has no values.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq)]
pub enum DetachedElement {}

#[cfg(not(target_arch = "wasm32"))]
impl PlaybackElement for DetachedElement {
    type Listener = ();

    fn paused(&self) -> bool {
        match *self {}
    }

    fn muted(&self) -> bool {
        match *self {}
    }

    fn current_time(&self) -> f64 {
        match *self {}
    }

    fn duration(&self) -> f64 {
        match *self {}
    }

    fn buffered(&self) -> Option<Vec<TimeRange>> {
        match *self {}
    }

    fn volume(&self) -> f64 {
        match *self {}
    }

    fn set_current_time(&self, _time: f64) {
        match *self {}
    }

    fn set_volume(&self, _volume: f64) {
        match *self {}
    }

    fn set_muted(&self, _muted: bool) {
        match *self {}
    }

    fn start(&self) -> PlayOutcome {
        match *self {}
    }

    fn stop(&self) {
        match *self {}
    }

    fn listen(&self, _event: MediaEvent, _callback: Box<dyn FnMut()>) {
        match *self {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaLookup<DetachedElement> for HostLookup {
    fn find_media(&self, id: &str) -> Result<DetachedElement, MirrorError> {
        Err(MirrorError::missing(id))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn mounted_element(_data: &MountedData) -> Option<HostElement> {
    None
}
