use dioxus::prelude::*;

use crate::components::{use_media_mirror, MediaHandle};
use crate::config::PlayerConfig;
use crate::media::{mounted_element, HostElement, HostLookup, MediaRef};
use crate::utils::{format_clock, format_seconds};

/// Two videos, each with its own mirror, play button, and time readout.
///
/// The first element is captured from its `onmounted` event; the second is
/// looked up by id once the tree has rendered.
#[component]
pub fn PlayerBoard() -> Element {
    let config = use_context::<PlayerConfig>();
    let mut first_target = use_signal(|| None::<MediaRef<HostElement>>);
    let mut second_target = use_signal(|| None::<MediaRef<HostElement>>);

    let first = use_media_mirror(first_target, HostLookup);
    let second = use_media_mirror(second_target, HostLookup);

    {
        let second_id = config.second_element_id.clone();
        use_effect(move || {
            second_target.set(Some(MediaRef::Id(second_id.clone())));
        });
    }

    let on_first_mounted = move |evt: MountedEvent| {
        if let Some(element) = mounted_element(&evt.data()) {
            first_target.set(Some(MediaRef::Element(element)));
        }
    };

    rsx! {
        div { class: "App",
            video {
                width: "50%",
                src: "{config.first_source}",
                controls: true,
                onmounted: on_first_mounted,
            }
            video {
                width: "50%",
                id: "{config.second_element_id}",
                src: "{config.second_source}",
                controls: true,
            }
        }
        {media_row("one", &first, config.time_precision)}
        {media_row("two", &second, config.time_precision)}
    }
}

fn media_row(label: &str, handle: &MediaHandle<HostElement>, precision: usize) -> Element {
    let snapshot = handle.snapshot();
    let error = handle.error();
    let state_json = serde_json::to_string_pretty(&snapshot).unwrap_or_default();
    let on_play = {
        let handle = handle.clone();
        move |_| {
            let _ = handle.play();
        }
    };
    let on_pause = {
        let handle = handle.clone();
        move |_| handle.pause()
    };
    let on_toggle_mute = {
        let handle = handle.clone();
        let muted = snapshot.muted;
        move |_| {
            if muted {
                handle.unmute();
            } else {
                handle.mute();
            }
        }
    };
    let on_volume = {
        let handle = handle.clone();
        move |e: Event<FormData>| {
            if let Ok(val) = e.value().parse::<f64>() {
                handle.set_volume(val / 100.0);
            }
        }
    };
    let on_seek = {
        let handle = handle.clone();
        move |e: Event<FormData>| {
            if let Ok(val) = e.value().parse::<f64>() {
                handle.seek(val);
            }
        }
    };
    let volume_percent = (snapshot.volume * 100.0).round();
    let buffered = snapshot
        .buffered_end()
        .map(|end| {
            format!(
                " (buffered to {}, {} total)",
                format_clock(end),
                format_clock(snapshot.buffered_seconds())
            )
        })
        .unwrap_or_default();
    let status = if !handle.is_bound() {
        " - waiting for element"
    } else if handle.is_play_pending() {
        " - starting"
    } else {
        ""
    };

    rsx! {
        div {
            button { onclick: on_play, "Play video {label}" }
            button { onclick: on_pause, "Pause" }
            button { onclick: on_toggle_mute,
                if snapshot.muted {
                    "Unmute"
                } else {
                    "Mute"
                }
            }
            input {
                r#type: "range",
                min: "0",
                max: "100",
                value: "{volume_percent}",
                oninput: on_volume,
            }
            input {
                r#type: "range",
                min: "0",
                max: "{snapshot.duration}",
                step: "0.1",
                value: "{snapshot.current_time}",
                disabled: !snapshot.is_seekable(),
                onchange: on_seek,
            }
            if let Some(err) = error {
                h3 { class: "error", "Video {label} unavailable: {err}" }
            } else {
                h3 {
                    "Video {label} current time: {format_seconds(snapshot.current_time, precision)}{status}"
                }
                p {
                    "{format_clock(snapshot.current_time)} / {format_clock(snapshot.duration)}{buffered}"
                }
            }
            details {
                summary { "State" }
                pre { "{state_json}" }
            }
        }
    }
}
