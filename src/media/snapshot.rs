use serde::{Deserialize, Serialize};

/// One buffered interval, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Seconds covered; inverted ranges count as empty.
    pub fn len(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Playback state as last reported by the bound element.
///
/// Values are replaced wholesale through [`MediaSnapshot::merge`]; nothing
/// mutates a snapshot once it has been handed to the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSnapshot {
    pub buffered: Option<Vec<TimeRange>>,
    pub duration: f64,
    pub paused: bool,
    pub muted: bool,
    pub current_time: f64,
    pub volume: f64,
}

impl Default for MediaSnapshot {
    fn default() -> Self {
        Self {
            buffered: None,
            duration: 0.0,
            paused: true,
            muted: false,
            current_time: 0.0,
            volume: 1.0,
        }
    }
}

/// Partial update; `None` fields keep the previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPatch {
    pub buffered: Option<Option<Vec<TimeRange>>>,
    pub duration: Option<f64>,
    pub paused: Option<bool>,
    pub muted: Option<bool>,
    pub current_time: Option<f64>,
    pub volume: Option<f64>,
}

impl SnapshotPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl MediaSnapshot {
    /// Returns a new snapshot with only the fields named in `patch` replaced.
    pub fn merge(&self, patch: SnapshotPatch) -> MediaSnapshot {
        MediaSnapshot {
            buffered: patch.buffered.unwrap_or_else(|| self.buffered.clone()),
            duration: patch.duration.unwrap_or(self.duration),
            paused: patch.paused.unwrap_or(self.paused),
            muted: patch.muted.unwrap_or(self.muted),
            current_time: patch.current_time.unwrap_or(self.current_time),
            volume: patch.volume.unwrap_or(self.volume),
        }
    }

    /// End of the furthest buffered range, if anything is buffered.
    pub fn buffered_end(&self) -> Option<f64> {
        self.buffered
            .as_ref()?
            .iter()
            .map(|range| range.end)
            .fold(None, |acc: Option<f64>, end| Some(acc.map_or(end, |a| a.max(end))))
    }

    /// Total seconds buffered across all ranges.
    pub fn buffered_seconds(&self) -> f64 {
        self.buffered
            .as_ref()
            .map_or(0.0, |ranges| ranges.iter().map(TimeRange::len).sum())
    }

    /// Whether a seek would currently be honoured.
    pub fn is_seekable(&self) -> bool {
        self.duration > 0.0
    }
}
