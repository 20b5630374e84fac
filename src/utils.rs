//! Formatting helpers for the readouts.

/// Seconds as a fixed-precision number, e.g. `12.35`.
/// Non-finite values (live streams report an infinite duration) render as `--`.
pub fn format_seconds(seconds: f64, precision: usize) -> String {
    if !seconds.is_finite() {
        return "--".to_string();
    }
    format!("{:.*}", precision, seconds)
}

/// Seconds as `m:ss`, truncating the fraction.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--".to_string();
    }
    let whole = seconds as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
