//! Duration and timestamp formatting for display and reports.

use chrono::NaiveDateTime;

/// Formats fractional minutes the way the logbook reports them:
/// `"45 min"` under an hour, `"2h 05min"` from an hour up. Negative values
/// are clamped to zero.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).floor() as i64;
    if total < 60 {
        format!("{} min", total)
    } else {
        format!("{}h {:02}min", total / 60, total % 60)
    }
}

/// Formats an optional duration, with `"--"` standing in for absent.
pub fn format_opt_minutes(minutes: Option<f64>) -> String {
    minutes.map_or_else(|| "--".to_string(), format_minutes)
}

/// Short clock time (`09:30`), used for sub-event rows.
pub fn format_clock(ts: NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}
