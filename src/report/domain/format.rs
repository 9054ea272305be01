//! Pure formatting helpers for report derivation.

use chrono::{DateTime, Utc};

/// Maximum character count of the truncated output, marker included.
pub const MAX_OUTPUT_CHARS: usize = 5_000;

/// Marker appended to output that was cut at the length cap.
pub const TRUNCATION_MARKER: &str = "\n... (output truncated)";

/// Maximum character count of the description inside a subject line.
pub const MAX_SUBJECT_DESCRIPTION_CHARS: usize = 30;

/// Placeholder substituted for fields the originating task cannot supply.
pub const UNKNOWN_PLACEHOLDER: &str = "unknown";

/// Formats an elapsed duration into its coarsest human unit.
///
/// Milliseconds below one second, seconds below one minute, minutes below
/// one hour, hours otherwise; each rounded to the nearest whole unit.
#[must_use]
pub fn format_duration(elapsed_ms: u64) -> String {
    if elapsed_ms < 1_000 {
        format!("{elapsed_ms}ms")
    } else if elapsed_ms < 60_000 {
        format!("{}s", round_to_unit(elapsed_ms, 1_000))
    } else if elapsed_ms < 3_600_000 {
        format!("{}m", round_to_unit(elapsed_ms, 60_000))
    } else {
        format!("{}h", round_to_unit(elapsed_ms, 3_600_000))
    }
}

#[expect(
    clippy::integer_division,
    reason = "whole-unit rounding intentionally discards the remainder"
)]
fn round_to_unit(elapsed_ms: u64, unit_ms: u64) -> u64 {
    (elapsed_ms + unit_ms / 2) / unit_ms
}

/// Truncates tool output to the length cap, appending the marker.
///
/// Idempotent: text already within the cap passes through unchanged, so a
/// previously truncated string (marker included) is never cut again.
#[must_use]
pub fn truncate_output(text: &str) -> String {
    if text.chars().count() <= MAX_OUTPUT_CHARS {
        return text.to_owned();
    }
    let keep = MAX_OUTPUT_CHARS - TRUNCATION_MARKER.chars().count();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Builds the notification subject from the outcome and the description.
///
/// The status prefix is a glyph-and-word pair; the description is cut to 30
/// characters with a trailing ellipsis when longer.
#[must_use]
pub fn build_subject(success: bool, description: &str) -> String {
    let status = if success { "✅ 成功" } else { "❌ 失败" };
    if description.chars().count() <= MAX_SUBJECT_DESCRIPTION_CHARS {
        format!("{status} {description}")
    } else {
        let cut: String = description
            .chars()
            .take(MAX_SUBJECT_DESCRIPTION_CHARS)
            .collect();
        format!("{status} {cut}...")
    }
}

/// Formats a timestamp for human display inside the report body.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
