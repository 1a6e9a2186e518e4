//! Utility functions and shared types for transcript-core
//!
//! Contains the floating-point tolerance used for every time comparison, plus
//! timestamp formatting and parsing shared by exporters and front ends.

use core::fmt::Write as _;

pub mod errors;

pub use errors::CoreError;

/// Tolerance in seconds under which two times are treated as equal
pub const EPSILON: f64 = 1e-3;

/// Compare two times with [`EPSILON`] tolerance
#[must_use]
pub fn rough_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Format seconds as `HH:MM:SS<sep>mmm`
///
/// WebVTT uses `.` as the decimal separator, SRT uses `,`. Negative inputs
/// clamp to zero.
///
/// # Example
///
/// ```rust
/// use transcript_core::utils::format_timestamp;
///
/// assert_eq!(format_timestamp(3661.5, '.'), "01:01:01.500");
/// assert_eq!(format_timestamp(1.25, ','), "00:00:01,250");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_timestamp(seconds: f64, decimal_separator: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    let mut out = String::with_capacity(12);
    let _ = write!(
        out,
        "{hours:02}:{minutes:02}:{secs:02}{decimal_separator}{millis:03}"
    );
    out
}

/// Parse a timestamp given as plain seconds (`83.5`), `MM:SS(.fff)` or
/// `HH:MM:SS(.fff)`. A comma is accepted as decimal separator.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] if any component is not a number,
/// is negative, or there are more than three components.
pub fn parse_timestamp(text: &str) -> Result<f64, CoreError> {
    let normalized = text.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(CoreError::InvalidTime(format!("Invalid time format: {text}")));
    }

    let mut seconds = 0.0;
    for part in &parts {
        let value: f64 = part
            .parse()
            .map_err(|_| CoreError::InvalidTime(format!("Invalid time component: {part}")))?;
        if value < 0.0 || !value.is_finite() {
            return Err(CoreError::InvalidTime(format!(
                "Invalid time component: {part}"
            )));
        }
        seconds = seconds * 60.0 + value;
    }
    Ok(seconds)
}
