use chrono::{DateTime, Duration, Timelike, Utc};
use sha2::{Digest, Sha256};

use crate::{
    constants::WINDOW_BOUNDARY_MINUTE,
    errors::{Result, VizHashError},
};

fn window_minute(now: &DateTime<Utc>) -> u32 {
    if now.minute() < WINDOW_BOUNDARY_MINUTE {
        0
    } else {
        WINDOW_BOUNDARY_MINUTE
    }
}

/// Names the window `now` falls into, e.g. `2024-01-01T10:20`.
///
/// Each hour has two windows, `[hh:00, hh:20)` and `[hh:20, hh+1:00)`.
pub fn window_key(now: &DateTime<Utc>) -> String {
    format!(
        "{}T{:02}:{:02}",
        now.format("%Y-%m-%d"),
        now.hour(),
        window_minute(now)
    )
}

pub fn window_start(now: &DateTime<Utc>) -> DateTime<Utc> {
    let into_window = Duration::minutes((now.minute() - window_minute(now)) as i64)
        + Duration::seconds(now.second() as i64)
        + Duration::nanoseconds(now.nanosecond() as i64);

    *now - into_window
}

/// The instant the current window ends and the rolling input changes.
pub fn next_window_boundary(now: &DateTime<Utc>) -> DateTime<Utc> {
    let length = match window_minute(now) {
        0 => WINDOW_BOUNDARY_MINUTE,
        _ => 60 - WINDOW_BOUNDARY_MINUTE,
    };

    window_start(now) + Duration::minutes(length as i64)
}

/// Hex SHA-256 of the window key followed by `secret`. Stable for the whole
/// window, so every server sharing the secret derives the same value.
pub fn current_input(secret: &str, now: DateTime<Utc>) -> Result<String> {
    if secret.is_empty() {
        return Err(VizHashError::Config(
            "a non-empty secret is required to derive the rolling input".to_string(),
        ));
    }

    let mut hasher = Sha256::new();
    hasher.update(window_key(&now).as_bytes());
    hasher.update(secret.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}
