//! Departure record normalization.
//!
//! Combines raw timetable rows with the relative-time parser and the
//! current Cologne wall-clock time. All absolute times use the
//! operator's single civil time zone; there is no per-station zone
//! lookup.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Europe::Berlin;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use super::parse::{RawDepartureRow, parse_relative_time};

/// A normalized departure, created fresh per request and never
/// persisted. Output order mirrors the operator's own table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    pub line: String,
    pub terminal: String,
    /// `"<value> <unit>"` when parsed, otherwise the raw scraped text.
    pub departures_in: String,
    /// Absolute wall-clock time `HH:MM`, present only when the
    /// relative time parsed with a minutes unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departures_at: Option<String>,
}

/// Current wall-clock time in the operator's time zone.
pub fn cologne_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&Berlin)
}

/// Normalize scraped rows against a reference clock.
///
/// Output length always equals input length: a row whose time text
/// fails to parse is kept with its raw text and no absolute time,
/// logged at warning level. Order is preserved.
pub fn normalize(rows: Vec<RawDepartureRow>, now: DateTime<Tz>) -> Vec<Departure> {
    rows.into_iter()
        .map(|row| match parse_relative_time(&row.departs_in_raw) {
            Ok(relative) => {
                let departures_at = (relative.unit == "min").then(|| {
                    (now + Duration::minutes(i64::from(relative.value)))
                        .format("%H:%M")
                        .to_string()
                });
                Departure {
                    line: row.line,
                    terminal: row.terminal,
                    departures_in: format!("{} {}", relative.value, relative.unit),
                    departures_at,
                }
            }
            Err(e) => {
                warn!(line = %row.line, raw = %row.departs_in_raw, error = %e,
                    "could not parse departure time");
                Departure {
                    line: row.line,
                    terminal: row.terminal,
                    departures_in: row.departs_in_raw,
                    departures_at: None,
                }
            }
        })
        .collect()
}
