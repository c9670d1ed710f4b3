//! Timetable HTML extraction and relative-time parsing.
//!
//! The overview page embeds one results table per station; each row
//! holds the line number, the terminal stop, and a relative departure
//! time such as `"7 Min"` (with a non-breaking space) or `"Sofort"`.
//! The markup is not a stable contract: a missing table is treated as
//! zero departures, never as an error.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

fn selector(css: &str) -> Selector {
    // Only called with fixed literals above.
    Selector::parse(css).expect("static selector")
}

/// One timetable row as scraped, pre-normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDepartureRow {
    pub line: String,
    pub terminal: String,
    /// Relative departure time text, e.g. `"7 Min"` or `"Sofort"`.
    pub departs_in_raw: String,
}

/// Extract departure rows from the overview page body, in document
/// order. Returns an empty vec when no results table is present
/// (unknown station, empty page, or upstream markup change).
pub fn extract_rows(html: &str) -> Vec<RawDepartureRow> {
    let document = Html::parse_document(html);

    let Some(table) = document.select(&TABLE).next() else {
        return Vec::new();
    };

    table
        .select(&ROW)
        .filter_map(|row| {
            let cells: Vec<String> = row
                .select(&CELL)
                .map(|cell| clean_cell(&cell.text().collect::<String>()))
                .collect();
            // Header rows use <th> and yield no cells here.
            if cells.len() < 3 {
                return None;
            }
            let mut cells = cells.into_iter();
            Some(RawDepartureRow {
                line: cells.next().unwrap_or_default(),
                terminal: cells.next().unwrap_or_default(),
                departs_in_raw: cells.next().unwrap_or_default(),
            })
        })
        .collect()
}

/// Strip non-breaking-space artifacts and surrounding whitespace from
/// a cell's text.
fn clean_cell(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}

/// A parsed relative departure time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeTime {
    /// Numeric value, truncated toward zero. `"Sofort"` maps to 0.
    pub value: u32,
    /// Unit token as reported by the site, lowercased (`"min"`, `"hour"`, ...).
    pub unit: String,
}

/// A single row's time text could not be parsed. Callers log and keep
/// the row with its raw text; one bad row never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTimeError {
    /// No whitespace boundary between value and unit
    #[error("no value/unit separator in '{raw}'")]
    MissingUnit { raw: String },

    /// Leading token is not numeric
    #[error("could not parse '{token}' as a number")]
    BadNumber { token: String },
}

/// Parse an operator-formatted relative time string.
///
/// The literal `"sofort"` (immediately) maps to zero minutes. Anything
/// else is split at the first whitespace boundary — which includes the
/// non-breaking space the site emits — into a numeric token and a unit
/// token.
pub fn parse_relative_time(raw: &str) -> Result<RelativeTime, ParseTimeError> {
    let data = raw.trim().to_lowercase();

    if data == "sofort" {
        return Ok(RelativeTime {
            value: 0,
            unit: "min".to_string(),
        });
    }

    let (value_token, unit_token) = data
        .split_once(|c: char| c.is_whitespace())
        .ok_or_else(|| ParseTimeError::MissingUnit { raw: data.clone() })?;

    let value: f64 = value_token
        .parse()
        .map_err(|_| ParseTimeError::BadNumber {
            token: value_token.to_string(),
        })?;

    Ok(RelativeTime {
        // Truncate toward zero; the as-cast saturates negatives to 0.
        value: value.trunc() as u32,
        unit: unit_token.trim().to_string(),
    })
}
