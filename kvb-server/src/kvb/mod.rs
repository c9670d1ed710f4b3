//! KVB website client, timetable parsing, and normalization.
//!
//! The operator's site is an uncontrolled data source: the per-station
//! overview page is scraped, the first results table extracted, and
//! relative time strings ("7 Min", "Sofort") converted into absolute
//! Cologne wall-clock times.

mod client;
mod error;
mod normalize;
mod parse;

pub use client::{KvbClient, KvbConfig};
pub use error::KvbError;
pub use normalize::{Departure, cologne_now, normalize};
pub use parse::{ParseTimeError, RawDepartureRow, RelativeTime, extract_rows, parse_relative_time};
