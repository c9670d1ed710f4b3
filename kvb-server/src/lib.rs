//! KVB live tram departures server.
//!
//! Scrapes the Cologne transit operator's website for live departures
//! at a station, normalizes the timetable into structured records,
//! and serves them as JSON or Slack block-kit messages. Free-form
//! station input (id, exact name, fuzzy name) is resolved against a
//! static station directory loaded at startup.

pub mod cache;
pub mod kvb;
pub mod stations;
pub mod web;
