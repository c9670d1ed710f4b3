//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::kvb::Departure;
use crate::stations::{StationId, StationRef};

/// Index response: local time plus the available methods.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    /// Current Cologne time, ISO-8601 with offset
    pub local_time: String,

    pub methods: IndexMethods,
}

/// Route templates advertised on the index.
#[derive(Debug, Serialize)]
pub struct IndexMethods {
    pub departures: String,
    pub stations: String,
}

/// Station echo in a departures response.
#[derive(Debug, Serialize)]
pub struct StationEcho {
    /// Resolved canonical name; absent for unknown ids
    pub name: Option<String>,

    pub id: StationId,
}

/// Live departures for one station, produced once per request.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    /// Application-level status, mirrored in the wire format
    pub status: u16,

    /// Current Cologne time, ISO-8601 with offset
    pub local_time: String,

    /// Departures in the operator's own table order
    pub departures: Vec<Departure>,

    /// Human-readable outcome, including resolution detail after a
    /// fuzzy match
    pub message: String,

    /// The station the departures belong to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<StationEcho>,
}

/// Body of `POST /station`.
#[derive(Debug, Deserialize)]
pub struct PostStationRequest {
    /// Station id (number or digit string) or name
    pub station: StationRef,
}

/// Form body of the Slack slash command.
#[derive(Debug, Deserialize)]
pub struct SlackCommandRequest {
    /// Raw command text, e.g. `"dom -l 5"` or `"help"`
    #[serde(default)]
    pub text: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
