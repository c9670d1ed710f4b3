//! Web layer for the departures server.
//!
//! JSON endpoints plus the Slack slash-command surface, with CORS
//! headers on every response.

mod cors;
mod dto;
mod routes;
mod slack;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use slack::{SlackCommand, SlackMessage, parse_command};
pub use state::AppState;
