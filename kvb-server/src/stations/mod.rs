//! Station directory and free-form input resolution.
//!
//! The directory is a fixed name → id table loaded once at startup;
//! the resolver maps user input (id, exact name, or fuzzy name) onto
//! a canonical (name, id) pair.

mod directory;
mod error;
mod fuzzy;
mod resolver;

pub use directory::{StationDirectory, StationId};
pub use error::StationError;
pub use fuzzy::token_set_ratio;
pub use resolver::{Confidence, MIN_FUZZY_SCORE, ResolvedStation, StationRef, resolve};
