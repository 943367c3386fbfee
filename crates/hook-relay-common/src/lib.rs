//! Shared types for hook-relay
//!
//! - Envelope: the JSON object posted to the monitoring endpoint
//! - Timestamp formatting
//! - Permissive stdin decoding

mod envelope;
mod input;

pub mod time;

pub use envelope::*;
pub use input::*;
