//! hook-relay: forwards agent hook events to a monitoring endpoint
//!
//! Invoked by the agent runtime as a hook command. Reads the hook payload from
//! stdin, wraps it in an [`Envelope`] and POSTs it once to the configured URL.
//! Failures are logged to stderr and never fail the hook.
//!
//! # Claude Code hooks config:
//! ```json
//! { "type": "command", "command": "hook-relay" }
//! ```

pub mod config;
pub mod error;
pub mod relay;

pub use config::{Profile, RelayConfig, Settings};
pub use error::{ConfigError, RelayError};
pub use hook_relay_common::{Envelope, read_input};
pub use relay::{Delivery, ExitPolicy, Relay, report, run};
