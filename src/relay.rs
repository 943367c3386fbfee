//! Single-shot delivery of an envelope to the monitoring endpoint.
//!
//! One POST per invocation, never retried. The outcome is returned as a
//! value; [`report`] is the only place it turns into log output.

use crate::config::RelayConfig;
use crate::error::RelayError;
use hook_relay_common::Envelope;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Sent as `User-Agent` on every request.
pub const USER_AGENT: &str = concat!("hook-relay/", env!("CARGO_PKG_VERSION"));

/// A 2xx answer from the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub elapsed: Duration,
}

/// HTTP client bound to one endpoint and token.
pub struct Relay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl Relay {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            // 3xx is reported as a status, never followed.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| RelayError::from_reqwest(e, config.url.as_str(), config.timeout))?;

        Ok(Self { client, config })
    }

    /// POST `envelope` once. Only the status line of the response is read.
    pub async fn send(&self, envelope: &Envelope) -> Result<Delivery, RelayError> {
        let url = self.config.url.as_str();
        let start = Instant::now();

        let response = self
            .client
            .post(self.config.url.clone())
            .bearer_auth(&self.config.token)
            .json(envelope)
            .send()
            .await
            .map_err(|e| RelayError::from_reqwest(e, url, self.config.timeout))?;

        let status = response.status();
        let elapsed = start.elapsed();
        debug!(
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "monitor responded"
        );

        if status.is_success() {
            Ok(Delivery {
                status: status.as_u16(),
                elapsed,
            })
        } else {
            Err(RelayError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

/// Wrap `hook_stdin` in a freshly stamped envelope and send it.
pub async fn run(config: RelayConfig, hook_stdin: String) -> Result<Delivery, RelayError> {
    let envelope = Envelope::new(hook_stdin);
    let relay = Relay::new(config)?;
    relay.send(&envelope).await
}

/// Log the outcome of one invocation to stderr.
pub fn report(result: &Result<Delivery, RelayError>) {
    match result {
        Ok(delivery) => debug!(
            status = delivery.status,
            elapsed_ms = delivery.elapsed.as_millis() as u64,
            "hook event delivered"
        ),
        Err(RelayError::Config(e)) => error!(category = "config", "hook relay not configured: {e}"),
        Err(e) => warn!(
            category = e.category(),
            status = e.status(),
            "hook monitor request failed: {e}"
        ),
    }
}

/// How an outcome maps to the process exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Always exit 0 so the agent pipeline never sees the relay fail.
    #[default]
    Permissive,
    /// Exit 1 on any failure.
    Strict,
}

impl ExitPolicy {
    pub fn status(self, succeeded: bool) -> u8 {
        match (self, succeeded) {
            (ExitPolicy::Strict, false) => 1,
            _ => 0,
        }
    }
}
