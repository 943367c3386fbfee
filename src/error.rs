//! Relay failure taxonomy.
//!
//! Every failure is returned as a value and turned into a log line by
//! [`crate::relay::report`]; nothing here logs.

use std::time::Duration;
use thiserror::Error;

/// Configuration could not be resolved, so no request was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable(s): {}", .vars.join(", "))]
    Missing { vars: Vec<&'static str> },
    #[error("invalid monitor URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("bearer token is empty")]
    EmptyToken,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Connection, DNS, TLS, or client setup failure
    #[error("{stage} error for {url}: {message}")]
    Network {
        url: String,
        stage: &'static str,
        message: String,
    },
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("{url} responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },
}

impl RelayError {
    /// Short failure class used as the `category` log field.
    pub fn category(&self) -> &'static str {
        match self {
            RelayError::Config(_) => "config",
            RelayError::Network { .. } => "network",
            RelayError::Timeout { .. } => "timeout",
            RelayError::HttpStatus { .. } if self.is_auth_rejection() => "authentication",
            RelayError::HttpStatus { .. } => "http",
        }
    }

    /// The endpoint rejected the bearer token (401 or 403).
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, RelayError::HttpStatus { status: 401 | 403, .. })
    }

    /// HTTP status, when the endpoint answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RelayError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_reqwest(err: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if err.is_timeout() {
            return RelayError::Timeout {
                url: url.to_string(),
                timeout,
            };
        }

        let stage = if err.is_builder() {
            "client"
        } else if err.is_connect() {
            "connect"
        } else if err.is_body() {
            "body"
        } else {
            "request"
        };

        // The URL is already part of our own message.
        let err = err.without_url();
        RelayError::Network {
            url: url.to_string(),
            stage,
            message: error_chain(&err),
        }
    }
}

/// Render an error with its full `source()` chain, `outer: inner: root`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // hyper and reqwest often repeat the inner message verbatim
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fmt;

    fn http(status: u16) -> RelayError {
        RelayError::HttpStatus {
            url: "https://monitor.test/hook".into(),
            status,
        }
    }

    #[test]
    fn missing_lists_every_variable() {
        let err = ConfigError::Missing {
            vars: vec!["CLAUDE_HOOK_MONITOR_URL", "CLAUDE_HOOK_MONITOR_TOKEN"],
        };
        assert_eq!(
            err.to_string(),
            "missing required environment variable(s): CLAUDE_HOOK_MONITOR_URL, CLAUDE_HOOK_MONITOR_TOKEN"
        );
    }

    #[test]
    fn config_error_is_transparent() {
        let err: RelayError = ConfigError::Missing {
            vars: vec!["SIGAGENT_TOKEN"],
        }
        .into();
        assert_eq!(
            err.to_string(),
            "missing required environment variable(s): SIGAGENT_TOKEN"
        );
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn auth_statuses_are_authentication_class() {
        assert_eq!(http(401).category(), "authentication");
        assert_eq!(http(403).category(), "authentication");
        assert!(http(401).is_auth_rejection());
    }

    #[test]
    fn other_statuses_are_http_class() {
        for status in [301, 404, 429, 500, 503] {
            let err = http(status);
            assert_eq!(err.category(), "http");
            assert!(!err.is_auth_rejection());
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn http_status_message_includes_code() {
        assert_eq!(
            http(502).to_string(),
            "https://monitor.test/hook responded with HTTP 502"
        );
    }

    #[test]
    fn timeout_message_includes_duration() {
        let err = RelayError::Timeout {
            url: "https://monitor.test/hook".into(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.category(), "timeout");
        assert_eq!(
            err.to_string(),
            "request to https://monitor.test/hook timed out after 30s"
        );
        assert_eq!(err.status(), None);
    }

    #[derive(Debug)]
    struct Layer {
        text: &'static str,
        inner: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.text)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self
                .inner
                .as_deref()
                .map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn error_chain_joins_sources() {
        let err = Layer {
            text: "error sending request",
            inner: Some(Box::new(Layer {
                text: "client error (Connect)",
                inner: Some(Box::new(Layer {
                    text: "Connection refused (os error 111)",
                    inner: None,
                })),
            })),
        };
        assert_eq!(
            error_chain(&err),
            "error sending request: client error (Connect): Connection refused (os error 111)"
        );
    }

    #[test]
    fn error_chain_skips_repeated_tail() {
        let err = Layer {
            text: "dns error: no such host",
            inner: Some(Box::new(Layer {
                text: "no such host",
                inner: None,
            })),
        };
        assert_eq!(error_chain(&err), "dns error: no such host");
    }
}
