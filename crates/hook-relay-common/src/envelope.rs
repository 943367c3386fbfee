//! Event envelope posted to the monitoring endpoint

use crate::time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw hook input wrapped with the time it was captured.
///
/// Field order is the wire order: `hook_stdin`, then `hook_timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Entire stdin content, unparsed
    pub hook_stdin: String,
    /// UTC, millisecond precision, `Z` suffix
    pub hook_timestamp: String,
}

impl Envelope {
    /// Wrap `hook_stdin`, stamped with the current time.
    pub fn new(hook_stdin: impl Into<String>) -> Self {
        Self::at(hook_stdin, Utc::now())
    }

    /// Wrap `hook_stdin`, stamped with `captured_at`.
    pub fn at(hook_stdin: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            hook_stdin: hook_stdin.into(),
            hook_timestamp: time::format_millis(captured_at),
        }
    }
}
